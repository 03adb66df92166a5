// src/products/mod.rs

// Declares the submodule with the product struct and DTO definitions
pub mod product_structs;
// Declares the submodule with the product route handlers
pub mod product_router;
