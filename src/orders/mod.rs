// src/orders/mod.rs

// Declares the submodule with the order struct and DTO definitions
pub mod order_structs;
// Declares the submodule with the order route handlers
pub mod order_router;
