// src/categories/mod.rs

// Declares the submodule with the category struct definitions
pub mod category_structs;
// Declares the submodule with the category route handlers
pub mod category_router;
