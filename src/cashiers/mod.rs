// src/cashiers/mod.rs

// Declares the submodule with the cashier struct and DTO definitions
pub mod cashier_structs;
// Declares the submodule with the cashier route handlers
pub mod cashier_router;
