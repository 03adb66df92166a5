// src/shared/mod.rs

// Declares the submodule with types shared across the entity modules
pub mod shared_structs;
