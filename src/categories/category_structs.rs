// src/categories/category_structs.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Payload for creating a category via POST.
#[derive(Deserialize)]
pub struct NewCategory {
    pub name: String,
}

/// A category row as stored in the database.
/// Derives FromRow for direct mapping from query results.
#[derive(Serialize, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
}
