// src/shared/shared_structs.rs

use serde::Serialize;

/// Generic envelope used for error and status responses.
/// 'T' is the type of the optional response body.
#[derive(Serialize)]
pub struct GenericResponse<T> {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")] // Omit 'body' when None
    pub body: Option<T>,
}
