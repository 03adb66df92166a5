// src/categories/category_router.rs

use actix_web::{get, post, web, HttpResponse, Responder};
use sqlx::{query, query_as, Row};

// Imports the category structs from this module's sibling file
use super::category_structs::{Category, NewCategory};

use crate::shared::shared_structs::GenericResponse;

// Imports the AppState from the crate root (main.rs)
use crate::AppState;

/// Creates a new category.
///
/// Products must reference an existing category, so categories are created
/// up front through this route (or seeded via schema.sql).
#[post("/categories")]
pub async fn create_category(
    data: web::Data<AppState>,
    item: web::Json<NewCategory>,
) -> HttpResponse {
    let result = query("INSERT INTO categories (name) VALUES ($1) RETURNING id")
        .bind(&item.name)
        .fetch_one(&data.db_pool)
        .await;

    match result {
        Ok(row) => match row.try_get::<i32, &str>("id") {
            Ok(id) => HttpResponse::Created()
                .insert_header(("Location", format!("/categories/{}", id)))
                .json(Category {
                    id,
                    name: item.into_inner().name,
                }),
            Err(e) => {
                eprintln!("Failed to read id of new category: {:?}", e);
                HttpResponse::InternalServerError().json(GenericResponse::<()> {
                    status: "error".to_string(),
                    message: "Failed to process category creation response".to_string(),
                    body: None,
                })
            }
        },
        Err(e) => {
            eprintln!("Failed to insert category: {:?}", e);
            HttpResponse::InternalServerError().json(GenericResponse::<()> {
                status: "error".to_string(),
                message: "Failed to insert category".to_string(),
                body: None,
            })
        }
    }
}

/// Lists all categories.
#[get("/categories")]
pub async fn get_categories(data: web::Data<AppState>) -> impl Responder {
    let categories_result = query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
        .fetch_all(&data.db_pool)
        .await;

    match categories_result {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(e) => {
            eprintln!("Failed to fetch categories: {:?}", e);
            HttpResponse::InternalServerError().json(GenericResponse::<()> {
                status: "error".to_string(),
                message: "Failed to fetch categories".to_string(),
                body: None,
            })
        }
    }
}
