// src/products/product_router.rs

use actix_web::{get, post, put, web, HttpResponse, Responder};
use serde::Deserialize;
use sqlx::{query, query_as, Row};

// Imports the product structs from this module's sibling file
use super::product_structs::{filter_by_search, NewProduct, ProductDto, ProductRecord, UpdateProduct};

use crate::shared::shared_structs::GenericResponse;

// Imports the AppState from the crate root (main.rs)
use crate::AppState;

// Products are always read together with their category name.
const SELECT_PRODUCTS: &str = "SELECT p.id, p.name, p.brand, p.price, p.category_id, \
     c.name AS category_name \
     FROM products p \
     LEFT JOIN categories c ON c.id = p.category_id";

/// Query parameters accepted by the product listing route.
#[derive(Deserialize)]
pub struct ProductListQuery {
    pub search: Option<String>,
}

/// Lists all products, optionally filtered by ?search= over the product
/// name, brand, and category name.
#[get("/products")]
pub async fn get_products(
    data: web::Data<AppState>,
    params: web::Query<ProductListQuery>,
) -> impl Responder {
    let products_result = query_as::<_, ProductRecord>(&format!("{} ORDER BY p.id", SELECT_PRODUCTS))
        .fetch_all(&data.db_pool)
        .await;

    match products_result {
        Ok(products) => {
            let products = match params.search.as_deref() {
                Some(term) => filter_by_search(products, term),
                None => products,
            };
            let response: Vec<ProductDto> =
                products.into_iter().map(ProductDto::from_record).collect();
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            eprintln!("Failed to fetch products: {:?}", e);
            HttpResponse::InternalServerError().json(GenericResponse::<()> {
                status: "error".to_string(),
                message: "Failed to fetch products".to_string(),
                body: None,
            })
        }
    }
}

/// Creates a new product referencing an existing category.
#[post("/products")]
pub async fn create_product(
    data: web::Data<AppState>,
    item: web::Json<NewProduct>,
) -> HttpResponse {
    let result = query(
        "INSERT INTO products (name, brand, price, category_id) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(&item.name)
    .bind(&item.brand)
    .bind(&item.price)
    .bind(item.category_id)
    .fetch_one(&data.db_pool)
    .await;

    let id = match result.and_then(|row| row.try_get::<i32, &str>("id")) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Failed to insert product: {:?}", e);
            let message = if e.to_string().contains("foreign key constraint") {
                "Failed to insert product: categoryId does not reference an existing category."
            } else {
                "Failed to insert product."
            };
            return HttpResponse::InternalServerError().json(GenericResponse::<()> {
                status: "error".to_string(),
                message: message.to_string(),
                body: None,
            });
        }
    };

    // Reload the row with its category joined in for the response
    let saved_result = query_as::<_, ProductRecord>(&format!("{} WHERE p.id = $1", SELECT_PRODUCTS))
        .bind(id)
        .fetch_one(&data.db_pool)
        .await;

    match saved_result {
        Ok(saved) => HttpResponse::Created()
            .insert_header(("Location", format!("/products/{}", id)))
            .json(ProductDto::from_record(saved)),
        Err(e) => {
            eprintln!("Failed to reload product {}: {:?}", id, e);
            HttpResponse::InternalServerError().json(GenericResponse::<()> {
                status: "error".to_string(),
                message: "Product saved but could not be reloaded".to_string(),
                body: None,
            })
        }
    }
}

/// Updates an existing product. The body id must match the path id.
#[put("/products/{id}")]
pub async fn update_product(
    data: web::Data<AppState>,
    path: web::Path<i32>,
    item: web::Json<UpdateProduct>,
) -> HttpResponse {
    let id = path.into_inner();
    if id != item.id {
        return HttpResponse::BadRequest().json(GenericResponse::<()> {
            status: "error".to_string(),
            message: format!("Body id {} does not match path id {}.", item.id, id),
            body: None,
        });
    }

    let result = query("UPDATE products SET name = $1, brand = $2, price = $3, category_id = $4 WHERE id = $5")
        .bind(&item.name)
        .bind(&item.brand)
        .bind(&item.price)
        .bind(item.category_id)
        .bind(id)
        .execute(&data.db_pool)
        .await;

    match result {
        Ok(res) if res.rows_affected() > 0 => HttpResponse::NoContent().finish(),
        Ok(_) => HttpResponse::NotFound().json(GenericResponse::<()> {
            status: "error".to_string(),
            message: format!("Product with id {} not found.", id),
            body: None,
        }),
        Err(e) => {
            eprintln!("Failed to update product {}: {:?}", id, e);
            let message = if e.to_string().contains("foreign key constraint") {
                "Failed to update product: categoryId does not reference an existing category."
            } else {
                "Failed to update product."
            };
            HttpResponse::InternalServerError().json(GenericResponse::<()> {
                status: "error".to_string(),
                message: message.to_string(),
                body: None,
            })
        }
    }
}
