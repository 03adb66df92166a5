// src/cashiers/cashier_router.rs

use actix_web::{get, post, web, HttpResponse};
use sqlx::{query, query_as, Row};

// Imports the cashier structs from this module's sibling file
use super::cashier_structs::{Cashier, CashierDetail, CashierDto, NewCashier};

// Imports the order query helpers for the nested orders in the detail view
use crate::orders::order_router::load_order_lines;
use crate::orders::order_structs::{OrderDto, OrderRecord};

use crate::shared::shared_structs::GenericResponse;

// Imports the AppState from the crate root (main.rs)
use crate::AppState;

/// Fetches a cashier by id, with their orders nested and each order's
/// line items and totals resolved.
#[get("/cashiers/{id}")]
pub async fn get_cashier_by_id(data: web::Data<AppState>, path: web::Path<i32>) -> HttpResponse {
    let id = path.into_inner();
    let cashier_result =
        query_as::<_, Cashier>("SELECT id, first_name, last_name FROM cashiers WHERE id = $1")
            .bind(id)
            .fetch_optional(&data.db_pool)
            .await;

    let cashier = match cashier_result {
        Ok(Some(cashier)) => cashier,
        Ok(None) => {
            return HttpResponse::NotFound().json(GenericResponse::<()> {
                status: "error".to_string(),
                message: format!("Cashier with id {} not found.", id),
                body: None,
            });
        }
        Err(e) => {
            eprintln!("Failed to fetch cashier {}: {:?}", id, e);
            return HttpResponse::InternalServerError().json(GenericResponse::<()> {
                status: "error".to_string(),
                message: "Failed to fetch cashier".to_string(),
                body: None,
            });
        }
    };

    // Load this cashier's orders, then each order's line items in turn
    let orders_result = query_as::<_, OrderRecord>(
        "SELECT o.id, o.cashier_id, o.paid_on_date, \
         c.first_name AS cashier_first_name, c.last_name AS cashier_last_name \
         FROM orders o \
         LEFT JOIN cashiers c ON c.id = o.cashier_id \
         WHERE o.cashier_id = $1 \
         ORDER BY o.id",
    )
    .bind(id)
    .fetch_all(&data.db_pool)
    .await;

    let records = match orders_result {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Failed to fetch orders of cashier {}: {:?}", id, e);
            return HttpResponse::InternalServerError().json(GenericResponse::<()> {
                status: "error".to_string(),
                message: "Failed to fetch cashier orders".to_string(),
                body: None,
            });
        }
    };

    let mut orders: Vec<OrderDto> = Vec::with_capacity(records.len());
    for record in &records {
        match load_order_lines(&data.db_pool, record.id).await {
            Ok(lines) => orders.push(OrderDto::from_record(record, &lines)),
            Err(e) => {
                eprintln!("Failed to fetch line items for order {}: {:?}", record.id, e);
                return HttpResponse::InternalServerError().json(GenericResponse::<()> {
                    status: "error".to_string(),
                    message: "Failed to fetch order line items".to_string(),
                    body: None,
                });
            }
        }
    }

    HttpResponse::Ok().json(CashierDetail::from_cashier(&cashier, orders))
}

/// Creates a new cashier.
#[post("/cashiers")]
pub async fn create_cashier(
    data: web::Data<AppState>,
    item: web::Json<NewCashier>,
) -> HttpResponse {
    let result = query("INSERT INTO cashiers (first_name, last_name) VALUES ($1, $2) RETURNING id")
        .bind(&item.first_name)
        .bind(&item.last_name)
        .fetch_one(&data.db_pool)
        .await;

    match result {
        Ok(row) => match row.try_get::<i32, &str>("id") {
            Ok(id) => {
                let item = item.into_inner();
                let cashier = Cashier {
                    id,
                    first_name: item.first_name,
                    last_name: item.last_name,
                };
                HttpResponse::Created()
                    .insert_header(("Location", format!("/cashiers/{}", id)))
                    .json(CashierDto::from_cashier(&cashier, 0))
            }
            Err(e) => {
                eprintln!("Failed to read id of new cashier: {:?}", e);
                HttpResponse::InternalServerError().json(GenericResponse::<()> {
                    status: "error".to_string(),
                    message: "Failed to process cashier creation response".to_string(),
                    body: None,
                })
            }
        },
        Err(e) => {
            eprintln!("Failed to insert cashier: {:?}", e);
            HttpResponse::InternalServerError().json(GenericResponse::<()> {
                status: "error".to_string(),
                message: "Failed to insert cashier".to_string(),
                body: None,
            })
        }
    }
}
