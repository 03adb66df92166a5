// src/orders/order_router.rs

use actix_web::{delete, get, post, web, HttpResponse};
use serde::Deserialize;
use sqlx::{query, query_as, Pool, Postgres, Row};

// Imports the order structs from this module's sibling file
use super::order_structs::{filter_by_date, NewOrder, OrderDto, OrderLine, OrderRecord};

use crate::shared::shared_structs::GenericResponse;

// Imports the AppState from the crate root (main.rs)
use crate::AppState;

// Orders are always read together with their cashier's name columns.
const SELECT_ORDERS: &str = "SELECT o.id, o.cashier_id, o.paid_on_date, \
     c.first_name AS cashier_first_name, c.last_name AS cashier_last_name \
     FROM orders o \
     LEFT JOIN cashiers c ON c.id = o.cashier_id";

/// Loads an order's line items joined with their products, in insertion
/// order. Also used by the cashier routes to nest orders in the response.
pub async fn load_order_lines(
    pool: &Pool<Postgres>,
    order_id: i32,
) -> Result<Vec<OrderLine>, sqlx::Error> {
    query_as::<_, OrderLine>(
        "SELECT op.product_id, op.quantity, \
         p.name AS product_name, p.brand AS brand, p.price AS price \
         FROM order_products op \
         LEFT JOIN products p ON p.id = op.product_id \
         WHERE op.order_id = $1 \
         ORDER BY op.id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await
}

/// Query parameters accepted by the order listing route.
#[derive(Deserialize)]
pub struct OrderListQuery {
    #[serde(rename = "orderDate")]
    pub order_date: Option<String>,
}

/// Lists all orders, optionally filtered to a single calendar date via
/// ?orderDate=YYYY-MM-DD. A value that does not parse as a date is
/// ignored and the full list is returned.
#[get("/orders")]
pub async fn get_orders(
    data: web::Data<AppState>,
    params: web::Query<OrderListQuery>,
) -> HttpResponse {
    let orders_result = query_as::<_, OrderRecord>(&format!("{} ORDER BY o.id", SELECT_ORDERS))
        .fetch_all(&data.db_pool)
        .await;

    let orders = match orders_result {
        Ok(orders) => orders,
        Err(e) => {
            eprintln!("Failed to fetch orders: {:?}", e);
            return HttpResponse::InternalServerError().json(GenericResponse::<()> {
                status: "error".to_string(),
                message: "Failed to fetch orders".to_string(),
                body: None,
            });
        }
    };

    // Apply the date filter in memory over the loaded rows
    let orders = match &params.order_date {
        Some(raw) => filter_by_date(orders, raw),
        None => orders,
    };

    // Resolve each order's line items one at a time, then project
    let mut response: Vec<OrderDto> = Vec::with_capacity(orders.len());
    for order in &orders {
        match load_order_lines(&data.db_pool, order.id).await {
            Ok(lines) => response.push(OrderDto::from_record(order, &lines)),
            Err(e) => {
                eprintln!("Failed to fetch line items for order {}: {:?}", order.id, e);
                return HttpResponse::InternalServerError().json(GenericResponse::<()> {
                    status: "error".to_string(),
                    message: "Failed to fetch order line items".to_string(),
                    body: None,
                });
            }
        }
    }

    HttpResponse::Ok().json(response)
}

/// Fetches a single order by id, with its line items and totals resolved.
#[get("/orders/{id}")]
pub async fn get_order_by_id(data: web::Data<AppState>, path: web::Path<i32>) -> HttpResponse {
    let id = path.into_inner();
    let order_result = query_as::<_, OrderRecord>(&format!("{} WHERE o.id = $1", SELECT_ORDERS))
        .bind(id)
        .fetch_optional(&data.db_pool)
        .await;

    match order_result {
        Ok(Some(order)) => match load_order_lines(&data.db_pool, id).await {
            Ok(lines) => HttpResponse::Ok().json(OrderDto::from_record(&order, &lines)),
            Err(e) => {
                eprintln!("Failed to fetch line items for order {}: {:?}", id, e);
                HttpResponse::InternalServerError().json(GenericResponse::<()> {
                    status: "error".to_string(),
                    message: "Failed to fetch order line items".to_string(),
                    body: None,
                })
            }
        },
        Ok(None) => HttpResponse::NotFound().json(GenericResponse::<()> {
            status: "error".to_string(),
            message: format!("Order with id {} not found.", id),
            body: None,
        }),
        Err(e) => {
            eprintln!("Failed to fetch order {}: {:?}", id, e);
            HttpResponse::InternalServerError().json(GenericResponse::<()> {
                status: "error".to_string(),
                message: "Failed to fetch order".to_string(),
                body: None,
            })
        }
    }
}

/// Creates an order together with its line items.
///
/// All writes happen inside one transaction. Each submitted line item's
/// product id is resolved before insertion; items whose product does not
/// exist are dropped without error, so the saved order (and its total)
/// only covers the items that resolved.
#[post("/orders")]
pub async fn create_order(data: web::Data<AppState>, item: web::Json<NewOrder>) -> HttpResponse {
    let mut transaction = match data.db_pool.begin().await {
        Ok(tx) => tx,
        Err(e) => {
            eprintln!("Failed to begin transaction: {:?}", e);
            return HttpResponse::InternalServerError().json(GenericResponse::<()> {
                status: "error".to_string(),
                message: "Failed to create order".to_string(),
                body: None,
            });
        }
    };

    // 1. Insert the order row itself
    let order_row = query("INSERT INTO orders (cashier_id, paid_on_date) VALUES ($1, $2) RETURNING id")
        .bind(item.cashier_id)
        .bind(item.paid_on_date)
        .fetch_one(&mut *transaction)
        .await;

    let order_id = match order_row.and_then(|row| row.try_get::<i32, &str>("id")) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Failed to insert order: {:?}", e);
            let _ = transaction.rollback().await;
            let message = if e.to_string().contains("foreign key constraint") {
                "Failed to insert order: cashierId does not reference an existing cashier."
            } else {
                "Failed to insert order."
            };
            return HttpResponse::InternalServerError().json(GenericResponse::<()> {
                status: "error".to_string(),
                message: message.to_string(),
                body: None,
            });
        }
    };

    // 2. Resolve and insert each submitted line item
    for line in item.order_products.iter() {
        let product_result = query("SELECT id FROM products WHERE id = $1")
            .bind(line.product_id)
            .fetch_optional(&mut *transaction)
            .await;

        match product_result {
            // Unknown product id: drop the line item and keep going
            Ok(None) => continue,
            Ok(Some(_)) => {
                let insert_result = query(
                    "INSERT INTO order_products (order_id, product_id, quantity) VALUES ($1, $2, $3)",
                )
                .bind(order_id)
                .bind(line.product_id)
                .bind(line.quantity)
                .execute(&mut *transaction)
                .await;

                if let Err(e) = insert_result {
                    eprintln!("Failed to insert line item for order {}: {:?}", order_id, e);
                    let _ = transaction.rollback().await;
                    return HttpResponse::InternalServerError().json(GenericResponse::<()> {
                        status: "error".to_string(),
                        message: "Failed to insert order line item".to_string(),
                        body: None,
                    });
                }
            }
            Err(e) => {
                eprintln!("Failed to resolve product {}: {:?}", line.product_id, e);
                let _ = transaction.rollback().await;
                return HttpResponse::InternalServerError().json(GenericResponse::<()> {
                    status: "error".to_string(),
                    message: "Failed to resolve order line item product".to_string(),
                    body: None,
                });
            }
        }
    }

    if let Err(e) = transaction.commit().await {
        eprintln!("Failed to commit order {}: {:?}", order_id, e);
        return HttpResponse::InternalServerError().json(GenericResponse::<()> {
            status: "error".to_string(),
            message: "Failed to save order".to_string(),
            body: None,
        });
    }

    // 3. Reload the saved order with related rows and project it
    let saved_result = query_as::<_, OrderRecord>(&format!("{} WHERE o.id = $1", SELECT_ORDERS))
        .bind(order_id)
        .fetch_one(&data.db_pool)
        .await;

    match saved_result {
        Ok(saved) => match load_order_lines(&data.db_pool, order_id).await {
            Ok(lines) => HttpResponse::Created()
                .insert_header(("Location", format!("/orders/{}", order_id)))
                .json(OrderDto::from_record(&saved, &lines)),
            Err(e) => {
                eprintln!("Failed to reload line items for order {}: {:?}", order_id, e);
                HttpResponse::InternalServerError().json(GenericResponse::<()> {
                    status: "error".to_string(),
                    message: "Order saved but could not be reloaded".to_string(),
                    body: None,
                })
            }
        },
        Err(e) => {
            eprintln!("Failed to reload order {}: {:?}", order_id, e);
            HttpResponse::InternalServerError().json(GenericResponse::<()> {
                status: "error".to_string(),
                message: "Order saved but could not be reloaded".to_string(),
                body: None,
            })
        }
    }
}

/// Deletes an order and its line items together.
#[delete("/orders/{id}")]
pub async fn delete_order(data: web::Data<AppState>, path: web::Path<i32>) -> HttpResponse {
    let id = path.into_inner();

    let mut transaction = match data.db_pool.begin().await {
        Ok(tx) => tx,
        Err(e) => {
            eprintln!("Failed to begin transaction: {:?}", e);
            return HttpResponse::InternalServerError().json(GenericResponse::<()> {
                status: "error".to_string(),
                message: "Failed to delete order".to_string(),
                body: None,
            });
        }
    };

    // Line items go first; the schema also cascades as a backstop
    let lines_result = query("DELETE FROM order_products WHERE order_id = $1")
        .bind(id)
        .execute(&mut *transaction)
        .await;

    if let Err(e) = lines_result {
        eprintln!("Failed to delete line items of order {}: {:?}", id, e);
        let _ = transaction.rollback().await;
        return HttpResponse::InternalServerError().json(GenericResponse::<()> {
            status: "error".to_string(),
            message: "Failed to delete order line items".to_string(),
            body: None,
        });
    }

    let order_result = query("DELETE FROM orders WHERE id = $1")
        .bind(id)
        .execute(&mut *transaction)
        .await;

    match order_result {
        Ok(res) if res.rows_affected() > 0 => {
            if let Err(e) = transaction.commit().await {
                eprintln!("Failed to commit deletion of order {}: {:?}", id, e);
                return HttpResponse::InternalServerError().json(GenericResponse::<()> {
                    status: "error".to_string(),
                    message: "Failed to delete order".to_string(),
                    body: None,
                });
            }
            HttpResponse::NoContent().finish()
        }
        Ok(_) => {
            let _ = transaction.rollback().await;
            HttpResponse::NotFound().json(GenericResponse::<()> {
                status: "error".to_string(),
                message: format!("Order with id {} not found.", id),
                body: None,
            })
        }
        Err(e) => {
            eprintln!("Failed to delete order {}: {:?}", id, e);
            let _ = transaction.rollback().await;
            HttpResponse::InternalServerError().json(GenericResponse::<()> {
                status: "error".to_string(),
                message: "Failed to delete order".to_string(),
                body: None,
            })
        }
    }
}
