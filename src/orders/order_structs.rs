// src/orders/order_structs.rs

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One submitted line item: a product reference and a quantity.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub product_id: i32,
    pub quantity: i32,
}

/// Payload for creating an order via POST.
/// A missing or null orderProducts list is treated as empty.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub cashier_id: i32,
    pub paid_on_date: NaiveDateTime,
    #[serde(default)]
    pub order_products: Vec<NewOrderItem>,
}

/// An order row joined with its cashier. The cashier name columns come
/// from a LEFT JOIN, so a dangling reference still produces a row.
#[derive(FromRow)]
pub struct OrderRecord {
    pub id: i32,
    pub cashier_id: i32,
    pub paid_on_date: NaiveDateTime,
    pub cashier_first_name: Option<String>,
    pub cashier_last_name: Option<String>,
}

/// A persisted line item joined with its product. The product columns come
/// from a LEFT JOIN, so a line whose product no longer resolves carries
/// None and contributes nothing to the order total.
#[derive(FromRow)]
pub struct OrderLine {
    pub product_id: i32,
    pub quantity: i32,
    pub product_name: Option<String>,
    pub brand: Option<String>,
    pub price: Option<BigDecimal>,
}

/// Computes an order's total from its current line items.
///
/// Lines without a resolved product are skipped. An empty slice yields
/// exactly 0. The total is always derived from current prices, never
/// stored.
pub fn order_total(lines: &[OrderLine]) -> BigDecimal {
    let mut total = BigDecimal::from(0);
    for line in lines {
        if let Some(price) = &line.price {
            total += price * &BigDecimal::from(line.quantity);
        }
    }
    total
}

/// Applies the orderDate query filter. The raw value is parsed as an ISO
/// calendar date; if it does not parse, the list is returned unfiltered.
pub fn filter_by_date(orders: Vec<OrderRecord>, raw: &str) -> Vec<OrderRecord> {
    match raw.parse::<NaiveDate>() {
        Ok(date) => orders
            .into_iter()
            .filter(|o| o.paid_on_date.date() == date)
            .collect(),
        Err(_) => orders,
    }
}

/// Flattened line item for API responses: product details plus a
/// precomputed subtotal so the client does not have to multiply.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderProductDto {
    pub product_name: Option<String>,
    pub brand: Option<String>,
    pub price: BigDecimal,
    pub quantity: i32,
    pub subtotal: BigDecimal,
}

impl OrderProductDto {
    pub fn from_line(line: &OrderLine) -> OrderProductDto {
        // An unresolved product counts as price 0
        let price = line.price.clone().unwrap_or_else(|| BigDecimal::from(0));
        let subtotal = &price * &BigDecimal::from(line.quantity);
        OrderProductDto {
            product_name: line.product_name.clone(),
            brand: line.brand.clone(),
            price,
            quantity: line.quantity,
            subtotal,
        }
    }
}

/// Flattened order for API responses. The cashier back-reference is kept
/// as an id plus a display name, never as a nested cashier object, so the
/// serialized shape is cycle-free.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: i32,
    pub cashier_id: i32,
    pub cashier_name: String,
    pub paid_on_date: NaiveDateTime,
    pub order_products: Vec<OrderProductDto>,
    pub total: BigDecimal,
}

impl OrderDto {
    /// Projects an order row and its line items into the response shape.
    /// Read-only: neither input is modified.
    pub fn from_record(record: &OrderRecord, lines: &[OrderLine]) -> OrderDto {
        OrderDto {
            id: record.id,
            cashier_id: record.cashier_id,
            // An unresolved cashier yields a name of " " (lone space),
            // matching the longstanding behavior of this API
            cashier_name: format!(
                "{} {}",
                record.cashier_first_name.as_deref().unwrap_or(""),
                record.cashier_last_name.as_deref().unwrap_or("")
            ),
            paid_on_date: record.paid_on_date,
            order_products: lines.iter().map(OrderProductDto::from_line).collect(),
            total: order_total(lines),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn line(name: &str, brand: &str, price: &str, quantity: i32) -> OrderLine {
        OrderLine {
            product_id: 1,
            quantity,
            product_name: Some(name.to_string()),
            brand: Some(brand.to_string()),
            price: Some(BigDecimal::from_str(price).unwrap()),
        }
    }

    fn unresolved_line(quantity: i32) -> OrderLine {
        OrderLine {
            product_id: 99,
            quantity,
            product_name: None,
            brand: None,
            price: None,
        }
    }

    fn record_at(day: u32, hour: u32) -> OrderRecord {
        OrderRecord {
            id: 1,
            cashier_id: 1,
            paid_on_date: NaiveDate::from_ymd_opt(2024, 3, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            cashier_first_name: Some("Amy".to_string()),
            cashier_last_name: Some("Simpson".to_string()),
        }
    }

    #[test]
    fn total_sums_price_times_quantity() {
        let lines = vec![line("Tuna", "StarKist", "1.25", 2), line("Toilet Paper", "Charmin", "5.00", 1)];
        assert_eq!(order_total(&lines), BigDecimal::from_str("7.50").unwrap());
    }

    #[test]
    fn total_of_no_lines_is_zero() {
        assert_eq!(order_total(&[]), BigDecimal::from(0));
    }

    #[test]
    fn unresolved_products_contribute_zero() {
        let lines = vec![unresolved_line(3), line("Tuna", "StarKist", "1.25", 2)];
        assert_eq!(order_total(&lines), BigDecimal::from_str("2.50").unwrap());

        let all_unresolved = vec![unresolved_line(3), unresolved_line(1)];
        assert_eq!(order_total(&all_unresolved), BigDecimal::from(0));
    }

    #[test]
    fn line_dto_carries_subtotal() {
        let dto = OrderProductDto::from_line(&line("Tuna", "StarKist", "1.25", 2));
        assert_eq!(dto.price, BigDecimal::from_str("1.25").unwrap());
        assert_eq!(dto.subtotal, BigDecimal::from_str("2.50").unwrap());
        assert_eq!(dto.quantity, 2);
    }

    #[test]
    fn unresolved_line_dto_has_zero_price_and_subtotal() {
        let dto = OrderProductDto::from_line(&unresolved_line(4));
        assert_eq!(dto.product_name, None);
        assert_eq!(dto.price, BigDecimal::from(0));
        assert_eq!(dto.subtotal, BigDecimal::from(0));
    }

    #[test]
    fn order_dto_subtotals_add_up_to_total() {
        let lines = vec![line("Tuna", "StarKist", "1.25", 2), line("Toilet Paper", "Charmin", "5.00", 1)];
        let dto = OrderDto::from_record(&record_at(15, 10), &lines);

        assert_eq!(dto.cashier_name, "Amy Simpson");
        assert_eq!(dto.total, BigDecimal::from_str("7.50").unwrap());

        let mut sum = BigDecimal::from(0);
        for item in &dto.order_products {
            sum += item.subtotal.clone();
        }
        assert_eq!(sum, dto.total);
    }

    #[test]
    fn unresolved_cashier_projects_a_lone_space() {
        let record = OrderRecord {
            cashier_first_name: None,
            cashier_last_name: None,
            ..record_at(15, 10)
        };
        let dto = OrderDto::from_record(&record, &[]);
        assert_eq!(dto.cashier_name, " ");
    }

    #[test]
    fn date_filter_keeps_matching_calendar_day_only() {
        let orders = vec![record_at(15, 9), record_at(15, 22), record_at(16, 9)];
        let filtered = filter_by_date(orders, "2024-03-15");
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|o| o.paid_on_date.date()
            == NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));
    }

    #[test]
    fn unparseable_date_leaves_the_list_unfiltered() {
        let orders = vec![record_at(15, 9), record_at(16, 9)];
        let filtered = filter_by_date(orders, "not-a-date");
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn order_dto_serializes_with_camel_case_keys() {
        let dto = OrderDto::from_record(&record_at(15, 10), &[line("Tuna", "StarKist", "1.25", 2)]);
        let value = serde_json::to_value(&dto).unwrap();

        assert!(value.get("cashierId").is_some());
        assert!(value.get("cashierName").is_some());
        assert!(value.get("paidOnDate").is_some());
        let items = value.get("orderProducts").unwrap().as_array().unwrap();
        assert!(items[0].get("productName").is_some());
        assert!(items[0].get("subtotal").is_some());
    }

    #[test]
    fn new_order_defaults_to_an_empty_item_list() {
        let order: NewOrder = serde_json::from_str(
            r#"{"cashierId": 1, "paidOnDate": "2024-03-15T10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(order.cashier_id, 1);
        assert!(order.order_products.is_empty());
    }
}
