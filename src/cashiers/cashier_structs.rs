// src/cashiers/cashier_structs.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Imports OrderDto for the nested orders in the cashier detail response.
// 'crate::' refers to the top level of this crate (cornerstore).
use crate::orders::order_structs::OrderDto;

/// Payload for creating a cashier via POST.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCashier {
    pub first_name: String,
    pub last_name: String,
}

/// A cashier row as stored in the database.
#[derive(FromRow)]
pub struct Cashier {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

/// Concatenation rule shared by every cashier name projection:
/// first name, a single space, last name.
pub fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name, last_name)
}

/// Flattened cashier for API responses. Instead of the full orders list
/// it carries just the count.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashierDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub order_count: usize,
}

impl CashierDto {
    pub fn from_cashier(cashier: &Cashier, order_count: usize) -> CashierDto {
        CashierDto {
            id: cashier.id,
            first_name: cashier.first_name.clone(),
            last_name: cashier.last_name.clone(),
            full_name: full_name(&cashier.first_name, &cashier.last_name),
            order_count,
        }
    }
}

/// Cashier detail response: the flattened cashier plus its orders, each
/// already projected, so the serialized shape has no reference cycles.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashierDetail {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub order_count: usize,
    pub orders: Vec<OrderDto>,
}

impl CashierDetail {
    pub fn from_cashier(cashier: &Cashier, orders: Vec<OrderDto>) -> CashierDetail {
        CashierDetail {
            id: cashier.id,
            first_name: cashier.first_name.clone(),
            last_name: cashier.last_name.clone(),
            full_name: full_name(&cashier.first_name, &cashier.last_name),
            order_count: orders.len(),
            orders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::order_structs::OrderRecord;
    use chrono::NaiveDate;

    fn amy() -> Cashier {
        Cashier {
            id: 7,
            first_name: "Amy".to_string(),
            last_name: "Simpson".to_string(),
        }
    }

    fn order(id: i32) -> OrderDto {
        let record = OrderRecord {
            id,
            cashier_id: 7,
            paid_on_date: NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            cashier_first_name: Some("Amy".to_string()),
            cashier_last_name: Some("Simpson".to_string()),
        };
        OrderDto::from_record(&record, &[])
    }

    #[test]
    fn full_name_joins_with_a_single_space() {
        assert_eq!(full_name("Amy", "Simpson"), "Amy Simpson");
        assert_eq!(full_name("", ""), " ");
    }

    #[test]
    fn dto_carries_full_name_and_order_count() {
        let dto = CashierDto::from_cashier(&amy(), 2);
        assert_eq!(dto.full_name, "Amy Simpson");
        assert_eq!(dto.order_count, 2);
    }

    #[test]
    fn detail_counts_its_nested_orders() {
        let detail = CashierDetail::from_cashier(&amy(), vec![order(1), order(2)]);
        assert_eq!(detail.full_name, "Amy Simpson");
        assert_eq!(detail.order_count, 2);
        assert_eq!(detail.orders.len(), 2);

        let value = serde_json::to_value(&detail).unwrap();
        assert!(value.get("fullName").is_some());
        assert!(value.get("orderCount").is_some());
    }

    #[test]
    fn empty_orders_mean_a_count_of_zero() {
        let detail = CashierDetail::from_cashier(&amy(), Vec::new());
        assert_eq!(detail.order_count, 0);
    }
}
