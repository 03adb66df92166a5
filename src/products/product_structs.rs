// src/products/product_structs.rs

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Imports Category for the full category reference kept on the DTO
use crate::categories::category_structs::Category;

/// Payload for creating a product via POST.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub brand: String,
    pub price: BigDecimal,
    pub category_id: i32,
}

/// Payload for updating a product via PUT. Carries its own id, which must
/// match the path id.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    pub id: i32,
    pub name: String,
    pub brand: String,
    pub price: BigDecimal,
    pub category_id: i32,
}

/// A product row joined with its category name. The category column comes
/// from a LEFT JOIN, so an unresolved category reads as None.
#[derive(FromRow)]
pub struct ProductRecord {
    pub id: i32,
    pub name: String,
    pub brand: String,
    pub price: BigDecimal,
    pub category_id: i32,
    pub category_name: Option<String>,
}

/// Filters products by a case-insensitive search term over the product
/// name, the brand, and the linked category's name. An empty term returns
/// the list unchanged, keeping its original order.
pub fn filter_by_search(products: Vec<ProductRecord>, search: &str) -> Vec<ProductRecord> {
    if search.is_empty() {
        return products;
    }
    let search = search.to_lowercase();
    products
        .into_iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&search)
                || p.brand.to_lowercase().contains(&search)
                || p.category_name
                    .as_deref()
                    .map(|c| c.to_lowercase().contains(&search))
                    .unwrap_or(false)
        })
        .collect()
}

/// Flattened product for API responses. Keeps both the full category
/// reference and the denormalized name for client flexibility.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub brand: String,
    pub price: BigDecimal,
    pub category_id: i32,
    pub category: Option<Category>,
    pub category_name: Option<String>,
}

impl ProductDto {
    pub fn from_record(record: ProductRecord) -> ProductDto {
        ProductDto {
            id: record.id,
            name: record.name,
            brand: record.brand,
            price: record.price,
            category_id: record.category_id,
            category: record.category_name.clone().map(|name| Category {
                id: record.category_id,
                name,
            }),
            category_name: record.category_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn product(id: i32, name: &str, brand: &str, category: &str) -> ProductRecord {
        ProductRecord {
            id,
            name: name.to_string(),
            brand: brand.to_string(),
            price: BigDecimal::from_str("2.99").unwrap(),
            category_id: 1,
            category_name: Some(category.to_string()),
        }
    }

    fn sample() -> Vec<ProductRecord> {
        vec![
            product(1, "Tuna", "StarKist", "Canned Goods"),
            product(2, "Sponge", "Scotch-Brite", "Cleaning"),
            product(3, "Cola", "CleanCola", "Beverages"),
        ]
    }

    #[test]
    fn empty_term_returns_the_list_unchanged() {
        let filtered = filter_by_search(sample(), "");
        let ids: Vec<i32> = filtered.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn term_matches_name_brand_or_category_case_insensitively() {
        // "clean" hits the Cleaning category of the sponge and the
        // CleanCola brand, but not the tuna
        let filtered = filter_by_search(sample(), "clean");
        let ids: Vec<i32> = filtered.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);

        let by_name = filter_by_search(sample(), "TUNA");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, 1);
    }

    #[test]
    fn unmatched_term_filters_everything_out() {
        assert!(filter_by_search(sample(), "motor oil").is_empty());
    }

    #[test]
    fn missing_category_only_matches_on_name_and_brand() {
        let mut record = product(4, "Mystery Snack", "Acme", "unused");
        record.category_name = None;
        let filtered = filter_by_search(vec![record], "acme");
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn dto_keeps_category_reference_and_denormalized_name() {
        let dto = ProductDto::from_record(product(1, "Tuna", "StarKist", "Canned Goods"));
        assert_eq!(dto.category_name.as_deref(), Some("Canned Goods"));
        let category = dto.category.as_ref().unwrap();
        assert_eq!(category.id, dto.category_id);
        assert_eq!(category.name, "Canned Goods");

        let value = serde_json::to_value(&dto).unwrap();
        assert!(value.get("categoryId").is_some());
        assert!(value.get("categoryName").is_some());
        assert!(value.get("category").is_some());
    }

    #[test]
    fn dto_for_an_unresolved_category_has_no_reference() {
        let mut record = product(5, "Tuna", "StarKist", "unused");
        record.category_name = None;
        let dto = ProductDto::from_record(record);
        assert!(dto.category.is_none());
        assert!(dto.category_name.is_none());
    }
}
