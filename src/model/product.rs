//! Product records as served by the inventory service, and the edit built on top of them.
//!
//! # Session data
//! The record itself mirrors the server schema. The address it was fetched from is not
//! part of that schema, so it travels next to the record in [`ScannedProduct`] instead.
//!
//! See [`PendingEdit`] for the local, not-yet-committed quantity change and
//! [`StockUpdate`] for the write that persists it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use std::fmt::Display;

use super::UserId;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// A product record in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    pub stock_quantity: u32,
    /// Fields this application does not interpret; sent back untouched on update.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Server-assigned identifier
    /// * `name` - Product name
    /// * `stock_quantity` - Units currently in stock
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, stock_quantity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price: None,
            stock_quantity,
            extra: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A product resolved from a scan, together with the endpoint it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedProduct {
    pub record: Product,
    pub source_endpoint: Url,
}

impl ScannedProduct {
    pub fn new(record: Product, source_endpoint: Url) -> Self {
        Self {
            record,
            source_endpoint,
        }
    }
}

/// The single in-progress quantity change of a session.
///
/// The draft quantity is unsigned, so a negative value can never reach a commit.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEdit {
    pub target: ScannedProduct,
    pub draft_quantity: u32,
}

impl PendingEdit {
    /// Starts an edit with the draft set to the product's current stock.
    pub fn new(target: ScannedProduct) -> Self {
        let draft_quantity = target.record.stock_quantity;
        Self {
            target,
            draft_quantity,
        }
    }

    pub fn decrement(&mut self) {
        self.draft_quantity = self.draft_quantity.saturating_sub(1);
    }

    pub fn increment(&mut self) {
        self.draft_quantity = self.draft_quantity.saturating_add(1);
    }

    /// Applies direct text entry.
    ///
    /// Empty text sets the draft to zero. Anything that is not a non-negative integer is
    /// rejected and leaves the draft unchanged. Returns whether the draft was accepted.
    pub fn enter(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            self.draft_quantity = 0;
            return true;
        }
        if !text.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        match text.parse::<u32>() {
            Ok(quantity) => {
                self.draft_quantity = quantity;
                true
            }
            Err(_) => false,
        }
    }

    /// Builds the write request for this edit.
    pub fn to_update(&self, acting_user: Option<UserId>) -> StockUpdate {
        let mut product = self.target.record.clone();
        product.stock_quantity = self.draft_quantity;
        StockUpdate {
            endpoint: self.target.source_endpoint.clone(),
            product,
            acting_user,
        }
    }
}

/// A commit request: the full product record with its new stock quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct StockUpdate {
    pub endpoint: Url,
    pub product: Product,
    pub acting_user: Option<UserId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn bolt_edit(quantity: u32) -> PendingEdit {
        let endpoint = Url::parse("http://10.0.0.5/api/products/7").unwrap();
        PendingEdit::new(ScannedProduct::new(Product::new(7, "Bolt", quantity), endpoint))
    }

    #[test]
    fn test_minimal_product_json() {
        let product: Product =
            serde_json::from_str(r#"{"id":7,"name":"Bolt","stockQuantity":42}"#).unwrap();
        assert_eq!(product.id, ProductId(7));
        assert_eq!(product.stock_quantity, 42);
        assert_eq!(product.price, None);
        assert!(product.extra.is_empty());
    }

    #[test]
    fn test_product_json_keeps_unknown_fields_and_omits_absent_ones() {
        let json = r#"{
            "id": 3,
            "name": "Nut",
            "description": "M8 hex nut",
            "price": 12.5,
            "stockQuantity": 100,
            "warehouse": "B-2"
        }"#;
        let mut product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Some(Decimal::from_str("12.5").unwrap()));
        assert_eq!(product.extra.get("warehouse"), Some(&Value::from("B-2")));

        product.stock_quantity = 90;
        product.description = None;
        let body = serde_json::to_value(&product).unwrap();
        assert_eq!(body["stockQuantity"], 90);
        assert_eq!(body["price"], 12.5);
        assert_eq!(body["warehouse"], "B-2");
        assert!(body.get("description").is_none());
    }

    #[test]
    fn test_negative_stock_is_a_decode_failure() {
        let json = r#"{"id":7,"name":"Bolt","stockQuantity":-1}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_edit_sequence_from_review_screen() {
        let mut edit = bolt_edit(42);
        for _ in 0..5 {
            edit.decrement();
        }
        assert_eq!(edit.draft_quantity, 37);

        assert!(!edit.enter("abc"));
        assert_eq!(edit.draft_quantity, 37);

        assert!(edit.enter(""));
        assert_eq!(edit.draft_quantity, 0);
    }

    #[test]
    fn test_draft_never_goes_below_zero() {
        let mut edit = bolt_edit(1);
        edit.decrement();
        edit.decrement();
        edit.decrement();
        assert_eq!(edit.draft_quantity, 0);
        edit.increment();
        assert_eq!(edit.draft_quantity, 1);
    }

    #[test]
    fn test_entry_rejects_signs_fractions_and_partial_numbers() {
        let mut edit = bolt_edit(5);
        for text in ["-3", "+3", "2.5", "12abc", "1e3", "99999999999"] {
            assert!(!edit.enter(text), "{text} should be rejected");
            assert_eq!(edit.draft_quantity, 5);
        }
        assert!(edit.enter(" 12 "));
        assert_eq!(edit.draft_quantity, 12);
    }

    #[test]
    fn test_update_carries_draft_and_endpoint() {
        let mut edit = bolt_edit(42);
        edit.enter("10");

        let update = edit.to_update(Some(UserId(4)));
        assert_eq!(update.endpoint.as_str(), "http://10.0.0.5/api/products/7");
        assert_eq!(update.product.stock_quantity, 10);
        assert_eq!(update.product.name, "Bolt");
        assert_eq!(update.acting_user, Some(UserId(4)));
        // the edit itself still knows the server's quantity
        assert_eq!(edit.target.record.stock_quantity, 42);
    }
}
