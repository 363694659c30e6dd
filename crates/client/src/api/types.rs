//! Wire types for the marketplace service.
//!
//! Field names follow the service's JSON (camelCase). These types mirror the
//! contract exactly; client-side domain state (cart lines, sessions) lives in
//! its own modules.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use marketplace_core::{Email, OrderId, Price, ProductId, UserId};

/// A purchasable product, as returned by `GET /products`.
///
/// Immutable once fetched; the catalog is replaced wholesale on re-fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Service-assigned product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Optional long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Payload for `POST /products` (admin catalog mutation).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Optional long description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A past order, as returned by `GET /orders/user/{userId}`.
///
/// Created server-side; the client only ever reads orders back.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Service-assigned order ID.
    pub id: OrderId,
    /// Owning user.
    pub user_id: UserId,
    /// Human-readable summary of purchased item names.
    pub product_names: String,
    /// Total price at submission time.
    pub total_price: Price,
    /// Creation timestamp (service-local, no offset).
    pub order_date: NaiveDateTime,
}

/// Account payload returned by the auth endpoints.
///
/// The service returns the stored account record; `isAdmin` is the optional
/// capability flag — older deployments omit it, in which case the client
/// falls back to the configured administrator email.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPayload {
    /// Service-assigned user ID.
    pub id: UserId,
    /// Display name.
    pub username: String,
    /// Account email.
    pub email: Email,
    /// Admin capability flag, when the service provides one.
    #[serde(default)]
    pub is_admin: Option<bool>,
}

/// Payload for `POST /orders/checkout`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// User placing the order.
    pub user_id: UserId,
    /// Item names joined with `", "`, preserving cart order and duplicates.
    pub product_names: String,
    /// Cart total, computed the same way as the ledger's `total()`.
    pub total_price: Price,
}

/// Body for `POST /auth/login`.
#[derive(Serialize)]
pub(crate) struct LoginBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body for `POST /auth/register`.
#[derive(Serialize)]
pub(crate) struct RegisterBody<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_decodes_service_json() {
        let json = r#"{
            "id": 3,
            "name": "Mouse",
            "price": 20.0,
            "description": "A mouse",
            "imageUrl": "https://cdn.example.com/mouse.png"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.name, "Mouse");
        assert_eq!(product.price, Price::from_cents(2000));
        assert_eq!(product.image_url.as_deref(), Some("https://cdn.example.com/mouse.png"));
    }

    #[test]
    fn test_product_tolerates_missing_optionals() {
        let json = r#"{"id": 1, "name": "Keyboard", "price": 50}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.description.is_none());
        assert!(product.image_url.is_none());
    }

    #[test]
    fn test_order_decodes_service_json() {
        let json = r#"{
            "id": 9,
            "userId": 5,
            "productNames": "Mouse, Mouse, Keyboard",
            "totalPrice": 90.0,
            "orderDate": "2026-08-30T12:34:56"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.user_id, UserId::new(5));
        assert_eq!(order.product_names, "Mouse, Mouse, Keyboard");
        assert_eq!(order.total_price, Price::from_cents(9000));
    }

    #[test]
    fn test_account_payload_without_capability_flag() {
        let json = r#"{"id": 5, "username": "mike", "email": "mike@example.com"}"#;
        let account: AccountPayload = serde_json::from_str(json).unwrap();
        assert!(account.is_admin.is_none());
    }

    #[test]
    fn test_checkout_request_wire_fields() {
        let request = CheckoutRequest {
            user_id: UserId::new(5),
            product_names: "Mouse, Keyboard".to_string(),
            total_price: Price::from_cents(7000),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["userId"], 5);
        assert_eq!(value["productNames"], "Mouse, Keyboard");
        assert_eq!(value["totalPrice"], 70.0);
    }
}
