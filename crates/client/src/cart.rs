//! Cart ledger: an ordered multiset of product snapshots pending purchase.
//!
//! Lines are value copies taken at add-time — a later catalog re-fetch never
//! retroactively changes a line's name or price. The ledger is a sequence,
//! not a set: identical products occupy separate positions and removal is by
//! position, never by identity.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use marketplace_core::{Price, ProductId};

use crate::api::types::Product;

/// Delimiter used when joining line names into an order summary.
const SUMMARY_DELIMITER: &str = ", ";

/// A removal position that does not exist in the cart.
#[derive(Debug, Clone, Copy, Error)]
#[error("cart position {position} is out of range (cart has {len} lines)")]
pub struct PositionOutOfRange {
    /// The requested position.
    pub position: usize,
    /// Cart length at the time of the call.
    pub len: usize,
}

/// A product snapshot held in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product the snapshot was taken from.
    pub product_id: ProductId,
    /// Name at add-time.
    pub name: String,
    /// Price at add-time.
    pub price: Price,
}

impl From<&Product> for CartLine {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
        }
    }
}

/// Ordered sequence of cart lines.
///
/// Memory-only by design: the cart resets when the process restarts.
#[derive(Debug, Default)]
pub struct CartLedger {
    lines: Vec<CartLine>,
}

impl CartLedger {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append a snapshot of `product` to the end of the sequence.
    ///
    /// Always succeeds; duplicates get their own position.
    pub fn add(&mut self, product: &Product) {
        self.lines.push(CartLine::from(product));
    }

    /// Remove the line at `position`, returning it.
    ///
    /// Removes exactly one line; other occurrences of the same product are
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PositionOutOfRange`] (and leaves the cart unchanged) if
    /// `position` does not exist.
    pub fn remove_at(&mut self, position: usize) -> Result<CartLine, PositionOutOfRange> {
        if position >= self.lines.len() {
            return Err(PositionOutOfRange {
                position,
                len: self.lines.len(),
            });
        }
        Ok(self.lines.remove(position))
    }

    /// Sum of all line prices, recomputed on every call. Zero when empty.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(|line| line.price).sum()
    }

    /// Line names joined with `", "` in cart order, duplicates included.
    ///
    /// This is the order summary submitted at checkout.
    #[must_use]
    pub fn summary(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.name.as_str())
            .collect::<Vec<_>>()
            .join(SUMMARY_DELIMITER)
    }

    /// Empty the cart. Used only after a confirmed checkout.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The lines, in order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, cents: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Price::from_cents(cents),
            description: None,
            image_url: None,
        }
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = CartLedger::new();
        assert_eq!(cart.total(), Price::ZERO);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_snapshots_product_values() {
        let mut cart = CartLedger::new();
        let mouse = product(1, "Mouse", 2000);
        cart.add(&mouse);

        assert_eq!(cart.len(), 1);
        let line = &cart.lines()[0];
        assert_eq!(line.name, "Mouse");
        assert_eq!(line.price, Price::from_cents(2000));
        assert_eq!(line.product_id, ProductId::new(1));
    }

    #[test]
    fn test_duplicates_occupy_separate_positions() {
        let mut cart = CartLedger::new();
        let mouse = product(1, "Mouse", 2000);
        cart.add(&mouse);
        cart.add(&mouse);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), Price::from_cents(4000));
    }

    #[test]
    fn test_remove_at_removes_exactly_one_occurrence() {
        // cart = [Mouse 20, Mouse 20, Keyboard 50]; removeAt(0) leaves
        // [Mouse 20, Keyboard 50] with total 70
        let mut cart = CartLedger::new();
        let mouse = product(1, "Mouse", 2000);
        let keyboard = product(2, "Keyboard", 5000);
        cart.add(&mouse);
        cart.add(&mouse);
        cart.add(&keyboard);

        let removed = cart.remove_at(0).unwrap();
        assert_eq!(removed.name, "Mouse");
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.lines()[0].name, "Mouse");
        assert_eq!(cart.lines()[1].name, "Keyboard");
        assert_eq!(cart.total(), Price::from_cents(7000));
    }

    #[test]
    fn test_remove_at_out_of_range_is_reported_noop() {
        let mut cart = CartLedger::new();
        cart.add(&product(1, "Mouse", 2000));

        let err = cart.remove_at(1).unwrap_err();
        assert_eq!(err.position, 1);
        assert_eq!(err.len, 1);
        assert_eq!(cart.len(), 1);

        let mut empty = CartLedger::new();
        assert!(empty.remove_at(0).is_err());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_total_tracks_adds_and_removes() {
        let mut cart = CartLedger::new();
        let mouse = product(1, "Mouse", 2000);
        let keyboard = product(2, "Keyboard", 5000);

        cart.add(&mouse);
        cart.add(&keyboard);
        cart.add(&mouse);
        assert_eq!(cart.total(), Price::from_cents(9000));

        cart.remove_at(2).unwrap();
        assert_eq!(cart.total(), Price::from_cents(7000));
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_summary_preserves_order_and_duplicates() {
        let mut cart = CartLedger::new();
        cart.add(&product(1, "Mouse", 2000));
        cart.add(&product(1, "Mouse", 2000));
        cart.add(&product(2, "Keyboard", 5000));

        assert_eq!(cart.summary(), "Mouse, Mouse, Keyboard");
    }

    #[test]
    fn test_summary_empty_cart() {
        assert_eq!(CartLedger::new().summary(), "");
    }

    #[test]
    fn test_clear_empties_the_sequence() {
        let mut cart = CartLedger::new();
        cart.add(&product(1, "Mouse", 2000));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_snapshot_unaffected_by_later_product_changes() {
        let mut cart = CartLedger::new();
        let mut mouse = product(1, "Mouse", 2000);
        cart.add(&mouse);

        // Simulate a catalog re-fetch changing the price
        mouse.price = Price::from_cents(9999);
        assert_eq!(cart.lines()[0].price, Price::from_cents(2000));
    }
}
