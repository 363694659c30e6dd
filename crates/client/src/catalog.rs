//! Catalog cache: the last fetched product list and filtered views over it.

use tracing::{debug, instrument};

use marketplace_core::ProductId;

use crate::api::types::Product;
use crate::api::{ApiClient, ApiError};

/// Holds the last successfully fetched product list.
///
/// The cache is replaced wholesale on a successful load; a failed load leaves
/// the previous contents (possibly empty) intact, so the rest of the client
/// stays usable with a stale or empty catalog.
#[derive(Debug, Default)]
pub struct CatalogCache {
    products: Vec<Product>,
}

impl CatalogCache {
    /// Create an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Fetch the full product list and replace the cache atomically.
    ///
    /// # Errors
    ///
    /// Returns the fetch error and leaves the previous cache untouched.
    #[instrument(skip_all)]
    pub async fn load(&mut self, api: &ApiClient) -> Result<(), ApiError> {
        let products = api.get_products().await?;
        debug!(count = products.len(), "catalog replaced");
        self.products = products;
        Ok(())
    }

    /// Products whose name contains `query` as a case-insensitive substring,
    /// preserving catalog order. An empty or whitespace query returns all
    /// products.
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<&Product> {
        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return self.products.iter().collect();
        }
        self.products
            .iter()
            .filter(|product| product.name.to_lowercase().contains(&term))
            .collect()
    }

    /// Look up a cached product by ID.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// All cached products, in service order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of cached products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the cache is empty (never loaded, or the catalog is empty).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use marketplace_core::{Price, ProductId};

    fn cache_with(names: &[&str]) -> CatalogCache {
        let products = names
            .iter()
            .enumerate()
            .map(|(i, name)| Product {
                id: ProductId::new(i64::try_from(i).unwrap() + 1),
                name: (*name).to_string(),
                price: Price::from_cents(1000),
                description: None,
                image_url: None,
            })
            .collect();
        CatalogCache { products }
    }

    #[test]
    fn test_filter_case_insensitive_substring_preserves_order() {
        let cache = cache_with(&["Mouse", "Monitor", "Keyboard"]);
        let hits = cache.filter("mo");
        let names: Vec<_> = hits.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Mouse", "Monitor"]);
    }

    #[test]
    fn test_filter_matches_anywhere_in_name() {
        let cache = cache_with(&["Gaming Mouse", "Keyboard"]);
        let hits = cache.filter("MOUSE");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Gaming Mouse");
    }

    #[test]
    fn test_empty_and_whitespace_query_return_all() {
        let cache = cache_with(&["Mouse", "Monitor", "Keyboard"]);
        assert_eq!(cache.filter("").len(), 3);
        assert_eq!(cache.filter("   ").len(), 3);
    }

    #[test]
    fn test_filter_no_matches() {
        let cache = cache_with(&["Mouse", "Keyboard"]);
        assert!(cache.filter("webcam").is_empty());
    }

    #[test]
    fn test_find_by_id() {
        let cache = cache_with(&["Mouse", "Keyboard"]);
        assert_eq!(cache.find(ProductId::new(2)).unwrap().name, "Keyboard");
        assert!(cache.find(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache = CatalogCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
        assert!(cache.filter("anything").is_empty());
    }
}
