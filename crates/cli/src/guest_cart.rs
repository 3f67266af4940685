//! Guest cart shadow.
//!
//! The client-held equivalent of the server cart for sessions with no token:
//! the same add/remove semantics, keyed by product id, persisted as one
//! serialized sequence under a well-known file. There is no server round-trip
//! here; the shadow is only ever reconciled with the server cart by the
//! explicit `cart merge` command.
//!
//! Note the item shape is parallel to the server's but not identical (`image`
//! rather than `imageUrl`); the merge replay bridges the two.

use std::io;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use atelier_core::ProductId;

/// A line item in the guest cart shadow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestCartItem {
    /// The product id.
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub quantity: u32,
}

/// The guest cart: an ordered item sequence with at most one item per
/// product.
#[derive(Debug, Default)]
pub struct GuestCart {
    items: Vec<GuestCartItem>,
}

impl GuestCart {
    /// Load the shadow from its file. A missing file is the empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> io::Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e),
        };

        let items: Vec<GuestCartItem> = serde_json::from_str(&raw).map_err(io::Error::other)?;
        Ok(Self { items })
    }

    /// Persist the shadow, creating the state directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&self.items).map_err(io::Error::other)?;
        std::fs::write(path, raw)
    }

    /// Delete the shadow file (after a successful merge). Missing file is ok.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(path: &Path) -> io::Result<()> {
        match std::fs::remove_file(path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    /// Add an item; a repeated product increments the existing quantity and
    /// keeps the original snapshot, mirroring the server cart.
    pub fn add(&mut self, item: GuestCartItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity += item.quantity;
        } else {
            self.items.push(item);
        }
    }

    /// Remove every item matching `id`; absent products are a no-op.
    pub fn remove(&mut self, id: ProductId) {
        self.items.retain(|i| i.id != id);
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the shadow holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[GuestCartItem] {
        &self.items
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn item(id: i32, name: &str, cents: i64, quantity: u32) -> GuestCartItem {
        GuestCartItem {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Decimal::new(cents, 2),
            image: format!("/images/{id}.jpg"),
            quantity,
        }
    }

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join("atelier-tests")
            .join(format!("{name}-{}.json", std::process::id()))
    }

    #[test]
    fn test_add_and_increment() {
        let mut cart = GuestCart::default();
        cart.add(item(1, "Silk scarf", 4999, 2));
        cart.add(item(1, "Silk scarf", 4999, 3));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items().first().unwrap().quantity, 5);
    }

    #[test]
    fn test_repeat_add_keeps_snapshot() {
        let mut cart = GuestCart::default();
        cart.add(item(1, "Silk scarf", 4999, 1));
        cart.add(item(1, "Silk scarf", 5999, 1));

        assert_eq!(cart.items().first().unwrap().price, Decimal::new(4999, 2));
    }

    #[test]
    fn test_remove_and_noop_remove() {
        let mut cart = GuestCart::default();
        cart.add(item(1, "Silk scarf", 4999, 1));
        cart.add(item(2, "Wool coat", 24900, 1));

        cart.remove(ProductId::new(1));
        assert_eq!(cart.len(), 1);

        cart.remove(ProductId::new(99));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let cart = GuestCart::load(Path::new("/nonexistent/guest_cart.json")).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let path = scratch_file("roundtrip");
        let mut cart = GuestCart::default();
        cart.add(item(1, "Silk scarf", 4999, 2));
        cart.add(item(2, "Wool coat", 24900, 1));
        cart.save(&path).unwrap();

        let loaded = GuestCart::load(&path).unwrap();
        assert_eq!(loaded.items(), cart.items());

        GuestCart::clear(&path).unwrap();
        assert!(GuestCart::load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_item_uses_image_field_name() {
        let json = serde_json::to_value(item(1, "Silk scarf", 4999, 1)).unwrap();
        assert!(json.get("image").is_some());
        assert!(json.get("imageUrl").is_none());
    }
}
