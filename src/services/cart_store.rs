use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::{
    cart::{CartLine, CartSnapshot},
    catalog::Catalog,
    payment::Receipt,
    product::{Product, ProductId},
};

/// A catalog plus the shopping cart built from it.
///
/// The cart holds catalog positions in the order products were first added.
/// A product is in the cart exactly when its `quantity_in_cart` is positive.
/// Operations on unknown ids are silent no-ops.
#[derive(Debug, Clone)]
pub struct CartStore {
    catalog: Catalog,
    cart: Vec<usize>,
    pending_payment: Decimal,
    last_receipt: Option<Receipt>,
}

impl CartStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            cart: Vec::new(),
            pending_payment: Decimal::ZERO,
            last_receipt: None,
        }
    }

    pub fn find_product(&self, id: ProductId) -> Option<&Product> {
        self.catalog.position(id).map(|index| self.catalog.get(index))
    }

    pub fn add_to_cart(&mut self, id: ProductId) {
        let Some(index) = self.locate(id, "add") else {
            return;
        };

        let product = self.catalog.get_mut(index);
        product.quantity_in_cart = product.quantity_in_cart.saturating_add(1);
        debug!("Added product {} (quantity {})", id, product.quantity_in_cart);

        if !self.cart.contains(&index) {
            self.cart.push(index);
        }
    }

    pub fn increase_quantity(&mut self, id: ProductId) {
        self.add_to_cart(id);
    }

    pub fn decrease_quantity(&mut self, id: ProductId) {
        let Some(index) = self.locate(id, "decrease") else {
            return;
        };

        let product = self.catalog.get_mut(index);
        if product.quantity_in_cart == 0 {
            return;
        }

        product.quantity_in_cart -= 1;
        debug!("Decreased product {} (quantity {})", id, product.quantity_in_cart);

        if product.quantity_in_cart == 0 {
            self.cart.retain(|&entry| entry != index);
        }
    }

    pub fn remove_from_cart(&mut self, id: ProductId) {
        let Some(index) = self.locate(id, "remove") else {
            return;
        };

        self.catalog.get_mut(index).quantity_in_cart = 0;
        self.cart.retain(|&entry| entry != index);
        debug!("Removed product {} from cart", id);
    }

    pub fn cart_total(&self) -> Decimal {
        self.cart
            .iter()
            .map(|&index| self.catalog.get(index).subtotal())
            .fold(Decimal::ZERO, |total, subtotal| total.saturating_add(subtotal))
    }

    /// Clears the cart, resets every quantity to zero and drops any pending payment.
    pub fn empty_cart(&mut self) {
        self.cart.clear();
        for product in self.catalog.iter_mut() {
            product.quantity_in_cart = 0;
        }
        self.pending_payment = Decimal::ZERO;
        debug!("Cart emptied");
    }

    /// Tenders `amount` toward the cart total.
    ///
    /// Returns `pending - total`: negative is the balance still owed, zero is an
    /// exact payment, positive is change due. Once the result is non-negative the
    /// pending payment is reset.
    pub fn pay(&mut self, amount: Decimal) -> Decimal {
        self.pending_payment = self.pending_payment.saturating_add(amount);
        let total = self.cart_total();
        let remaining = self.pending_payment.saturating_sub(total);

        if remaining >= Decimal::ZERO {
            info!(
                "Payment complete: total {}, tendered {}, change {}",
                total, self.pending_payment, remaining
            );

            if !self.cart.is_empty() {
                self.last_receipt = Some(Receipt {
                    lines: self.cart_lines(),
                    total,
                    tendered: self.pending_payment,
                    change: remaining,
                    paid_at: Utc::now(),
                });
            }

            self.pending_payment = Decimal::ZERO;
        } else {
            debug!("Payment pending: {} still owed", remaining.abs());
        }

        remaining
    }

    pub fn catalog(&self) -> &[Product] {
        self.catalog.products()
    }

    pub fn cart_items(&self) -> Vec<&Product> {
        self.cart.iter().map(|&index| self.catalog.get(index)).collect()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.cart_items().iter().any(|product| product.id == id)
    }

    pub fn item_count(&self) -> u32 {
        self.cart_items()
            .iter()
            .map(|product| product.quantity_in_cart)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn pending_payment(&self) -> Decimal {
        self.pending_payment
    }

    pub fn last_receipt(&self) -> Option<&Receipt> {
        self.last_receipt.as_ref()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.cart_lines(),
            item_count: self.item_count(),
            total: self.cart_total(),
            pending_payment: self.pending_payment,
        }
    }

    fn cart_lines(&self) -> Vec<CartLine> {
        self.cart_items().into_iter().map(CartLine::from).collect()
    }

    fn locate(&self, id: ProductId, action: &str) -> Option<usize> {
        let index = self.catalog.position(id);
        if index.is_none() {
            debug!("Ignoring {} for unknown product {}", action, id);
        }
        index
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(Catalog::seed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_membership_matches_quantity(store: &CartStore) {
        for product in store.catalog() {
            let occurrences = store
                .cart_items()
                .iter()
                .filter(|item| item.id == product.id)
                .count();
            assert_eq!(occurrences, usize::from(product.is_in_cart()), "product {}", product.id);
        }
    }

    #[test]
    fn test_membership_tracks_quantity_through_mixed_operations() {
        let mut store = CartStore::default();

        store.add_to_cart(990);
        store.add_to_cart(991);
        store.increase_quantity(990);
        assert_membership_matches_quantity(&store);

        store.decrease_quantity(991);
        assert_membership_matches_quantity(&store);

        store.decrease_quantity(991);
        store.remove_from_cart(992);
        assert_membership_matches_quantity(&store);

        store.add_to_cart(992);
        store.empty_cart();
        assert_membership_matches_quantity(&store);
        assert!(store.catalog().iter().all(|product| product.quantity_in_cart == 0));
    }

    #[test]
    fn test_unknown_id_leaves_store_untouched() {
        let mut store = CartStore::default();
        store.add_to_cart(990);
        let before = store.snapshot();

        store.add_to_cart(1);
        store.increase_quantity(1);
        store.decrease_quantity(1);
        store.remove_from_cart(1);

        assert_eq!(store.snapshot(), before);
        assert!(store.find_product(1).is_none());
    }
}
