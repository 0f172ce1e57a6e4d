//! Domain Services
//!
//! Pricing logic shared by order creation and updates.

use crate::domain::entities::ItemSnapshot;

/// Order total: sum of `item_price` over the ordered items
///
/// Starts from `+0.0`, so an empty order totals `0.0` rather than `-0.0`.
pub fn total_price(items: &[ItemSnapshot]) -> f64 {
    items.iter().fold(0.0, |acc, item| acc + item.item_price)
}

/// Order total, or `None` when a price or the sum is not a finite number
///
/// JSON has no representation for `inf`/`NaN`; such a total would be
/// stored as `null`.
pub fn checked_total_price(items: &[ItemSnapshot]) -> Option<f64> {
    if !items.iter().all(|item| is_valid_price(item.item_price)) {
        return None;
    }
    Some(total_price(items)).filter(|total| total.is_finite())
}

pub fn is_valid_price(price: f64) -> bool {
    price.is_finite()
}
