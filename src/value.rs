//! # Value Engine
//!
//! Freshness of an order as a fraction of its shelf life:
//!
//! ```text
//! raw        = shelf_life - age - decay_rate * age
//! normalized = raw / shelf_life
//! ```
//!
//! An order is wasted once `normalized <= 0`. Callers pass the decay rate already scaled by the
//! multiplier of the tier holding the order, and the age measured on that tier.

use crate::model::Order;

/// Normalized value of `order` after `age_secs` seconds at `decay_rate`.
///
/// A zero shelf life has no freshness to lose and is reported as `0.0` (wasted).
pub fn value(order: &Order, decay_rate: f64, age_secs: f64) -> f64 {
    let shelf_life = f64::from(order.shelf_life);
    if shelf_life <= 0.0 {
        return 0.0;
    }
    let raw = shelf_life - age_secs - decay_rate * age_secs;
    raw / shelf_life
}

pub fn is_wasted(value: f64) -> bool {
    value <= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Temperature;

    fn ramen() -> Order {
        Order::new("Ramen", Temperature::Hot, 500, 0.45)
    }

    #[test]
    fn test_fresh_order_has_full_value() {
        assert_eq!(value(&ramen(), 0.45, 0.0), 1.0);
    }

    #[test]
    fn test_value_strictly_decreases_with_positive_rate() {
        let order = ramen();
        let mut previous = value(&order, 0.45, 0.0);
        for age in 1..=400 {
            let current = value(&order, 0.45, f64::from(age));
            assert!(current < previous, "age {}: {} !< {}", age, current, previous);
            previous = current;
        }
    }

    #[test]
    fn test_zero_rate_loses_only_natural_age() {
        let order = Order::new("Salad", Temperature::Cold, 200, 0.0);
        assert_eq!(value(&order, 0.0, 50.0), 0.75);
        // The decay term adds nothing on top of aging.
        assert_eq!(
            value(&order, 0.0, 50.0),
            f64::from(order.shelf_life - 50) / f64::from(order.shelf_life)
        );
    }

    #[test]
    fn test_overflow_multiplier_wastes_sooner() {
        let order = ramen();
        let primary = value(&order, 0.45, 100.0);
        let overflow = value(&order, 0.45 * 2.0, 100.0);
        assert!(overflow < primary);
        assert!((primary - (500.0 - 100.0 - 45.0) / 500.0).abs() < 1e-12);
        assert!((overflow - (500.0 - 100.0 - 90.0) / 500.0).abs() < 1e-12);
    }

    #[test]
    fn test_wasted_at_zero_and_below() {
        let order = Order::new("Sorbet", Temperature::Frozen, 100, 1.0);
        // 100 - 50 - 50 = 0
        assert!(is_wasted(value(&order, 1.0, 50.0)));
        assert!(is_wasted(value(&order, 1.0, 60.0)));
        assert!(!is_wasted(value(&order, 1.0, 49.0)));
    }

    #[test]
    fn test_zero_shelf_life_is_degenerate() {
        let order = Order::new("Air", Temperature::Hot, 0, 0.0);
        assert!(is_wasted(value(&order, 0.0, 0.0)));
    }
}
