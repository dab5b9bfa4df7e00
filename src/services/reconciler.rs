//! Line-item reconciliation against the declared total.

use crate::domain::LineItem;
use crate::error::ValidationError;
use crate::validation::{validate_line_item, ValidationResult};

/// Sum of `quantity × unit_price` over all items, or `None` when the sum
/// leaves the `i128` range.
pub fn items_total(items: &[LineItem]) -> Option<i128> {
    items
        .iter()
        .try_fold(0i128, |total, item| total.checked_add(item.subtotal()))
}

/// The item total must equal `total_amount` exactly; then each item is
/// checked in order and the first failing item stops validation. A sum that
/// overflows can never equal an `i64` total.
pub fn reconcile(items: &[LineItem], total_amount: i64) -> ValidationResult {
    if items_total(items) != Some(i128::from(total_amount)) {
        return Err(ValidationError::AmountMismatch);
    }

    items.iter().try_for_each(validate_line_item)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basket() -> Vec<LineItem> {
        vec![
            LineItem::new("i-00000001", "Pen", 4, 200),
            LineItem::new("i-00000002", "Ruler", 2, 100),
        ]
    }

    #[test]
    fn matching_total_passes() {
        assert_eq!(items_total(&basket()), Some(1000));
        assert!(reconcile(&basket(), 1000).is_ok());
    }

    #[test]
    fn mismatched_total_is_rejected() {
        assert_eq!(reconcile(&basket(), 999), Err(ValidationError::AmountMismatch));
        assert_eq!(reconcile(&basket(), 1001), Err(ValidationError::AmountMismatch));
    }

    #[test]
    fn total_is_checked_before_item_fields() {
        let items = vec![LineItem::new("", "", 1, 500)];
        assert_eq!(reconcile(&items, 1), Err(ValidationError::AmountMismatch));
        assert_eq!(reconcile(&items, 500), Err(ValidationError::MissingItemRef));
    }

    #[test]
    fn first_offending_item_wins() {
        let items = vec![
            LineItem::new("i-1", "Pen", 1, 100),
            LineItem::new("i-2", "", 1, 100),
            LineItem::new("", "Ruler", 1, 100),
        ];

        assert_eq!(
            reconcile(&items, 300),
            Err(ValidationError::MissingItemName("i-2".to_string()))
        );
    }

    #[test]
    fn negative_lines_can_balance_but_still_fail_item_checks() {
        let items = vec![
            LineItem::new("i-1", "Pen", 3, 100),
            LineItem::new("i-2", "Refund", -1, 100),
        ];

        assert_eq!(reconcile(&items, 200), Err(ValidationError::InvalidQuantity));

        let items = vec![
            LineItem::new("i-1", "Pen", 3, 100),
            LineItem::new("i-2", "Voucher", 1, -100),
        ];
        assert_eq!(reconcile(&items, 200), Err(ValidationError::InvalidUnitPrice));
    }

    #[test]
    fn huge_lines_do_not_wrap_around() {
        let items = vec![
            LineItem::new("i-1", "Bulk", i64::MAX, 2),
            LineItem::new("i-2", "Bulk", i64::MAX, 2),
        ];
        assert_eq!(reconcile(&items, -4), Err(ValidationError::AmountMismatch));
    }

    #[test]
    fn overflowing_sum_is_a_mismatch() {
        let mut items: Vec<LineItem> = (0..8)
            .map(|i| LineItem::new(format!("i-{i}"), "Bulk", i64::MAX, i64::MAX))
            .collect();
        items.push(LineItem::new("i-8", "Pen", 1, 1000));

        assert_eq!(items_total(&items), None);
        assert_eq!(reconcile(&items, 1000), Err(ValidationError::AmountMismatch));
    }

    #[test]
    fn wrapped_sum_cannot_match_a_small_total() {
        // 16 × 2^124 is exactly 2^128, which wraps an i128 to zero.
        let mut items: Vec<LineItem> = (0..16)
            .map(|i| LineItem::new(format!("i-{i}"), "Bulk", 1 << 62, 1 << 62))
            .collect();
        items.push(LineItem::new("i-16", "Pen", 1, 1000));

        assert_eq!(reconcile(&items, 1000), Err(ValidationError::AmountMismatch));
    }
}
