//! Tiered discount engine.
//!
//! Rates are handled in basis points (1 bp = 0.01%). The base tier is an
//! ordered chain where the first matching tier wins; bonuses add on top and
//! the combined rate is capped.
//!
//! | total                  | base |
//! |------------------------|------|
//! | 20 000 ..= 50 000      | 5%   |
//! | otherwise ..= 80 000   | 7%   |
//! | otherwise ..= 120 000  | 10%  |
//! | above 120 000          | 15%  |
//!
//! Bonuses: +8% when total > 50 000 and prime, +10% when total > 90 000 and
//! ends in 5. Cap: 20%.

use crate::domain::PricingResult;

pub const BASIS_POINTS_PER_UNIT: i64 = 10_000;
pub const MAX_RATE_BPS: i64 = 2_000;
pub const PRIME_BONUS_BPS: i64 = 800;
pub const FIVE_ENDING_BONUS_BPS: i64 = 1_000;

pub fn base_rate_bps(total: i64) -> i64 {
    if (20_000..=50_000).contains(&total) {
        500
    } else if total <= 80_000 {
        700
    } else if total <= 120_000 {
        1_000
    } else {
        1_500
    }
}

pub fn bonus_rate_bps(total: i64) -> i64 {
    let mut bonus = 0;
    if total > 50_000 && is_prime(total) {
        bonus += PRIME_BONUS_BPS;
    }
    if total > 90_000 && total % 10 == 5 {
        bonus += FIVE_ENDING_BONUS_BPS;
    }
    bonus
}

/// Base plus bonuses, clamped to the cap.
pub fn discount_rate_bps(total: i64) -> i64 {
    (base_rate_bps(total) + bonus_rate_bps(total)).min(MAX_RATE_BPS)
}

/// `floor(total × rate)`; totals at or below zero earn nothing.
pub fn calculate_discount(total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }

    let rate = i128::from(discount_rate_bps(total));
    let discount = i128::from(total) * rate / i128::from(BASIS_POINTS_PER_UNIT);

    // rate is capped at 20%, so the discount always fits back into i64
    discount as i64
}

pub fn price(total: i64) -> PricingResult {
    PricingResult::new(total, calculate_discount(total))
}

/// Trial division by 2 and then odd divisors up to √n.
pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let mut divisor = 3;
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primality() {
        assert!(!is_prime(-7));
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(9));
        assert!(!is_prime(50_001)); // 3 × 16 667
        assert!(is_prime(50_021));
        assert!(is_prime(90_001));
        assert!(is_prime(120_011));
        assert!(!is_prime(95_005));
        assert!(is_prime(2_147_483_647));
    }

    #[test]
    fn base_tier_is_a_priority_chain() {
        assert_eq!(base_rate_bps(10_000), 700);
        assert_eq!(base_rate_bps(19_999), 700);
        assert_eq!(base_rate_bps(20_000), 500);
        assert_eq!(base_rate_bps(50_000), 500);
        assert_eq!(base_rate_bps(50_001), 700);
        assert_eq!(base_rate_bps(80_000), 700);
        assert_eq!(base_rate_bps(80_001), 1_000);
        assert_eq!(base_rate_bps(120_000), 1_000);
        assert_eq!(base_rate_bps(120_001), 1_500);
    }

    #[test]
    fn boundary_scenarios() {
        assert_eq!(price(20_000), PricingResult::new(20_000, 1_000));
        assert_eq!(price(20_000).final_amount, 19_000);
        // 50 001 is not prime, so only the 7% tier applies
        assert_eq!(calculate_discount(50_001), 3_500);
        assert_eq!(calculate_discount(150_000), 22_500);
        // 15% + 10% capped at 20%
        assert_eq!(calculate_discount(95_005), 19_001);
    }

    #[test]
    fn prime_bonus_stacks_on_the_tier() {
        assert_eq!(discount_rate_bps(50_021), 1_500);
        assert_eq!(calculate_discount(50_021), 7_503);
        assert_eq!(discount_rate_bps(90_001), 1_800);
        assert_eq!(calculate_discount(90_001), 16_200);
        assert_eq!(discount_rate_bps(120_011), MAX_RATE_BPS);
        assert_eq!(calculate_discount(120_011), 24_002);
    }

    #[test]
    fn prime_bonus_needs_total_above_fifty_thousand() {
        assert_eq!(discount_rate_bps(49_999), 500);
        assert!(is_prime(49_999));
    }

    #[test]
    fn five_ending_bonus_needs_total_above_ninety_thousand() {
        assert_eq!(discount_rate_bps(85_005), 1_000);
        assert_eq!(discount_rate_bps(90_005), 2_000);
    }

    #[test]
    fn fractions_are_truncated() {
        // 7% of 1 234 = 86.38
        assert_eq!(calculate_discount(1_234), 86);
        assert_eq!(calculate_discount(1), 0);
    }

    #[test]
    fn non_positive_totals_get_no_discount() {
        assert_eq!(price(0), PricingResult::new(0, 0));
        assert_eq!(price(-5_000), PricingResult::new(-5_000, 0));
    }

    #[test]
    fn extreme_totals_do_not_overflow() {
        // i64::MAX is divisible by 7, so only the 15% tier applies
        let result = price(i64::MAX);
        assert_eq!(result.discount_amount, 1_383_505_805_528_216_371);
        assert_eq!(result.final_amount, 7_839_866_231_326_559_436);
    }
}
