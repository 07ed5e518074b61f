//! Charge-and-release jumping

use super::cricket::{Cricket, CricketState, Facing};
use super::input::JumpPress;
use crate::settings::Settings;

/// Jump strength for a charge held `charge` ticks
///
/// Longer holds give stronger jumps, clamped to `[min_prime, max_prime]`.
#[inline]
pub fn prime(charge: u32, settings: &Settings) -> i32 {
    let ticks = i32::try_from(charge).unwrap_or(i32::MAX);
    (ticks / settings.velocity_denominator).clamp(settings.min_prime, settings.max_prime)
}

/// Apply one tick of jump input to a grounded cricket
///
/// Returns the jump strength when this tick released a charge.
pub fn apply_press(cricket: &mut Cricket, press: JumpPress, settings: &Settings) -> Option<i32> {
    if cricket.airborne {
        return None;
    }

    match press {
        JumpPress::Cancel => {
            cricket.charge = 0;
            None
        }
        JumpPress::Left => {
            cricket.facing = Facing::Left;
            cricket.charge = cricket.charge.saturating_add(1);
            None
        }
        JumpPress::Right => {
            cricket.facing = Facing::Right;
            cricket.charge = cricket.charge.saturating_add(1);
            None
        }
        JumpPress::None if cricket.charge > 0 => {
            let strength = prime(cricket.charge, settings);
            cricket.velocity.y = strength;
            cricket.velocity.x = settings.velocity_x_multiplier * strength * cricket.facing.sign();
            cricket.state = CricketState::Jumping;
            cricket.airborne = true;
            cricket.charge = 0;
            Some(strength)
        }
        JumpPress::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use proptest::prelude::*;

    fn grounded() -> Cricket {
        let mut cricket = Cricket::new(IVec2::new(100, 100));
        cricket.airborne = false;
        cricket
    }

    #[test]
    fn test_min_prime_release() {
        let settings = Settings::default();
        let mut cricket = grounded();
        let hold = (settings.min_prime * settings.velocity_denominator) as usize;
        for _ in 0..hold {
            assert_eq!(apply_press(&mut cricket, JumpPress::Left, &settings), None);
        }
        assert_eq!(cricket.facing.sign(), 1);
        assert_eq!(cricket.charge as usize, hold);

        let strength = apply_press(&mut cricket, JumpPress::None, &settings);
        assert_eq!(strength, Some(settings.min_prime));
        assert_eq!(
            cricket.velocity,
            IVec2::new(settings.velocity_x_multiplier * settings.min_prime, settings.min_prime)
        );
        assert_eq!(cricket.state, CricketState::Jumping);
        assert!(cricket.airborne);
        assert_eq!(cricket.charge, 0);
    }

    #[test]
    fn test_short_tap_still_hops() {
        let settings = Settings::default();
        let mut cricket = grounded();
        apply_press(&mut cricket, JumpPress::Right, &settings);
        let strength = apply_press(&mut cricket, JumpPress::None, &settings);
        assert_eq!(strength, Some(settings.min_prime));
        assert_eq!(cricket.velocity.x, -settings.velocity_x_multiplier * settings.min_prime);
    }

    #[test]
    fn test_long_hold_caps() {
        let settings = Settings::default();
        let mut cricket = grounded();
        cricket.charge = 10_000;
        assert_eq!(
            apply_press(&mut cricket, JumpPress::None, &settings),
            Some(settings.max_prime)
        );
    }

    #[test]
    fn test_cancel_discards_charge() {
        let settings = Settings::default();
        let mut cricket = grounded();
        for _ in 0..25 {
            apply_press(&mut cricket, JumpPress::Left, &settings);
        }
        apply_press(&mut cricket, JumpPress::Cancel, &settings);
        assert_eq!(cricket.charge, 0);
        assert_eq!(apply_press(&mut cricket, JumpPress::None, &settings), None);
        assert_eq!(cricket.velocity, IVec2::ZERO);
        assert!(!cricket.airborne);
    }

    #[test]
    fn test_airborne_ignores_input() {
        let settings = Settings::default();
        let mut cricket = Cricket::new(IVec2::ZERO);
        apply_press(&mut cricket, JumpPress::Left, &settings);
        assert_eq!(cricket.charge, 0);
    }

    proptest! {
        #[test]
        fn prop_prime_bounded(charge in 0u32..100_000) {
            let settings = Settings::default();
            let p = prime(charge, &settings);
            prop_assert!(p >= settings.min_prime && p <= settings.max_prime);
        }

        #[test]
        fn prop_prime_monotonic(a in 0u32..100_000, b in 0u32..100_000) {
            let settings = Settings::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(prime(lo, &settings) <= prime(hi, &settings));
        }
    }
}
