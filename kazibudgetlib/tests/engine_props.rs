use kazibudgetlib::{
    engine::{buffer_pct, compute_allocations},
    error::BudgetError,
    model::{Overrides, Prediction},
};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn confidence() -> impl Strategy<Value = Decimal> {
    // до двух знаков после запятой, немного за пределами [0, 100]
    (-2_000i64..=12_000).prop_map(|c| Decimal::new(c, 2))
}

fn pct() -> impl Strategy<Value = Option<Decimal>> {
    prop::option::of(prop_oneof![
        4 => (-50i64..=200).prop_map(Decimal::from),
        1 => Just(Decimal::MAX),
        1 => Just(Decimal::MIN),
        1 => any::<i64>().prop_map(Decimal::from),
    ])
}

fn overrides() -> impl Strategy<Value = Overrides> {
    (pct(), pct(), pct()).prop_map(|(savings, essentials, discretionary)| Overrides {
        savings,
        essentials,
        discretionary,
    })
}

proptest! {
    #[test]
    fn prop_zero_amount_gives_zero_amounts(conf in confidence(), ov in overrides()) {
        // крайние проценты могут не сложиться в Decimal: тогда ошибка, а не паника
        match compute_allocations(&Prediction::new(Decimal::ZERO, conf), Some(&ov)) {
            Ok(a) => {
                for (_, alloc) in a.iter() {
                    prop_assert_eq!(alloc.amt, Decimal::ZERO);
                }
            }
            Err(e) => prop_assert!(matches!(e, BudgetError::InvalidInput(_)), "{}", e),
        }
    }

    #[test]
    fn prop_buffer_is_monotone_in_confidence(a in confidence(), b in confidence()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(buffer_pct(lo) >= buffer_pct(hi));
    }

    #[test]
    fn prop_buffer_stays_within_bounds(conf in confidence()) {
        let b = buffer_pct(conf);
        prop_assert!(b >= Decimal::from(8));
        prop_assert!(b <= Decimal::from(20));
    }

    #[test]
    fn prop_defaults_ignore_confidence(amount in 0i64..10_000_000, conf in confidence()) {
        let a = compute_allocations(&Prediction::new(Decimal::from(amount), conf), None).unwrap();
        prop_assert_eq!(a.savings.pct, Decimal::from(20));
        prop_assert_eq!(a.essentials.pct, Decimal::from(50));
        // без пользовательских процентов остаток не упирается в пол 5%
        prop_assert_eq!(a.total_pct().unwrap(), Decimal::ONE_HUNDRED);
        prop_assert!((a.total_amt().unwrap() - Decimal::from(amount)).abs() <= Decimal::from(2));
    }

    #[test]
    fn prop_deterministic(amount in 0i64..10_000_000, conf in confidence(), ov in overrides()) {
        let p = Prediction::new(Decimal::from(amount), conf);
        let first = compute_allocations(&p, Some(&ov)).ok();
        let second = compute_allocations(&p, Some(&ov)).ok();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_negative_amount_rejected(amount in 1i64..1_000_000, conf in confidence()) {
        let p = Prediction::new(-Decimal::from(amount), conf);
        prop_assert!(compute_allocations(&p, None).is_err());
    }
}
