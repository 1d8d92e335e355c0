use pokedex_calc::capture::DEVICE_CATALOG;
use pokedex_calc::stats::compute_max_health;
use pokedex_calc::types::defending_multiplier;
use pokedex_calc::{
    compute_all_device_rates, compute_capture_probability, compute_effectiveness,
    type_multiplier, ConditionFlags, ElementalType,
};
use proptest::prelude::*;

fn elemental_type() -> impl Strategy<Value = ElementalType> {
    prop::sample::select(ElementalType::ALL.to_vec())
}

fn condition_flags() -> impl Strategy<Value = ConditionFlags> {
    let keys: Vec<(&'static str, &'static str)> = DEVICE_CATALOG
        .iter()
        .flat_map(|d| d.conditions.iter().map(move |c| (d.id, c.id)))
        .collect();
    prop::sample::subsequence(keys.clone(), 0..=keys.len()).prop_map(|active| {
        let mut flags = ConditionFlags::new();
        for (device, condition) in active {
            flags.set(device, condition, true);
        }
        flags
    })
}

proptest! {
    #[test]
    fn chart_values_come_from_fixed_set(atk in elemental_type(), def in elemental_type()) {
        let m = type_multiplier(atk.as_str(), def.as_str());
        prop_assert!([0.0, 0.5, 1.0, 2.0].contains(&m));
        prop_assert_eq!(m, atk.multiplier_against(def));
    }

    #[test]
    fn dual_type_defense_is_product(
        a in elemental_type(),
        b in elemental_type(),
        x in elemental_type(),
    ) {
        let result = compute_effectiveness(&[a.as_str(), b.as_str()]);
        let expected = x.multiplier_against(a) * x.multiplier_against(b);
        let actual = result.defending.get(&x).copied().unwrap_or(1.0);
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(defending_multiplier(x, &[a.as_str(), b.as_str()]), expected);
    }

    #[test]
    fn attacking_map_only_lists_super_effective(a in elemental_type(), b in elemental_type()) {
        let result = compute_effectiveness(&[a.as_str(), b.as_str()]);
        prop_assert!(result.attacking.values().all(|&m| m > 1.0));
        let with_unknown = compute_effectiveness(&[a.as_str(), b.as_str(), "shadow"]);
        prop_assert_eq!(result.attacking, with_unknown.attacking);
    }

    #[test]
    fn max_health_never_below_level_floor(
        base in 1u32..=255,
        level in 1u32..=100,
        ev in 0u32..=252,
    ) {
        prop_assert!(compute_max_health(base, level, 15, ev) >= level + 10);
    }

    #[test]
    fn probability_stays_in_unit_interval(
        base in 1u32..=255,
        max in 1u32..=714,
        hp_fraction in 0.0f64..=1.0,
        modifier in 0.0f64..=30.0,
        status in prop::sample::select(vec![1.0, 1.5, 2.5]),
    ) {
        let current = ((max as f64 * hp_fraction).round() as u32).clamp(1, max);
        let p = compute_capture_probability(base as f64, max, current, modifier, status);
        prop_assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn device_rates_are_non_increasing(
        base in 1u32..=255,
        max in 11u32..=400,
        current in 1u32..=400,
        flags in condition_flags(),
    ) {
        let current = current.min(max);
        let rates = compute_all_device_rates(base as f64, max, current, 1.0, &flags);
        prop_assert_eq!(rates.len(), DEVICE_CATALOG.len() - 1);
        for pair in rates.windows(2) {
            prop_assert!(pair[0].probability >= pair[1].probability);
        }
    }
}
