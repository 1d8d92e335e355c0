use pokedex_calc::types::{defending_multiplier, ElementalType};
use pokedex_calc::{compute_effectiveness, type_multiplier};

#[test]
fn unlisted_pairs_are_neutral() {
    assert_eq!(type_multiplier("dragon", "fire"), 1.0);
    assert_eq!(type_multiplier("normal", "water"), 1.0);
    assert_eq!(type_multiplier("normal", "ghost"), 0.0);
    assert_eq!(type_multiplier("fire", "steel"), 2.0);
}

#[test]
fn unknown_identifiers_are_neutral() {
    assert_eq!(type_multiplier("shadow", "fire"), 1.0);
    assert_eq!(type_multiplier("fire", "shadow"), 1.0);
    let result = compute_effectiveness(&["shadow"]);
    assert!(result.attacking.is_empty());
    assert!(result.defending.is_empty());
}

#[test]
fn empty_type_list_yields_empty_maps() {
    let result = compute_effectiveness::<&str>(&[]);
    assert!(result.attacking.is_empty());
    assert!(result.defending.is_empty());
}

#[test]
fn dual_type_weaknesses_multiply() {
    let result = compute_effectiveness(&["water", "flying"]);
    assert_eq!(result.defending.get(&ElementalType::Electric), Some(&4.0));
    assert_eq!(result.defending.get(&ElementalType::Ground), Some(&0.0));
    assert_eq!(result.defending.get(&ElementalType::Rock), Some(&2.0));
    assert_eq!(result.defending.get(&ElementalType::Fire), Some(&0.5));
    // ice: water 0.5 * flying 2
    assert!(!result.defending.contains_key(&ElementalType::Ice));
}

#[test]
fn quad_resistance_and_immunity() {
    let grass_poison = compute_effectiveness(&["grass", "poison"]);
    assert_eq!(grass_poison.defending.get(&ElementalType::Grass), Some(&0.25));
    assert_eq!(grass_poison.defending.get(&ElementalType::Psychic), Some(&2.0));
    assert_eq!(grass_poison.defending.get(&ElementalType::Water), Some(&0.5));

    let water_ground = compute_effectiveness(&["water", "ground"]);
    assert_eq!(water_ground.defending.get(&ElementalType::Grass), Some(&4.0));
    assert_eq!(water_ground.defending.get(&ElementalType::Electric), Some(&0.0));
}

#[test]
fn attacking_side_takes_best_multiplier() {
    let fire = compute_effectiveness(&["fire"]);
    for target in [
        ElementalType::Grass,
        ElementalType::Ice,
        ElementalType::Bug,
        ElementalType::Steel,
    ] {
        assert_eq!(fire.attacking.get(&target), Some(&2.0));
    }
    // Resisted and neutral targets stay out of the attacking map.
    assert!(!fire.attacking.contains_key(&ElementalType::Water));
    assert!(!fire.attacking.contains_key(&ElementalType::Dragon));
    assert!(!fire.attacking.contains_key(&ElementalType::Normal));
    assert!(fire.attacking.values().all(|&m| m > 1.0));

    // Water covers the rock resistance fire has on its own.
    let fire_water = compute_effectiveness(&["fire", "water"]);
    assert_eq!(fire_water.attacking.get(&ElementalType::Rock), Some(&2.0));
    assert!(!fire_water.attacking.contains_key(&ElementalType::Dragon));
}

#[test]
fn unknown_type_leaves_attacking_map_unchanged() {
    let fire = compute_effectiveness(&["fire"]);
    let fire_shadow = compute_effectiveness(&["fire", "shadow"]);
    assert_eq!(fire.attacking, fire_shadow.attacking);
    assert_eq!(fire.defending, fire_shadow.defending);

    // A lone unknown type hits nothing super-effectively.
    let shadow = compute_effectiveness(&["shadow"]);
    assert!(shadow.attacking.is_empty());
    assert!(shadow.defending.is_empty());
}

#[test]
fn defending_multiplier_matches_factor_product() {
    for attacker in ElementalType::ALL {
        let expected = attacker.multiplier_against(ElementalType::Steel)
            * attacker.multiplier_against(ElementalType::Fairy);
        assert_eq!(defending_multiplier(attacker, &["steel", "fairy"]), expected);
    }
}

#[test]
fn mixed_case_input_is_accepted() {
    let result = compute_effectiveness(&["Water".to_string(), "FLYING".to_string()]);
    assert_eq!(result.defending.get(&ElementalType::Electric), Some(&4.0));
}
