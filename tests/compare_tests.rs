use pokedex_calc::{compare_creatures, load_creature, Creature, ElementalType};

fn make_creature(raw: &str) -> Creature {
    serde_json::from_str(raw).unwrap()
}

const CHARIZARD: &str = r#"{
    "name": "Charizard",
    "types": ["fire", "flying"],
    "captureRate": 45,
    "stats": {"hp": 78, "attack": 84, "defense": 78,
              "specialAttack": 109, "specialDefense": 85, "speed": 100},
    "generation": 1
}"#;

const BLASTOISE: &str = r#"{
    "name": "Blastoise",
    "types": ["water"],
    "captureRate": 45,
    "stats": {"hp": 79, "attack": 83, "defense": 100,
              "specialAttack": 85, "specialDefense": 105, "speed": 78}
}"#;

#[test]
fn comparison_carries_types_and_capture_rate() {
    let left = make_creature(CHARIZARD);
    let right = make_creature(BLASTOISE);
    let report = compare_creatures(&left, &right);

    assert_eq!(report.left.types, vec!["fire", "flying"]);
    assert_eq!(report.left.capture_rate, 45);
    assert_eq!(report.right.types, vec!["water"]);
    assert_eq!(report.stats.total_diff, 4);

    // Rock hits fire and flying for 2 each.
    assert_eq!(
        report.left.matchups.defending.get(&ElementalType::Rock),
        Some(&4.0)
    );
    assert_eq!(
        report.left.matchups.defending.get(&ElementalType::Ground),
        Some(&0.0)
    );
    assert_eq!(
        report.right.matchups.attacking.get(&ElementalType::Fire),
        Some(&2.0)
    );
    assert!(report.left.matchups.attacking.values().all(|&m| m > 1.0));
}

#[test]
fn untyped_creature_has_neutral_matchups() {
    let blank = make_creature(
        r#"{"name": "Blank", "captureRate": 3,
            "stats": {"hp": 1, "attack": 1, "defense": 1,
                      "specialAttack": 1, "specialDefense": 1, "speed": 1}}"#,
    );
    let report = compare_creatures(&blank, &blank);
    assert!(report.left.types.is_empty());
    assert!(report.left.matchups.attacking.is_empty());
    assert!(report.left.matchups.defending.is_empty());
    assert_eq!(report.stats.total_diff, 0);
}

#[test]
fn comparison_serializes_profiles() {
    let path = std::env::temp_dir()
        .join(format!("pokedex-calc-creature-{}.json", std::process::id()));
    std::fs::write(&path, CHARIZARD).unwrap();
    let left = load_creature(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(left.extras.contains_key("generation"));

    let report = compare_creatures(&left, &make_creature(BLASTOISE));
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["left"]["captureRate"], 45);
    assert_eq!(json["left"]["types"][1], "flying");
    assert_eq!(json["right"]["matchups"]["defending"]["electric"], 2.0);
    assert_eq!(json["stats"]["total_diff"], 4);
}
