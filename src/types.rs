use log::debug;
use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The eighteen elemental types, declared in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementalType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

use ElementalType::*;

static TYPE_NAMES: phf::Map<&'static str, ElementalType> = phf_map! {
    "normal" => ElementalType::Normal,
    "fire" => ElementalType::Fire,
    "water" => ElementalType::Water,
    "electric" => ElementalType::Electric,
    "grass" => ElementalType::Grass,
    "ice" => ElementalType::Ice,
    "fighting" => ElementalType::Fighting,
    "poison" => ElementalType::Poison,
    "ground" => ElementalType::Ground,
    "flying" => ElementalType::Flying,
    "psychic" => ElementalType::Psychic,
    "bug" => ElementalType::Bug,
    "rock" => ElementalType::Rock,
    "ghost" => ElementalType::Ghost,
    "dragon" => ElementalType::Dragon,
    "dark" => ElementalType::Dark,
    "steel" => ElementalType::Steel,
    "fairy" => ElementalType::Fairy,
};

// Sparse rows indexed by attacking type. Pairs not listed are neutral.
const TYPE_CHART: [&[(ElementalType, f64)]; 18] = [
    // normal
    &[(Rock, 0.5), (Ghost, 0.0), (Steel, 0.5)],
    // fire
    &[
        (Fire, 0.5),
        (Water, 0.5),
        (Grass, 2.0),
        (Ice, 2.0),
        (Bug, 2.0),
        (Rock, 0.5),
        (Dragon, 0.5),
        (Steel, 2.0),
    ],
    // water
    &[
        (Fire, 2.0),
        (Water, 0.5),
        (Grass, 0.5),
        (Ground, 2.0),
        (Rock, 2.0),
        (Dragon, 0.5),
    ],
    // electric
    &[
        (Water, 2.0),
        (Electric, 0.5),
        (Grass, 0.5),
        (Ground, 0.0),
        (Flying, 2.0),
        (Dragon, 0.5),
    ],
    // grass
    &[
        (Fire, 0.5),
        (Water, 2.0),
        (Grass, 0.5),
        (Poison, 0.5),
        (Ground, 2.0),
        (Flying, 0.5),
        (Bug, 0.5),
        (Rock, 2.0),
        (Dragon, 0.5),
        (Steel, 0.5),
    ],
    // ice
    &[
        (Fire, 0.5),
        (Water, 0.5),
        (Grass, 2.0),
        (Ice, 0.5),
        (Ground, 2.0),
        (Flying, 2.0),
        (Dragon, 2.0),
        (Steel, 0.5),
    ],
    // fighting
    &[
        (Normal, 2.0),
        (Ice, 2.0),
        (Poison, 0.5),
        (Flying, 0.5),
        (Psychic, 0.5),
        (Bug, 0.5),
        (Rock, 2.0),
        (Ghost, 0.0),
        (Dark, 2.0),
        (Steel, 2.0),
        (Fairy, 0.5),
    ],
    // poison
    &[
        (Grass, 2.0),
        (Poison, 0.5),
        (Ground, 0.5),
        (Rock, 0.5),
        (Ghost, 0.5),
        (Steel, 0.0),
        (Fairy, 2.0),
    ],
    // ground
    &[
        (Fire, 2.0),
        (Electric, 2.0),
        (Grass, 0.5),
        (Poison, 2.0),
        (Flying, 0.0),
        (Bug, 0.5),
        (Rock, 2.0),
        (Steel, 2.0),
    ],
    // flying
    &[
        (Electric, 0.5),
        (Grass, 2.0),
        (Fighting, 2.0),
        (Bug, 2.0),
        (Rock, 0.5),
        (Steel, 0.5),
    ],
    // psychic
    &[
        (Fighting, 2.0),
        (Poison, 2.0),
        (Psychic, 0.5),
        (Dark, 0.0),
        (Steel, 0.5),
    ],
    // bug
    &[
        (Fire, 0.5),
        (Grass, 2.0),
        (Fighting, 0.5),
        (Poison, 0.5),
        (Flying, 0.5),
        (Psychic, 2.0),
        (Ghost, 0.5),
        (Dark, 2.0),
        (Steel, 0.5),
        (Fairy, 0.5),
    ],
    // rock
    &[
        (Fire, 2.0),
        (Ice, 2.0),
        (Fighting, 0.5),
        (Ground, 0.5),
        (Flying, 2.0),
        (Bug, 2.0),
        (Steel, 0.5),
    ],
    // ghost
    &[(Normal, 0.0), (Psychic, 2.0), (Ghost, 2.0), (Dark, 0.5)],
    // dragon
    &[(Dragon, 2.0), (Steel, 0.5), (Fairy, 0.0)],
    // dark
    &[
        (Fighting, 0.5),
        (Psychic, 2.0),
        (Ghost, 2.0),
        (Dark, 0.5),
        (Fairy, 0.5),
    ],
    // steel
    &[
        (Fire, 0.5),
        (Water, 0.5),
        (Electric, 0.5),
        (Ice, 2.0),
        (Rock, 2.0),
        (Steel, 0.5),
        (Fairy, 2.0),
    ],
    // fairy
    &[
        (Fire, 0.5),
        (Fighting, 2.0),
        (Poison, 0.5),
        (Dragon, 2.0),
        (Dark, 2.0),
        (Steel, 0.5),
    ],
];

impl ElementalType {
    pub const ALL: [ElementalType; 18] = [
        Normal, Fire, Water, Electric, Grass, Ice, Fighting, Poison, Ground, Flying, Psychic,
        Bug, Rock, Ghost, Dragon, Dark, Steel, Fairy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Normal => "normal",
            Fire => "fire",
            Water => "water",
            Electric => "electric",
            Grass => "grass",
            Ice => "ice",
            Fighting => "fighting",
            Poison => "poison",
            Ground => "ground",
            Flying => "flying",
            Psychic => "psychic",
            Bug => "bug",
            Rock => "rock",
            Ghost => "ghost",
            Dragon => "dragon",
            Dark => "dark",
            Steel => "steel",
            Fairy => "fairy",
        }
    }

    /// Case-insensitive lookup; `None` for anything outside the eighteen types.
    pub fn from_name(name: &str) -> Option<ElementalType> {
        TYPE_NAMES
            .get(name.trim().to_ascii_lowercase().as_str())
            .copied()
    }

    /// Damage multiplier when `self` attacks `defending`. Unlisted pairs are 1.0.
    pub fn multiplier_against(self, defending: ElementalType) -> f64 {
        TYPE_CHART[self as usize]
            .iter()
            .find(|(def, _)| *def == defending)
            .map(|(_, multiplier)| *multiplier)
            .unwrap_or(1.0)
    }
}

impl fmt::Display for ElementalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementalType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementalType::from_name(s).ok_or_else(|| anyhow::anyhow!("Unknown type {s}"))
    }
}

/// Two-level chart lookup by identifier. Either side being unknown yields the
/// neutral multiplier.
pub fn type_multiplier(attacking: &str, defending: &str) -> f64 {
    match (
        ElementalType::from_name(attacking),
        ElementalType::from_name(defending),
    ) {
        (Some(atk), Some(def)) => atk.multiplier_against(def),
        _ => {
            debug!("type lookup {attacking} -> {defending} has no chart entry, using 1.0");
            1.0
        }
    }
}

/// Combined multiplier of one attacking type against every listed defending
/// type, multiplied together.
pub fn defending_multiplier<S: AsRef<str>>(attacking: ElementalType, defenders: &[S]) -> f64 {
    defenders
        .iter()
        .map(|def| match ElementalType::from_name(def.as_ref()) {
            Some(def) => attacking.multiplier_against(def),
            None => {
                debug!("ignoring unknown defending type {}", def.as_ref());
                1.0
            }
        })
        .product()
}

/// Best multiplier any of `attackers` achieves against `defending`, never
/// below neutral. Resisted or unknown attackers leave it at 1.0.
pub fn best_attacking_multiplier<S: AsRef<str>>(
    attackers: &[S],
    defending: ElementalType,
) -> f64 {
    attackers
        .iter()
        .map(|atk| match ElementalType::from_name(atk.as_ref()) {
            Some(atk) => atk.multiplier_against(defending),
            None => {
                debug!("ignoring unknown attacking type {}", atk.as_ref());
                1.0
            }
        })
        .fold(1.0, f64::max)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypeEffectiveness {
    /// Defending type -> super-effective multiplier this entity's types deal to it.
    pub attacking: BTreeMap<ElementalType, f64>,
    /// Attacking type -> combined multiplier this entity takes from it.
    pub defending: BTreeMap<ElementalType, f64>,
}

/// Attacking and defending matchups for an entity with the given types.
/// Neutral (1.0) results are left out of both maps.
pub fn compute_effectiveness<S: AsRef<str>>(types: &[S]) -> TypeEffectiveness {
    let mut result = TypeEffectiveness::default();
    if types.is_empty() {
        return result;
    }
    for target in ElementalType::ALL {
        let best = best_attacking_multiplier(types, target);
        if best > 1.0 {
            result.attacking.insert(target, best);
        }
    }
    for attacker in ElementalType::ALL {
        let combined = defending_multiplier(attacker, types);
        if combined != 1.0 {
            result.defending.insert(attacker, combined);
        }
    }
    result
}
