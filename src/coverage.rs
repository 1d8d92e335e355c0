use crate::model::TeamMember;
use crate::types::{best_attacking_multiplier, defending_multiplier, ElementalType};
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamCoverage {
    /// Defending type -> best super-effective multiplier any known move reaches.
    pub offensive: BTreeMap<ElementalType, f64>,
    /// Attacking type -> product of its multipliers over the team's type pool.
    pub defensive: BTreeMap<ElementalType, f64>,
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// Offensive and defensive coverage of the populated team slots.
///
/// Both sides work on de-duplicated pools: every distinct move type for
/// offense, every distinct member type for defense. Two members sharing a
/// type therefore count that type once.
pub fn compute_team_coverage(members: &[TeamMember]) -> TeamCoverage {
    let move_pool: Vec<String> = members
        .iter()
        .flat_map(|m| m.move_types())
        .map(normalize)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let type_pool: Vec<String> = members
        .iter()
        .flat_map(|m| m.types.iter())
        .map(|t| normalize(t))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    debug!(
        "team coverage over {} members, {} move types, {} member types",
        members.len(),
        move_pool.len(),
        type_pool.len()
    );

    let mut coverage = TeamCoverage::default();
    for target in ElementalType::ALL {
        let best = best_attacking_multiplier(&move_pool, target);
        if best > 1.0 {
            coverage.offensive.insert(target, best);
        }
    }
    if !type_pool.is_empty() {
        for attacker in ElementalType::ALL {
            let combined = defending_multiplier(attacker, &type_pool);
            if combined != 1.0 {
                coverage.defensive.insert(attacker, combined);
            }
        }
    }
    coverage
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DefensiveSummary {
    pub weaknesses: Vec<(ElementalType, f64)>,
    pub resistances: Vec<(ElementalType, f64)>,
    pub immunities: Vec<ElementalType>,
}

impl DefensiveSummary {
    pub fn from_coverage(coverage: &TeamCoverage) -> DefensiveSummary {
        let mut summary = DefensiveSummary::default();
        for (&ty, &multiplier) in &coverage.defensive {
            if multiplier == 0.0 {
                summary.immunities.push(ty);
            } else if multiplier < 1.0 {
                summary.resistances.push((ty, multiplier));
            } else if multiplier > 1.0 {
                summary.weaknesses.push((ty, multiplier));
            }
        }
        summary
    }
}

/// Chart types no move on the team hits super-effectively.
pub fn uncovered_types(coverage: &TeamCoverage) -> Vec<ElementalType> {
    ElementalType::ALL
        .into_iter()
        .filter(|ty| !coverage.offensive.contains_key(ty))
        .collect()
}
