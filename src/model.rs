use crate::stats::{BaseStats, EffortValues};
use serde::Deserialize;
use std::collections::HashMap;

pub const MAX_TEAM_SIZE: usize = 6;
pub const MAX_MOVES_PER_MEMBER: usize = 4;
pub const MAX_TYPES_PER_MEMBER: usize = 2;

#[derive(Debug, Clone, Deserialize)]
pub struct MoveSlot {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
}

/// A species record as handed over by the data provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creature {
    pub name: String,
    #[serde(default)]
    pub types: Vec<String>,
    pub stats: BaseStats,
    pub capture_rate: u32,
    #[serde(flatten, default)]
    pub extras: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamMember {
    #[serde(default)]
    pub name: String,
    pub types: Vec<String>,
    #[serde(default)]
    pub moves: Vec<MoveSlot>,
    #[serde(default)]
    pub evs: EffortValues,
    #[serde(flatten, default)]
    pub extras: HashMap<String, serde_json::Value>,
}

impl TeamMember {
    pub fn move_types(&self) -> impl Iterator<Item = &str> {
        self.moves.iter().map(|m| m.move_type.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamFile {
    #[serde(default)]
    pub name: Option<String>,
    /// Six slots at most; `null` marks an empty slot.
    #[serde(default)]
    pub members: Vec<Option<TeamMember>>,
    #[serde(flatten, default)]
    pub extras: HashMap<String, serde_json::Value>,
}

impl TeamFile {
    pub fn populated(&self) -> Vec<TeamMember> {
        self.members.iter().flatten().cloned().collect()
    }
}

pub fn validate_team(team: &TeamFile) -> anyhow::Result<()> {
    if team.members.len() > MAX_TEAM_SIZE {
        anyhow::bail!(
            "Expected at most {MAX_TEAM_SIZE} team slots, got {}",
            team.members.len()
        );
    }
    for (slot, member) in team.members.iter().enumerate() {
        let Some(member) = member else { continue };
        if member.types.is_empty() || member.types.len() > MAX_TYPES_PER_MEMBER {
            anyhow::bail!(
                "Slot {slot} ({}) must have 1 or 2 types, got {}",
                member.name,
                member.types.len()
            );
        }
        if member.moves.len() > MAX_MOVES_PER_MEMBER {
            anyhow::bail!(
                "Slot {slot} ({}) knows {} moves, the limit is {MAX_MOVES_PER_MEMBER}",
                member.name,
                member.moves.len()
            );
        }
        member
            .evs
            .validate()
            .map_err(|err| err.context(format!("Slot {slot} ({}) has invalid EVs", member.name)))?;
    }
    Ok(())
}
