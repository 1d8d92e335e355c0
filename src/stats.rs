use serde::{Deserialize, Serialize};

pub const DEFAULT_INDIVIDUAL_VALUE: u32 = 15;
pub const MAX_EFFORT_PER_STAT: u32 = 252;
pub const MAX_EFFORT_TOTAL: u32 = 510;
pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 100;

/// Max HP at `level` using the simplified IV/EV formula:
/// `floor((2*base + iv + ev/4) * level / 100) + level + 10`.
///
/// `ev / 4` is integer division. The result is never below `level + 10`.
/// Out-of-range inputs saturate at `u32::MAX` instead of wrapping.
pub fn compute_max_health(
    base_hp: u32,
    level: u32,
    individual_value: u32,
    effort_value: u32,
) -> u32 {
    let level = u64::from(level);
    let per_level =
        2 * u64::from(base_hp) + u64::from(individual_value) + u64::from(effort_value / 4);
    let max_health = per_level.saturating_mul(level) / 100 + level + 10;
    u32::try_from(max_health).unwrap_or(u32::MAX)
}

/// Rejects levels outside `MIN_LEVEL..=MAX_LEVEL`.
pub fn check_level(level: u32) -> anyhow::Result<()> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        anyhow::bail!("--level must be between {MIN_LEVEL} and {MAX_LEVEL}, got {level}");
    }
    Ok(())
}

/// [`compute_max_health`] with the default IV of 15 and no EVs.
pub fn default_max_health(base_hp: u32, level: u32) -> u32 {
    compute_max_health(base_hp, level, DEFAULT_INDIVIDUAL_VALUE, 0)
}

/// Keeps a current-HP input inside `1..=max_health`.
pub fn clamp_current_health(current: u32, max_health: u32) -> u32 {
    current.clamp(1, max_health.max(1))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffortValues {
    #[serde(default)]
    pub hp: u32,
    #[serde(default)]
    pub attack: u32,
    #[serde(default)]
    pub defense: u32,
    #[serde(default)]
    pub special_attack: u32,
    #[serde(default)]
    pub special_defense: u32,
    #[serde(default)]
    pub speed: u32,
}

impl EffortValues {
    pub fn total(&self) -> u32 {
        self.hp
            + self.attack
            + self.defense
            + self.special_attack
            + self.special_defense
            + self.speed
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let per_stat = [
            ("hp", self.hp),
            ("attack", self.attack),
            ("defense", self.defense),
            ("specialAttack", self.special_attack),
            ("specialDefense", self.special_defense),
            ("speed", self.speed),
        ];
        for (name, value) in per_stat {
            if value > MAX_EFFORT_PER_STAT {
                anyhow::bail!(
                    "EV {name}={value} exceeds the per-stat limit of {MAX_EFFORT_PER_STAT}"
                );
            }
        }
        let total = self.total();
        if total > MAX_EFFORT_TOTAL {
            anyhow::bail!("EV total {total} exceeds the limit of {MAX_EFFORT_TOTAL}");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

impl BaseStats {
    pub fn total(&self) -> u32 {
        self.hp
            + self.attack
            + self.defense
            + self.special_attack
            + self.special_defense
            + self.speed
    }

    fn values(&self) -> [(&'static str, u32); 6] {
        [
            ("hp", self.hp),
            ("attack", self.attack),
            ("defense", self.defense),
            ("specialAttack", self.special_attack),
            ("specialDefense", self.special_defense),
            ("speed", self.speed),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatDiff {
    pub stat: &'static str,
    pub left: u32,
    pub right: u32,
    pub diff: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatComparison {
    pub rows: Vec<StatDiff>,
    pub total_left: u32,
    pub total_right: u32,
    pub total_diff: i64,
}

/// Per-stat signed difference `left - right`, in hp/atk/def/spa/spd/spe order.
pub fn compare_stats(left: &BaseStats, right: &BaseStats) -> StatComparison {
    let rows = left
        .values()
        .into_iter()
        .zip(right.values())
        .map(|((stat, l), (_, r))| StatDiff {
            stat,
            left: l,
            right: r,
            diff: l as i64 - r as i64,
        })
        .collect();
    let total_left = left.total();
    let total_right = right.total();
    StatComparison {
        rows,
        total_left,
        total_right,
        total_diff: total_left as i64 - total_right as i64,
    }
}
