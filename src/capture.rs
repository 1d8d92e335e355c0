//! Capture probability for every ball in the catalog.
//!
//! All functions here are pure. Callers are expected to hand in sane numbers:
//! `max_health > 0`, `1 <= current_health <= max_health`, a positive capture
//! constant. Nothing is validated beyond flooring the intermediate capture
//! value at zero, so out-of-range input yields a probability of 0.0 rather
//! than NaN.

use log::{debug, warn};
use phf::phf_map;
use serde::Serialize;
use std::collections::HashMap;

/// Capture value at or above which the catch is certain.
pub const GUARANTEED_CAPTURE_VALUE: f64 = 255.0;
const SHAKE_EXPONENT: f64 = 0.1875;
const SHAKE_SCALE: f64 = 65536.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeviceCondition {
    pub id: &'static str,
    pub name: &'static str,
    pub modifier: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CaptureDevice {
    pub id: &'static str,
    pub name: &'static str,
    pub base_modifier: f64,
    /// Always catches; left out of the probability listing.
    pub guaranteed: bool,
    pub conditions: &'static [DeviceCondition],
}

const fn device(id: &'static str, name: &'static str, base_modifier: f64) -> CaptureDevice {
    CaptureDevice {
        id,
        name,
        base_modifier,
        guaranteed: false,
        conditions: &[],
    }
}

const fn conditional(
    id: &'static str,
    name: &'static str,
    conditions: &'static [DeviceCondition],
) -> CaptureDevice {
    CaptureDevice {
        id,
        name,
        base_modifier: 1.0,
        guaranteed: false,
        conditions,
    }
}

pub static DEVICE_CATALOG: &[CaptureDevice] = &[
    device("poke-ball", "Poké Ball", 1.0),
    device("great-ball", "Great Ball", 1.5),
    device("ultra-ball", "Ultra Ball", 2.0),
    conditional(
        "net-ball",
        "Net Ball",
        &[DeviceCondition {
            id: "water-bug",
            name: "Water/Bug type",
            modifier: 3.5,
        }],
    ),
    conditional(
        "nest-ball",
        "Nest Ball",
        &[DeviceCondition {
            id: "low-level",
            name: "Low level (≤30)",
            modifier: 3.0,
        }],
    ),
    conditional(
        "repeat-ball",
        "Repeat Ball",
        &[DeviceCondition {
            id: "already-caught",
            name: "Already caught",
            modifier: 3.5,
        }],
    ),
    conditional(
        "timer-ball",
        "Timer Ball",
        &[DeviceCondition {
            id: "ten-turns",
            name: "10+ turns",
            modifier: 4.0,
        }],
    ),
    conditional(
        "dusk-ball",
        "Dusk Ball",
        &[DeviceCondition {
            id: "night-cave",
            name: "Night/Cave",
            modifier: 3.0,
        }],
    ),
    conditional(
        "quick-ball",
        "Quick Ball",
        &[DeviceCondition {
            id: "first-turn",
            name: "First turn",
            modifier: 5.0,
        }],
    ),
    conditional(
        "dive-ball",
        "Dive Ball",
        &[DeviceCondition {
            id: "surfing-fishing",
            name: "Surfing/Fishing",
            modifier: 3.5,
        }],
    ),
    device("luxury-ball", "Luxury Ball", 1.0),
    device("premier-ball", "Premier Ball", 1.0),
    device("heal-ball", "Heal Ball", 1.0),
    conditional(
        "level-ball",
        "Level Ball",
        &[DeviceCondition {
            id: "level-4x",
            name: "Your Pokémon 4x+ higher level",
            modifier: 8.0,
        }],
    ),
    conditional(
        "love-ball",
        "Love Ball",
        &[DeviceCondition {
            id: "opposite-gender",
            name: "Same species, opposite gender",
            modifier: 8.0,
        }],
    ),
    conditional(
        "moon-ball",
        "Moon Ball",
        &[DeviceCondition {
            id: "moon-stone",
            name: "Moon Stone evolution",
            modifier: 4.0,
        }],
    ),
    conditional(
        "heavy-ball",
        "Heavy Ball",
        &[DeviceCondition {
            id: "heavy",
            name: "Heavy Pokémon (≥300kg)",
            modifier: 30.0,
        }],
    ),
    conditional(
        "fast-ball",
        "Fast Ball",
        &[DeviceCondition {
            id: "fast",
            name: "Speed ≥100",
            modifier: 4.0,
        }],
    ),
    device("friend-ball", "Friend Ball", 1.0),
    conditional(
        "lure-ball",
        "Lure Ball",
        &[DeviceCondition {
            id: "fishing",
            name: "Fishing",
            modifier: 4.0,
        }],
    ),
    conditional(
        "dream-ball",
        "Dream Ball",
        &[DeviceCondition {
            id: "sleeping",
            name: "Sleeping Pokémon",
            modifier: 4.0,
        }],
    ),
    CaptureDevice {
        id: "beast-ball",
        name: "Beast Ball",
        base_modifier: 0.1,
        guaranteed: false,
        conditions: &[DeviceCondition {
            id: "ultra-beast",
            name: "Ultra Beast",
            modifier: 5.0,
        }],
    },
    CaptureDevice {
        id: "master-ball",
        name: "Master Ball",
        base_modifier: 255.0,
        guaranteed: true,
        conditions: &[],
    },
];

pub fn find_device(id: &str) -> Option<&'static CaptureDevice> {
    DEVICE_CATALOG
        .iter()
        .find(|d| d.id.eq_ignore_ascii_case(id.trim()))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusCondition {
    pub id: &'static str,
    pub name: &'static str,
    pub multiplier: f64,
}

pub static STATUS_CONDITIONS: [StatusCondition; 6] = [
    StatusCondition {
        id: "none",
        name: "None",
        multiplier: 1.0,
    },
    StatusCondition {
        id: "burn",
        name: "Burn",
        multiplier: 1.5,
    },
    StatusCondition {
        id: "freeze",
        name: "Freeze",
        multiplier: 2.5,
    },
    StatusCondition {
        id: "paralysis",
        name: "Paralysis",
        multiplier: 1.5,
    },
    StatusCondition {
        id: "poison",
        name: "Poison",
        multiplier: 1.5,
    },
    StatusCondition {
        id: "sleep",
        name: "Sleep",
        multiplier: 2.5,
    },
];

static STATUS_INDEX: phf::Map<&'static str, usize> = phf_map! {
    "none" => 0,
    "burn" => 1,
    "brn" => 1,
    "freeze" => 2,
    "frz" => 2,
    "paralysis" => 3,
    "par" => 3,
    "poison" => 4,
    "psn" => 4,
    "sleep" => 5,
    "slp" => 5,
};

pub fn find_status(name: &str) -> Option<&'static StatusCondition> {
    STATUS_INDEX
        .get(name.trim().to_ascii_lowercase().as_str())
        .map(|&idx| &STATUS_CONDITIONS[idx])
}

/// Status lookup that falls back to "none" for unrecognised names.
pub fn status_or_none(name: &str) -> &'static StatusCondition {
    find_status(name).unwrap_or_else(|| {
        warn!("unknown status condition {name}, treating as none");
        &STATUS_CONDITIONS[0]
    })
}

/// Active ball conditions, keyed by `"<device-id>:<condition-id>"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionFlags {
    flags: HashMap<String, bool>,
}

impl ConditionFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(device_id: &str, condition_id: &str) -> String {
        format!("{device_id}:{condition_id}")
    }

    pub fn set(&mut self, device_id: &str, condition_id: &str, active: bool) {
        self.flags.insert(Self::key(device_id, condition_id), active);
    }

    pub fn toggle(&mut self, device_id: &str, condition_id: &str) {
        let entry = self
            .flags
            .entry(Self::key(device_id, condition_id))
            .or_insert(false);
        *entry = !*entry;
    }

    pub fn is_active(&self, device_id: &str, condition_id: &str) -> bool {
        self.flags
            .get(&Self::key(device_id, condition_id))
            .copied()
            .unwrap_or(false)
    }

    /// Parses a `device:condition` key, rejecting ones the catalog does not know.
    pub fn activate_key(&mut self, key: &str) -> anyhow::Result<()> {
        let (device_id, condition_id) = key
            .split_once(':')
            .ok_or_else(|| anyhow::anyhow!("Condition {key} must look like device:condition"))?;
        let device = find_device(device_id)
            .ok_or_else(|| anyhow::anyhow!("Unknown ball {device_id}"))?;
        let condition = device
            .conditions
            .iter()
            .find(|c| c.id.eq_ignore_ascii_case(condition_id.trim()))
            .ok_or_else(|| anyhow::anyhow!("{} has no condition {condition_id}", device.name))?;
        self.set(device.id, condition.id, true);
        Ok(())
    }
}

/// Ball modifier after conditions. An active condition replaces the base
/// modifier rather than stacking with it; if several are active the last one
/// in catalog order wins.
pub fn effective_modifier(device: &CaptureDevice, flags: &ConditionFlags) -> f64 {
    let mut modifier = device.base_modifier;
    for condition in device.conditions {
        if flags.is_active(device.id, condition.id) {
            modifier = condition.modifier;
        }
    }
    modifier
}

/// The intermediate capture value `a`, floored at zero.
pub fn capture_value(
    base_capture_constant: f64,
    max_health: u32,
    current_health: u32,
    device_modifier: f64,
    status_multiplier: f64,
) -> f64 {
    if max_health == 0 {
        warn!("capture value requested with max_health 0");
        return 0.0;
    }
    if current_health > max_health {
        debug!("current_health {current_health} exceeds max_health {max_health}");
    }
    let max = max_health as f64;
    let current = current_health as f64;
    let a = ((3.0 * max - 2.0 * current) * base_capture_constant * device_modifier / (3.0 * max))
        * status_multiplier;
    if a.is_nan() {
        0.0
    } else {
        a.max(0.0)
    }
}

/// Per-shake threshold `b = 65536 / (255 / a)^0.1875` for a capture value
/// below the guaranteed bound.
pub fn shake_threshold(a: f64) -> f64 {
    if a <= 0.0 {
        return 0.0;
    }
    SHAKE_SCALE / (GUARANTEED_CAPTURE_VALUE / a).powf(SHAKE_EXPONENT)
}

/// Continuous form of the four-shake capture check, in `[0, 1]`.
pub fn compute_capture_probability(
    base_capture_constant: f64,
    max_health: u32,
    current_health: u32,
    device_modifier: f64,
    status_multiplier: f64,
) -> f64 {
    let a = capture_value(
        base_capture_constant,
        max_health,
        current_health,
        device_modifier,
        status_multiplier,
    );
    if a >= GUARANTEED_CAPTURE_VALUE {
        return 1.0;
    }
    if a <= 0.0 {
        return 0.0;
    }
    let b = shake_threshold(a);
    (b / SHAKE_SCALE).powi(4).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureRateResult {
    pub device_id: &'static str,
    pub device_name: &'static str,
    pub base_capture_constant: f64,
    pub probability: f64,
    pub modifier: f64,
}

/// Probability for every non-guaranteed ball, highest first. Equal
/// probabilities keep catalog order, which callers should not rely on.
pub fn compute_all_device_rates(
    base_capture_constant: f64,
    max_health: u32,
    current_health: u32,
    status_multiplier: f64,
    flags: &ConditionFlags,
) -> Vec<CaptureRateResult> {
    let mut results: Vec<CaptureRateResult> = DEVICE_CATALOG
        .iter()
        .filter(|device| !device.guaranteed)
        .map(|device| {
            let modifier = effective_modifier(device, flags);
            CaptureRateResult {
                device_id: device.id,
                device_name: device.name,
                base_capture_constant,
                probability: compute_capture_probability(
                    base_capture_constant,
                    max_health,
                    current_health,
                    modifier,
                    status_multiplier,
                ),
                modifier,
            }
        })
        .collect();
    results.sort_by(|lhs, rhs| rhs.probability.total_cmp(&lhs.probability));
    results
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbabilityTier {
    High,
    Medium,
    Low,
}

impl ProbabilityTier {
    pub fn of(probability: f64) -> ProbabilityTier {
        if probability >= 0.5 {
            ProbabilityTier::High
        } else if probability >= 0.2 {
            ProbabilityTier::Medium
        } else {
            ProbabilityTier::Low
        }
    }
}

pub fn format_percent(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}
