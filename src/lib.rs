pub mod capture;
pub mod coverage;
pub mod model;
pub mod simulation;
pub mod stats;
pub mod types;

pub use crate::capture::{
    compute_all_device_rates, compute_capture_probability, effective_modifier, format_percent,
    CaptureDevice, CaptureRateResult, ConditionFlags, ProbabilityTier, StatusCondition,
    DEVICE_CATALOG, STATUS_CONDITIONS,
};
pub use crate::coverage::{compute_team_coverage, DefensiveSummary, TeamCoverage};
pub use crate::model::{Creature, MoveSlot, TeamFile, TeamMember};
pub use crate::stats::{compute_max_health, default_max_health, BaseStats, EffortValues};
pub use crate::types::{compute_effectiveness, type_multiplier, ElementalType, TypeEffectiveness};

use crate::capture::{find_device, status_or_none};
use crate::coverage::uncovered_types;
use crate::model::validate_team;
use crate::simulation::{estimate_capture_rate, CaptureAttempt};
use crate::stats::{
    check_level, clamp_current_health, compare_stats, StatComparison, DEFAULT_INDIVIDUAL_VALUE,
};
use anyhow::Context;
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct MatchupOptions {
    pub types: Vec<String>,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct CatchOptions {
    pub capture_rate: f64,
    pub base_hp: u32,
    pub level: u32,
    pub individual_value: u32,
    pub effort_value: u32,
    /// Defaults to 1 HP left.
    pub current_hp: Option<u32>,
    pub status: String,
    pub conditions: Vec<String>,
    pub json: bool,
}

impl Default for CatchOptions {
    fn default() -> Self {
        Self {
            capture_rate: 45.0,
            base_hp: 50,
            level: 50,
            individual_value: DEFAULT_INDIVIDUAL_VALUE,
            effort_value: 0,
            current_hp: None,
            status: "none".to_string(),
            conditions: Vec::new(),
            json: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulateOptions {
    pub catch: CatchOptions,
    pub ball: String,
    pub trials: usize,
    pub seed: u64,
}

#[derive(Debug, Clone)]
pub struct CoverageOptions {
    pub team_path: PathBuf,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct CompareOptions {
    pub left_path: PathBuf,
    pub right_path: PathBuf,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub enum Command {
    Matchup(MatchupOptions),
    Catch(CatchOptions),
    Simulate(SimulateOptions),
    Coverage(CoverageOptions),
    Compare(CompareOptions),
}

pub fn load_team(path: &Path) -> anyhow::Result<TeamFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read team file at {}", path.display()))?;
    let parsed: TeamFile = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    validate_team(&parsed)?;
    Ok(parsed)
}

pub fn load_creature(path: &Path) -> anyhow::Result<Creature> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read creature file at {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Matchup(opts) => run_matchup(&opts),
        Command::Catch(opts) => run_catch(&opts),
        Command::Simulate(opts) => run_simulate(&opts),
        Command::Coverage(opts) => run_coverage(&opts),
        Command::Compare(opts) => run_compare(&opts),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn format_multipliers(map: &BTreeMap<ElementalType, f64>) -> String {
    if map.is_empty() {
        return "-".to_string();
    }
    map.iter()
        .map(|(ty, m)| format!("{ty} x{m}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn run_matchup(opts: &MatchupOptions) -> anyhow::Result<()> {
    if opts.types.is_empty() || opts.types.len() > 2 {
        anyhow::bail!("matchup takes one or two types, got {}", opts.types.len());
    }
    let effectiveness = compute_effectiveness(&opts.types);
    if opts.json {
        return print_json(&effectiveness);
    }
    println!("Attacking: {}", format_multipliers(&effectiveness.attacking));
    println!("Defending: {}", format_multipliers(&effectiveness.defending));
    Ok(())
}

/// Max HP and the clamped current HP an options set resolves to.
pub fn resolve_health(opts: &CatchOptions) -> (u32, u32) {
    let max_hp = compute_max_health(
        opts.base_hp,
        opts.level,
        opts.individual_value,
        opts.effort_value,
    );
    let current_hp = clamp_current_health(opts.current_hp.unwrap_or(1), max_hp);
    (max_hp, current_hp)
}

pub fn parse_conditions(keys: &[String]) -> anyhow::Result<ConditionFlags> {
    let mut flags = ConditionFlags::new();
    for key in keys {
        flags.activate_key(key)?;
    }
    Ok(flags)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CatchReport {
    max_hp: u32,
    current_hp: u32,
    status: &'static str,
    status_multiplier: f64,
    rates: Vec<CaptureRateResult>,
}

fn run_catch(opts: &CatchOptions) -> anyhow::Result<()> {
    check_level(opts.level)?;
    let (max_hp, current_hp) = resolve_health(opts);
    let status = status_or_none(&opts.status);
    let flags = parse_conditions(&opts.conditions)?;
    let rates = compute_all_device_rates(
        opts.capture_rate,
        max_hp,
        current_hp,
        status.multiplier,
        &flags,
    );
    if opts.json {
        return print_json(&CatchReport {
            max_hp,
            current_hp,
            status: status.id,
            status_multiplier: status.multiplier,
            rates,
        });
    }
    println!(
        "HP {current_hp}/{max_hp}, status {} (x{})",
        status.name, status.multiplier
    );
    for rate in &rates {
        println!(
            "{:<14} x{:<5} {:>8}  {:?}",
            rate.device_name,
            rate.modifier,
            format_percent(rate.probability),
            ProbabilityTier::of(rate.probability)
        );
    }
    Ok(())
}

fn run_simulate(opts: &SimulateOptions) -> anyhow::Result<()> {
    check_level(opts.catch.level)?;
    if opts.trials == 0 {
        anyhow::bail!("--trials must be > 0");
    }
    let device = find_device(&opts.ball)
        .ok_or_else(|| anyhow::anyhow!("Unknown ball {}", opts.ball))?;
    let (max_hp, current_hp) = resolve_health(&opts.catch);
    let status = status_or_none(&opts.catch.status);
    let flags = parse_conditions(&opts.catch.conditions)?;
    let attempt = CaptureAttempt {
        base_capture_constant: opts.catch.capture_rate,
        max_health: max_hp,
        current_health: current_hp,
        device_modifier: effective_modifier(device, &flags),
        status_multiplier: status.multiplier,
    };
    info!(
        "simulating {} attempts with {} (seed {})",
        opts.trials, device.name, opts.seed
    );
    let estimate = estimate_capture_rate(&attempt, opts.trials, opts.seed);
    let expected = compute_capture_probability(
        attempt.base_capture_constant,
        max_hp,
        current_hp,
        attempt.device_modifier,
        attempt.status_multiplier,
    );
    if opts.catch.json {
        return print_json(&serde_json::json!({
            "ball": device.id,
            "estimate": estimate,
            "expected": expected,
        }));
    }
    println!(
        "{}: caught {}/{} ({}), closed form {}",
        device.name,
        estimate.captures,
        estimate.trials,
        format_percent(estimate.rate),
        format_percent(expected)
    );
    Ok(())
}

fn run_coverage(opts: &CoverageOptions) -> anyhow::Result<()> {
    let team = load_team(&opts.team_path)?;
    let members = team.populated();
    let coverage = compute_team_coverage(&members);
    let summary = DefensiveSummary::from_coverage(&coverage);
    if opts.json {
        return print_json(&serde_json::json!({
            "coverage": coverage,
            "summary": summary,
        }));
    }
    if let Some(name) = &team.name {
        println!("{name} ({} members)", members.len());
    }
    println!("Offensive: {}", format_multipliers(&coverage.offensive));
    let missing = uncovered_types(&coverage);
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|t| t.as_str()).collect();
        println!("No super-effective move against: {}", names.join(", "));
    }
    let render = |entries: &[(ElementalType, f64)]| {
        entries
            .iter()
            .map(|(ty, m)| format!("{ty} x{m}"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("Weaknesses: {}", render(&summary.weaknesses));
    println!("Resistances: {}", render(&summary.resistances));
    let immunities: Vec<&str> = summary.immunities.iter().map(|t| t.as_str()).collect();
    println!("Immunities: {}", immunities.join(", "));
    Ok(())
}

/// One side of a creature comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureProfile {
    pub name: String,
    pub types: Vec<String>,
    pub capture_rate: u32,
    pub matchups: TypeEffectiveness,
}

impl CreatureProfile {
    pub fn of(creature: &Creature) -> CreatureProfile {
        CreatureProfile {
            name: creature.name.clone(),
            types: creature.types.clone(),
            capture_rate: creature.capture_rate,
            matchups: compute_effectiveness(&creature.types),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatureComparison {
    pub left: CreatureProfile,
    pub right: CreatureProfile,
    pub stats: StatComparison,
}

/// Side-by-side profiles plus the `left - right` stat table.
pub fn compare_creatures(left: &Creature, right: &Creature) -> CreatureComparison {
    CreatureComparison {
        left: CreatureProfile::of(left),
        right: CreatureProfile::of(right),
        stats: compare_stats(&left.stats, &right.stats),
    }
}

fn print_profile(profile: &CreatureProfile) {
    let types = if profile.types.is_empty() {
        "-".to_string()
    } else {
        profile.types.join("/")
    };
    println!(
        "{} [{types}] capture rate {}",
        profile.name, profile.capture_rate
    );
    println!("  Attacking: {}", format_multipliers(&profile.matchups.attacking));
    println!("  Defending: {}", format_multipliers(&profile.matchups.defending));
}

fn run_compare(opts: &CompareOptions) -> anyhow::Result<()> {
    let left = load_creature(&opts.left_path)?;
    let right = load_creature(&opts.right_path)?;
    let report = compare_creatures(&left, &right);
    if opts.json {
        return print_json(&report);
    }
    print_profile(&report.left);
    print_profile(&report.right);
    println!();
    let comparison = &report.stats;
    println!("{:<16}{:>8}{:>8}{:>8}", "", left.name, right.name, "diff");
    for row in &comparison.rows {
        println!("{:<16}{:>8}{:>8}{:>+8}", row.stat, row.left, row.right, row.diff);
    }
    println!(
        "{:<16}{:>8}{:>8}{:>+8}",
        "total", comparison.total_left, comparison.total_right, comparison.total_diff
    );
    Ok(())
}
