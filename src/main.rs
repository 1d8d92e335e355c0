use pokedex_calc::{
    run, CatchOptions, Command, CompareOptions, CoverageOptions, MatchupOptions, SimulateOptions,
};
use std::env;
use std::path::PathBuf;

fn usage() -> ! {
    eprintln!(
        "Usage: pokedex-calc <command> [options]\n\
  matchup <type> [type] [--json]\n\
  catch --capture-rate N --base-hp N [--level L] [--hp N] [--iv N] [--ev N] [--status NAME] \
[--condition ball:condition]... [--json]\n\
  simulate <catch options> --ball ID [--trials N] [--seed SEED]\n\
  coverage --team team.json [--json]\n\
  compare left.json right.json [--json]"
    );
    std::process::exit(1);
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> anyhow::Result<String> {
    args.next()
        .ok_or_else(|| anyhow::anyhow!("{flag} requires a value"))
}

/// Consumes one catch-related flag. Returns `false` when `arg` is not one.
fn parse_catch_flag(
    arg: &str,
    args: &mut impl Iterator<Item = String>,
    opts: &mut CatchOptions,
) -> anyhow::Result<bool> {
    match arg {
        "--capture-rate" => opts.capture_rate = next_value(args, arg)?.parse()?,
        "--base-hp" => opts.base_hp = next_value(args, arg)?.parse()?,
        "--level" => opts.level = next_value(args, arg)?.parse()?,
        "--hp" => opts.current_hp = Some(next_value(args, arg)?.parse()?),
        "--iv" => opts.individual_value = next_value(args, arg)?.parse()?,
        "--ev" => opts.effort_value = next_value(args, arg)?.parse()?,
        "--status" => opts.status = next_value(args, arg)?,
        "--condition" => opts.conditions.push(next_value(args, arg)?),
        "--json" => opts.json = true,
        _ => return Ok(false),
    }
    Ok(true)
}

fn parse_args() -> anyhow::Result<Command> {
    let mut args = env::args().skip(1);
    let Some(command) = args.next() else { usage() };
    match command.as_str() {
        "matchup" => {
            let mut opts = MatchupOptions {
                types: Vec::new(),
                json: false,
            };
            for arg in args {
                match arg.as_str() {
                    "--json" => opts.json = true,
                    "--help" | "-h" => usage(),
                    other if other.starts_with("--") => {
                        anyhow::bail!("Unknown argument {other}")
                    }
                    other => opts.types.push(other.to_string()),
                }
            }
            Ok(Command::Matchup(opts))
        }
        "catch" => {
            let mut opts = CatchOptions::default();
            while let Some(arg) = args.next() {
                if arg == "--help" || arg == "-h" {
                    usage();
                }
                if !parse_catch_flag(&arg, &mut args, &mut opts)? {
                    anyhow::bail!("Unknown argument {arg}");
                }
            }
            Ok(Command::Catch(opts))
        }
        "simulate" => {
            let mut opts = SimulateOptions {
                catch: CatchOptions::default(),
                ball: "poke-ball".to_string(),
                trials: 100_000,
                seed: 0,
            };
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--ball" => opts.ball = next_value(&mut args, "--ball")?,
                    "--trials" => opts.trials = next_value(&mut args, "--trials")?.parse()?,
                    "--seed" => opts.seed = next_value(&mut args, "--seed")?.parse()?,
                    "--help" | "-h" => usage(),
                    other => {
                        if !parse_catch_flag(other, &mut args, &mut opts.catch)? {
                            anyhow::bail!("Unknown argument {other}");
                        }
                    }
                }
            }
            Ok(Command::Simulate(opts))
        }
        "coverage" => {
            let mut team_path = PathBuf::from("team.json");
            let mut json = false;
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--team" => {
                        team_path = args.next().map(PathBuf::from).ok_or_else(|| {
                            anyhow::anyhow!("--team requires a path (e.g. --team team.json)")
                        })?;
                    }
                    "--json" => json = true,
                    "--help" | "-h" => usage(),
                    other => anyhow::bail!("Unknown argument {other}"),
                }
            }
            Ok(Command::Coverage(CoverageOptions { team_path, json }))
        }
        "compare" => {
            let mut paths = Vec::new();
            let mut json = false;
            for arg in args {
                match arg.as_str() {
                    "--json" => json = true,
                    "--help" | "-h" => usage(),
                    other => paths.push(PathBuf::from(other)),
                }
            }
            let [left_path, right_path]: [PathBuf; 2] = paths
                .try_into()
                .map_err(|_| anyhow::anyhow!("compare takes exactly two creature files"))?;
            Ok(Command::Compare(CompareOptions {
                left_path,
                right_path,
                json,
            }))
        }
        "--help" | "-h" => usage(),
        other => Err(anyhow::anyhow!("Unknown command {other}")),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let command = parse_args()?;
    run(command)
}
