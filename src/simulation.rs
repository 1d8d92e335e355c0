use crate::capture::{capture_value, shake_threshold, GUARANTEED_CAPTURE_VALUE};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

const SHAKE_CHECKS: u32 = 4;
const TRIALS_PER_CHUNK: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureAttempt {
    pub base_capture_constant: f64,
    pub max_health: u32,
    pub current_health: u32,
    pub device_modifier: f64,
    pub status_multiplier: f64,
}

impl CaptureAttempt {
    fn capture_value(&self) -> f64 {
        capture_value(
            self.base_capture_constant,
            self.max_health,
            self.current_health,
            self.device_modifier,
            self.status_multiplier,
        )
    }
}

/// Number of shake checks passed before breaking free, or `None` when caught.
pub fn roll_capture(attempt: &CaptureAttempt, rng: &mut SmallRng) -> Option<u32> {
    let a = attempt.capture_value();
    if a >= GUARANTEED_CAPTURE_VALUE {
        return None;
    }
    let b = shake_threshold(a);
    for shake in 0..SHAKE_CHECKS {
        let roll: u16 = rng.gen();
        if f64::from(roll) >= b {
            return Some(shake);
        }
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CaptureEstimate {
    pub trials: usize,
    pub captures: usize,
    pub rate: f64,
}

/// Monte Carlo rate for `attempt`. Work is split into fixed-size chunks, each
/// with its own rng derived from `seed`, so the result does not depend on the
/// rayon thread count.
pub fn estimate_capture_rate(
    attempt: &CaptureAttempt,
    trials: usize,
    seed: u64,
) -> CaptureEstimate {
    let chunks = trials.div_ceil(TRIALS_PER_CHUNK);
    let captures: usize = (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let mut rng = SmallRng::seed_from_u64(seed ^ ((chunk as u64) << 32));
            let len = TRIALS_PER_CHUNK.min(trials - chunk * TRIALS_PER_CHUNK);
            (0..len)
                .filter(|_| roll_capture(attempt, &mut rng).is_none())
                .count()
        })
        .sum();
    let rate = if trials == 0 {
        0.0
    } else {
        captures as f64 / trials as f64
    };
    CaptureEstimate {
        trials,
        captures,
        rate,
    }
}
