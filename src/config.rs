//! Simulator configuration from environment variables.
//!
//! Unset or unparsable values fall back to the defaults.

use std::env;
use std::str::FromStr;

use crate::engine::ControllerConfig;
use crate::input::{DeadZone, DEFAULT_HOLD_MS};
use crate::types::STICK_DEAD_ZONE;

pub const ENV_SEED: &str = "JOY2048_SEED";
pub const ENV_SOUND: &str = "JOY2048_SOUND";
pub const ENV_DEAD_ZONE: &str = "JOY2048_DEAD_ZONE";
pub const ENV_STICK_HOLD_MS: &str = "JOY2048_STICK_HOLD_MS";
pub const ENV_LOOP_MS: &str = "JOY2048_LOOP_MS";
pub const ENV_LOG_PATH: &str = "JOY2048_LOG_PATH";

const DEFAULT_LOOP_MS: u64 = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Spawn RNG seed; None means derive one from the clock
    pub seed: Option<u32>,
    pub sound_enabled: bool,
    /// ADC counts in from each end that still read as neutral
    pub dead_zone: u16,
    pub stick_hold_ms: u64,
    pub loop_ms: u64,
    pub log_path: Option<String>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            sound_enabled: true,
            dead_zone: STICK_DEAD_ZONE,
            stick_hold_ms: DEFAULT_HOLD_MS,
            loop_ms: DEFAULT_LOOP_MS,
            log_path: None,
        }
    }
}

impl SimConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup (the environment, or a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let seed = parse_var(&lookup, ENV_SEED);
        let sound_enabled = lookup(ENV_SOUND)
            .and_then(|s| parse_switch(&s))
            .unwrap_or(defaults.sound_enabled);
        let dead_zone = parse_var(&lookup, ENV_DEAD_ZONE)
            .filter(|&dz: &u16| u32::from(dz) * 2 < 1024)
            .unwrap_or(defaults.dead_zone);
        let stick_hold_ms = parse_var(&lookup, ENV_STICK_HOLD_MS)
            .filter(|&ms: &u64| ms > 0)
            .unwrap_or(defaults.stick_hold_ms);
        let loop_ms = parse_var(&lookup, ENV_LOOP_MS)
            .filter(|&ms: &u64| ms > 0)
            .unwrap_or(defaults.loop_ms);
        let log_path = lookup(ENV_LOG_PATH)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            seed,
            sound_enabled,
            dead_zone,
            stick_hold_ms,
            loop_ms,
            log_path,
        }
    }

    /// Controller settings, using `fallback_seed` when no seed was configured
    pub fn controller_config(&self, fallback_seed: u32) -> ControllerConfig {
        ControllerConfig {
            seed: self.seed.unwrap_or(fallback_seed),
            dead_zone: DeadZone::from_edge(self.dead_zone),
            sound_enabled: self.sound_enabled,
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|s| s.trim().parse().ok())
}

fn parse_switch(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
