//! Caller-facing configuration and textual overrides.
//!
//! Hosts build a [`CompanionConfig`] from defaults and then apply
//! `key=value` style overrides (HTML `data-*` attributes on the web, command
//! line arguments natively). Periods are always clamped to
//! [`MIN_PERIOD_MS`] so no timer can be registered with a zero or negative
//! period.

use crate::constants::*;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown config key `{0}`")]
    UnknownKey(String),
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
}

/// Keys accepted by [`CompanionConfig::apply_override`].
pub const OVERRIDE_KEYS: &[&str] = &[
    "enabled",
    "still-window-ms",
    "spawn-recency-ms",
    "hide-timeout-ms",
    "physics-step-ms",
    "particle-spawn-ms",
    "ambient-spawn-ms",
    "icon-moving-ms",
    "icon-idle-ms",
    "max-particles",
    "max-floating",
];

#[derive(Clone, Debug, PartialEq)]
pub struct CompanionConfig {
    pub enabled: bool,
    pub still_window: Duration,
    pub spawn_recency: Duration,
    pub hide_timeout: Duration,
    pub physics_step: Duration,
    pub particle_spawn_period: Duration,
    pub ambient_spawn_period: Duration,
    pub icon_period_moving: Duration,
    pub icon_period_idle: Duration,
    pub max_particles: usize,
    pub max_floating: usize,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            still_window: Duration::from_millis(STILL_WINDOW_MS),
            spawn_recency: Duration::from_millis(SPAWN_RECENCY_MS),
            hide_timeout: Duration::from_millis(HIDE_TIMEOUT_MS),
            physics_step: Duration::from_millis(PHYSICS_STEP_MS),
            particle_spawn_period: Duration::from_millis(PARTICLE_SPAWN_PERIOD_MS),
            ambient_spawn_period: Duration::from_millis(AMBIENT_SPAWN_PERIOD_MS),
            icon_period_moving: Duration::from_millis(ICON_PERIOD_MOVING_MS),
            icon_period_idle: Duration::from_millis(ICON_PERIOD_IDLE_MS),
            max_particles: MAX_PARTICLES,
            max_floating: MAX_FLOATING,
        }
    }
}

impl CompanionConfig {
    /// Clamp every period to the minimum safe value and both caps to
    /// `MAX_POPULATION_CAP`.
    pub fn sanitized(mut self) -> Self {
        let min = min_period();
        for period in [
            &mut self.still_window,
            &mut self.spawn_recency,
            &mut self.hide_timeout,
            &mut self.physics_step,
            &mut self.particle_spawn_period,
            &mut self.ambient_spawn_period,
            &mut self.icon_period_moving,
            &mut self.icon_period_idle,
        ] {
            if *period < min {
                log::warn!("[config] period {:?} clamped to {:?}", period, min);
                *period = min;
            }
        }
        for (name, cap) in [
            ("max_particles", &mut self.max_particles),
            ("max_floating", &mut self.max_floating),
        ] {
            if *cap > MAX_POPULATION_CAP {
                log::warn!("[config] {} {} clamped to {}", name, cap, MAX_POPULATION_CAP);
                *cap = MAX_POPULATION_CAP;
            }
        }
        self
    }

    /// Apply a single textual override.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let key = key.trim();
        let value = value.trim();
        match key {
            "enabled" => self.enabled = parse_bool(key, value)?,
            "still-window-ms" => self.still_window = parse_period(key, value)?,
            "spawn-recency-ms" => self.spawn_recency = parse_period(key, value)?,
            "hide-timeout-ms" => self.hide_timeout = parse_period(key, value)?,
            "physics-step-ms" => self.physics_step = parse_period(key, value)?,
            "particle-spawn-ms" => self.particle_spawn_period = parse_period(key, value)?,
            "ambient-spawn-ms" => self.ambient_spawn_period = parse_period(key, value)?,
            "icon-moving-ms" => self.icon_period_moving = parse_period(key, value)?,
            "icon-idle-ms" => self.icon_period_idle = parse_period(key, value)?,
            "max-particles" => self.max_particles = parse_count(key, value)?,
            "max-floating" => self.max_floating = parse_count(key, value)?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Apply `key=value` pairs in order, stopping at the first error.
    pub fn apply_overrides<'a, I>(&mut self, pairs: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (key, value) in pairs {
            self.apply_override(key, value)?;
        }
        Ok(())
    }
}

#[inline]
fn min_period() -> Duration {
    Duration::from_millis(MIN_PERIOD_MS)
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

/// Milliseconds as a float; negative and too-small values clamp up instead of failing.
fn parse_period(key: &str, value: &str) -> Result<Duration, ConfigError> {
    let ms: f64 = value.parse().map_err(|_| invalid(key, value))?;
    if !ms.is_finite() {
        return Err(invalid(key, value));
    }
    let min = MIN_PERIOD_MS as f64;
    if ms < min {
        log::warn!("[config] {key}={value} clamped to {MIN_PERIOD_MS} ms");
        return Ok(min_period());
    }
    Ok(Duration::from_micros((ms * 1000.0).round() as u64))
}

fn parse_count(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse().map_err(|_| invalid(key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_period_clamps_to_minimum() {
        let mut cfg = CompanionConfig::default();
        cfg.apply_override("physics-step-ms", "-16").unwrap();
        assert_eq!(cfg.physics_step, Duration::from_millis(MIN_PERIOD_MS));
    }

    #[test]
    fn fractional_period_is_kept() {
        let mut cfg = CompanionConfig::default();
        cfg.apply_override("still-window-ms", "150.5").unwrap();
        assert_eq!(cfg.still_window, Duration::from_micros(150_500));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut cfg = CompanionConfig::default();
        let err = cfg.apply_override("sparkle-count", "3").unwrap_err();
        assert_eq!(err, ConfigError::UnknownKey("sparkle-count".into()));
    }

    #[test]
    fn garbage_values_are_rejected() {
        let mut cfg = CompanionConfig::default();
        assert!(cfg.apply_override("max-particles", "-1").is_err());
        assert!(cfg.apply_override("enabled", "maybe").is_err());
        assert!(cfg.apply_override("hide-timeout-ms", "NaN").is_err());
        assert_eq!(cfg, CompanionConfig::default());
    }

    #[test]
    fn sanitized_lifts_zero_periods() {
        let cfg = CompanionConfig {
            physics_step: Duration::ZERO,
            icon_period_idle: Duration::from_millis(1),
            ..CompanionConfig::default()
        }
        .sanitized();
        assert_eq!(cfg.physics_step, Duration::from_millis(MIN_PERIOD_MS));
        assert_eq!(cfg.icon_period_idle, Duration::from_millis(MIN_PERIOD_MS));
        assert_eq!(cfg.ambient_spawn_period, Duration::from_millis(AMBIENT_SPAWN_PERIOD_MS));
    }

    #[test]
    fn sanitized_bounds_caps() {
        let mut cfg = CompanionConfig::default();
        cfg.apply_override("max-particles", "18446744073709551614").unwrap();
        cfg.apply_override("max-floating", "3").unwrap();
        let cfg = cfg.sanitized();
        assert_eq!(cfg.max_particles, MAX_POPULATION_CAP);
        assert_eq!(cfg.max_floating, 3);
    }

    #[test]
    fn every_listed_key_is_accepted() {
        for key in OVERRIDE_KEYS {
            let mut cfg = CompanionConfig::default();
            let value = if *key == "enabled" { "false" } else { "50" };
            assert!(cfg.apply_override(key, value).is_ok(), "{key} rejected");
        }
    }
}
