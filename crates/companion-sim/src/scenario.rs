use glam::Vec2;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scenario {
    /// Continuous Lissajous motion across the viewport.
    Wander,
    /// A short move, then the pointer rests.
    Idle,
    /// Move, leave the page, come back later.
    Leave,
    /// Short bursts of motion separated by pauses.
    Burst,
}

pub const SCENARIOS: &[&str] = &["wander", "idle", "leave", "burst"];

impl FromStr for Scenario {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wander" => Ok(Scenario::Wander),
            "idle" => Ok(Scenario::Idle),
            "leave" => Ok(Scenario::Leave),
            "burst" => Ok(Scenario::Burst),
            other => anyhow::bail!("unknown scenario {other:?} (expected one of {SCENARIOS:?})"),
        }
    }
}

/// Pointer input at one instant of a script.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Input {
    Move(Vec2),
    Leave,
    Nothing,
}

const CENTER: Vec2 = Vec2::new(640.0, 360.0);

fn lissajous(t: f32) -> Vec2 {
    CENTER + Vec2::new(300.0 * (t * 0.9).sin(), 180.0 * (t * 1.3).cos())
}

impl Scenario {
    /// Scripted input at `now`.
    pub fn input(self, now: Duration) -> Input {
        let ms = now.as_millis() as u64;
        let t = now.as_secs_f32();
        match self {
            Scenario::Wander => Input::Move(lissajous(t)),
            Scenario::Idle => {
                if ms <= 500 {
                    Input::Move(CENTER + Vec2::new(t * 200.0, 0.0))
                } else {
                    Input::Nothing
                }
            }
            Scenario::Leave => match ms {
                0..=1_000 => Input::Move(lissajous(t)),
                1_001..=1_016 => Input::Leave,
                1_017..=5_999 => Input::Nothing,
                _ => Input::Move(lissajous(t)),
            },
            Scenario::Burst => {
                if ms % 1_800 < 300 {
                    Input::Move(lissajous(t * 3.0))
                } else {
                    Input::Nothing
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn parses_known_names() {
        for name in SCENARIOS {
            assert!(name.parse::<Scenario>().is_ok());
        }
        assert!("dance".parse::<Scenario>().is_err());
    }

    #[test]
    fn idle_rests_after_half_a_second() {
        assert!(matches!(Scenario::Idle.input(ms(400)), Input::Move(_)));
        assert_eq!(Scenario::Idle.input(ms(600)), Input::Nothing);
    }

    #[test]
    fn leave_scenario_leaves_once_then_returns() {
        let leaves = (0..10_000)
            .step_by(16)
            .filter(|t| Scenario::Leave.input(ms(*t)) == Input::Leave)
            .count();
        assert_eq!(leaves, 1);
        assert!(matches!(Scenario::Leave.input(ms(6_000)), Input::Move(_)));
    }

    #[test]
    fn burst_alternates() {
        assert!(matches!(Scenario::Burst.input(ms(100)), Input::Move(_)));
        assert_eq!(Scenario::Burst.input(ms(1_000)), Input::Nothing);
        assert!(matches!(Scenario::Burst.input(ms(1_900)), Input::Move(_)));
    }
}
