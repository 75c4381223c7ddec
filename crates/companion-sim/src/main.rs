mod scenario;

use anyhow::Context;
use companion_core::{compose, Companion, CompanionConfig, NodeKind, Palette, VARIANTS};
use scenario::{Input, Scenario, SCENARIOS};
use std::time::Duration;

const DEFAULT_SECONDS: u64 = 10;
const DEFAULT_SEED: u64 = 1;
const REPORT_EVERY: Duration = Duration::from_secs(1);

struct Args {
    scenario: Scenario,
    seconds: u64,
    seed: u64,
    palette: Palette,
    config: CompanionConfig,
}

fn usage() -> String {
    format!(
        "usage: companion-sim [{}] [seconds] [seed=N] [variants=N] [key=value ...]",
        SCENARIOS.join("|")
    )
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Args> {
    let mut out = Args {
        scenario: Scenario::Wander,
        seconds: DEFAULT_SECONDS,
        seed: DEFAULT_SEED,
        palette: Palette::default(),
        config: CompanionConfig::default(),
    };
    let mut overrides = Vec::new();
    for arg in args {
        if let Some((key, value)) = arg.split_once('=') {
            match key {
                "seed" => {
                    out.seed = value.parse().with_context(|| format!("bad seed {value:?}"))?;
                }
                "variants" => {
                    let n: usize = value
                        .parse()
                        .with_context(|| format!("bad variant count {value:?}"))?;
                    out.palette = Palette::new(&VARIANTS[..n.min(VARIANTS.len())]);
                }
                _ => overrides.push((key.to_string(), value.to_string())),
            }
        } else if let Ok(seconds) = arg.parse::<u64>() {
            out.seconds = seconds;
        } else {
            out.scenario = arg.parse().with_context(usage)?;
        }
    }
    out.config
        .apply_overrides(overrides.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .with_context(usage)?;
    Ok(out)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    log::info!(
        "scenario {:?} for {}s, seed {}",
        args.scenario,
        args.seconds,
        args.seed
    );

    let step = args.config.physics_step;
    let mut companion = Companion::with_seed(args.config, args.seed).with_palette(args.palette);
    let end = Duration::from_secs(args.seconds);
    let mut now = Duration::ZERO;
    let mut next_report = REPORT_EVERY;

    while now <= end {
        match args.scenario.input(now) {
            Input::Move(p) => companion.pointer_move(now, p.x, p.y),
            Input::Leave => companion.pointer_leave(now),
            Input::Nothing => {
                companion.advance(now);
            }
        }
        if now >= next_report {
            report(&companion, now);
            next_report += REPORT_EVERY;
        }
        now += step;
    }

    let stats = companion.stats().clone();
    let cancelled = companion.teardown();
    log::info!("final {:?}", stats);
    log::info!("teardown cancelled {} timers", cancelled);
    Ok(())
}

fn report(companion: &Companion, now: Duration) {
    let motion = companion.motion();
    let scene = compose(&companion.snapshot(), companion.palette());
    log::info!(
        "t={:>6.2}s visible={} moving={} dormant={} icon={} speed={:>7.1} particles={:>2} floating={} nodes={} sparkles={}",
        now.as_secs_f32(),
        motion.is_visible,
        motion.is_moving,
        companion.is_dormant(),
        companion.palette().get(companion.variant()).name,
        companion.speed(),
        companion.particles().len(),
        companion.floating().len(),
        scene.len(),
        scene.count(NodeKind::Sparkle)
    );
}
