//! Touch Breakout entry point
//!
//! Headless demo: plays one run with the autopilot steering the paddle and
//! prints the final status as JSON.
//!
//! Usage: `touch-breakout [CONFIG.json] [SEED]`

use anyhow::Context;

use touch_breakout::consts::SIM_DT;
use touch_breakout::sim::{GameEvent, TickStatus};
use touch_breakout::{FrameDriver, GameConfig, Session};

/// Container width used when no front end supplies one
const DEFAULT_CONTAINER_WIDTH: f32 = 300.0;
/// Ten minutes of play at 60 Hz
const MAX_FRAMES: u64 = 60 * 60 * 10;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Touch Breakout (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            GameConfig::load(&path).with_context(|| format!("loading config from {path}"))?
        }
        None => GameConfig::default(),
    };
    let seed = match args.next() {
        Some(raw) => raw.parse().with_context(|| format!("invalid seed '{raw}'"))?,
        None => 0x5EED,
    };

    let mut session = Session::for_container(config, DEFAULT_CONTAINER_WIDTH, seed)?;
    let mut driver = FrameDriver::new();
    session.start();

    let mut frames = 0;
    while frames < MAX_FRAMES {
        frames += 1;
        session.set_pointer(session.autopilot_target());
        let status = driver.advance(&mut session, SIM_DT);

        for event in &session.state().events {
            if let GameEvent::LifeLost { remaining } = event {
                log::info!("Missed! {} lives left", remaining);
            }
        }

        if status == TickStatus::Halted {
            break;
        }
    }

    let status = session.current_state();
    log::info!(
        "Run finished after {} frames: {:?}, score {}, lives {}",
        frames,
        status.phase,
        status.score,
        status.lives
    );
    println!("{}", serde_json::to_string_pretty(&status)?);

    Ok(())
}
