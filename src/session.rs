//! Session controller and tick drivers
//!
//! A [`Session`] owns the game state and is the only thing presentation code
//! talks to. Anything that can call [`Scheduler::tick`] can drive it: the
//! [`FrameDriver`] for display-refresh loops, [`run_until_halted`] for tests
//! and headless runs.

use crate::config::GameConfig;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::error::ConfigError;
use crate::input::Viewport;
use crate::sim::{self, Field, GameState, TickInput, TickStatus};
use crate::snapshot::{FrameView, SessionStatus, Snapshot};

/// Something that advances one tick at a time
pub trait Scheduler {
    fn tick(&mut self) -> TickStatus;
}

/// Tick until the scheduler halts or `max_ticks` have run
///
/// Returns the number of ticks that were applied.
pub fn run_until_halted<S: Scheduler + ?Sized>(scheduler: &mut S, max_ticks: u64) -> u64 {
    let mut ticks = 0;
    while ticks < max_ticks {
        ticks += 1;
        if scheduler.tick() == TickStatus::Halted {
            break;
        }
    }
    ticks
}

/// One player's run, from start through any number of restarts
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    pending: TickInput,
    running: bool,
}

impl Session {
    /// Build a session; nothing ticks until [`Session::start`]
    pub fn new(config: GameConfig, field: Field, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            state: GameState::new(config, field, seed)?,
            pending: TickInput::default(),
            running: false,
        })
    }

    /// Build a session sized from a container width
    pub fn for_container(config: GameConfig, width: f32, seed: u64) -> Result<Self, ConfigError> {
        let field = Field::from_container_width(width, config.aspect_ratio)?;
        Self::new(config, field, seed)
    }

    pub fn start(&mut self) {
        if !self.state.phase.is_terminal() {
            self.running = true;
            log::info!(
                "Session started on {}x{} field (seed {})",
                self.state.field.width,
                self.state.field.height,
                self.state.seed
            );
        }
    }

    /// Throw the current run away and begin a fresh one
    ///
    /// The RNG is reseeded, so every restart serves the same opening ball.
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        self.state = GameState::new(self.state.config.clone(), self.state.field, self.state.seed)?;
        self.pending = TickInput::default();
        self.running = true;
        log::info!("Session restarted");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Queue a paddle-center target (field units) for the next tick
    pub fn set_pointer(&mut self, center_x: f32) {
        self.pending.paddle_center = Some(center_x);
    }

    /// Queue a pointer event given in client pixels
    pub fn set_pointer_client(&mut self, client_x: f32, viewport: &Viewport) {
        let x = viewport.field_x(client_x, self.state.field.width);
        self.set_pointer(x);
    }

    /// Apply new field dimensions
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        let field = Field::new(width, height)?;
        self.state.resize(field)?;
        log::debug!("Field resized to {}x{}", width, height);
        Ok(())
    }

    /// Resize from a container width using the configured aspect ratio
    pub fn resize_to_container(&mut self, width: f32) -> Result<(), ConfigError> {
        let height = width * self.state.config.aspect_ratio;
        self.resize(width, height)
    }

    pub fn current_state(&self) -> SessionStatus {
        SessionStatus::of(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn frame(&self) -> FrameView<'_> {
        FrameView::of(&self.state)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.state)
    }

    /// Paddle target for demo play: follow the ball with a slow sway so
    /// rebounds vary instead of locking into a vertical loop
    pub fn autopilot_target(&self) -> f32 {
        let t = self.state.time_ticks as f32 * 0.01;
        let sway = t.sin() * 0.6 + (t * 0.7).sin() * 0.3;
        self.state.ball.pos.x + sway * self.state.paddle.width / 2.0
    }
}

impl Scheduler for Session {
    fn tick(&mut self) -> TickStatus {
        if !self.running {
            return TickStatus::Halted;
        }
        let input = std::mem::take(&mut self.pending);
        let status = sim::tick(&mut self.state, &input);
        if status == TickStatus::Halted {
            self.running = false;
        }
        status
    }
}

/// Turns variable display-frame deltas into fixed simulation ticks
#[derive(Debug, Clone, Default)]
pub struct FrameDriver {
    accumulator: f32,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run as many whole ticks as `dt` seconds cover, capped per frame
    ///
    /// Stops at the first halted tick. Time beyond the substep cap is
    /// dropped rather than carried into the next frame.
    pub fn advance<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S, dt: f32) -> TickStatus {
        self.accumulator += if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };

        let mut substeps = 0;
        while self.accumulator >= SIM_DT {
            if substeps == MAX_SUBSTEPS {
                self.accumulator = 0.0;
                break;
            }
            self.accumulator -= SIM_DT;
            substeps += 1;
            if scheduler.tick() == TickStatus::Halted {
                self.accumulator = 0.0;
                return TickStatus::Halted;
            }
        }
        TickStatus::Continue
    }
}
