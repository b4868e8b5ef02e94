//! Touch Breakout - a single-screen ball-and-paddle brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `session`: Session controller and tick drivers
//! - `snapshot`: Read-only views for renderers
//! - `input`: Pointer coordinate mapping
//! - `config`: Data-driven game tuning

pub mod config;
pub mod error;
pub mod input;
pub mod session;
pub mod sim;
pub mod snapshot;

pub use config::GameConfig;
pub use error::ConfigError;
pub use session::{FrameDriver, Scheduler, Session, run_until_halted};
pub use snapshot::{FrameView, SessionStatus, Snapshot};

/// Loop timing constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted by the frame driver (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;
}
