//! Configuration errors
//!
//! Everything that can go wrong in this crate happens before the first tick:
//! bad dimensions, bad tuning values, or an unreadable config file. The
//! simulation itself is infallible.

/// Errors produced while validating or loading game configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Field width or height is zero, negative, or not finite.
    #[error("field dimensions must be positive and finite, got {width}x{height}")]
    InvalidField { width: f32, height: f32 },

    /// The brick grid has no rows or no columns.
    #[error("brick grid needs at least one row and one column, got {rows}x{columns}")]
    EmptyGrid { rows: u32, columns: u32 },

    /// The brick grid asks for more bricks than the game will lay out.
    #[error("brick grid {rows}x{columns} exceeds the limit of {max} bricks")]
    GridTooLarge { rows: u32, columns: u32, max: u64 },

    /// The field is too narrow to fit the configured brick layout.
    #[error("field width {field_width} leaves no room for bricks (computed brick width {brick_width})")]
    FieldTooNarrow { field_width: f32, brick_width: f32 },

    /// Paddle width ratio must lie strictly between 0 and 1.
    #[error("paddle width ratio must be in (0, 1), got {0}")]
    PaddleRatio(f32),

    /// A tuning value is negative, zero where it must be positive, or not finite.
    #[error("'{name}' is out of range: {value}")]
    OutOfRange { name: &'static str, value: f32 },

    /// A count that must be at least one is zero.
    #[error("'{0}' must be at least 1")]
    Zero(&'static str),

    /// The brick palette has no colors.
    #[error("brick palette is empty")]
    EmptyPalette,

    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config JSON could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
