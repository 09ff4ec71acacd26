use thiserror::Error;

/// Rejected pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PickError {
    #[error("invalid viewport {width}x{height}: both sides must be finite and > 0")]
    InvalidViewport { width: f32, height: f32 },
}

/// Failure to turn fetched bytes into a pickable mesh.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("mesh asset is empty")]
    Empty,
    #[error("mesh asset length {0} is not a whole number of triangles (36 bytes each)")]
    Misaligned(usize),
    #[error("mesh asset contains non-finite coordinates")]
    NonFinite,
    #[error("asset unavailable: {0}")]
    Unavailable(String),
}

/// Rejected debug-parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("invalid colour {0:?}: expected #rrggbb")]
    InvalidColor(String),
}
