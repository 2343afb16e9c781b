use thiserror::Error;

/// Everything that can go wrong while building or configuring a world.
///
/// Stepping a built world never fails; these are all startup conditions.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Invalid grid dimensions: {cols}x{rows} tiles")]
    InvalidGrid { cols: usize, rows: usize },

    #[error("Invalid tile size: {0}")]
    InvalidTileSize(f32),

    #[error("Invalid world bounds: {width}x{height}")]
    InvalidBounds { width: f32, height: f32 },

    #[error(
        "No wall-free spot for radius {radius} in ({min_x}, {min_y})..({max_x}, {max_y}) \
         after {attempts} attempts"
    )]
    SpawnExhausted {
        radius: f32,
        min_x: f32,
        min_y: f32,
        max_x: f32,
        max_y: f32,
        attempts: u32,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
