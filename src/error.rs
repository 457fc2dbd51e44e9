use thiserror::Error;

/// Top-level error type for the Panelis kernel.
#[derive(Debug, Error)]
pub enum PanelisError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Partition(#[from] PartitionError),
}

/// Errors related to geometric primitives.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error(
        "invalid box ({min_x}, {min_y}, {max_x}, {max_y}): \
         coordinates must be finite with minima not exceeding maxima"
    )]
    InvalidBox {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to the partition pipeline.
#[derive(Debug, Error)]
pub enum PartitionError {
    #[error("no boxes supplied")]
    EmptyInput,

    #[error("unknown board: {0}")]
    UnknownBoard(String),

    #[error(
        "seed line at {x} spanning [{min}, {max}] found no perpendicular \
         boundary to stop at"
    )]
    UnboundedShadow { x: f64, min: f64, max: f64 },
}

/// Convenience type alias for results using [`PanelisError`].
pub type Result<T> = std::result::Result<T, PanelisError>;
