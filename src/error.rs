use thiserror;

/// The Result type for fuse48.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error("io error")]
    StdIOError(#[from] std::io::Error),

    #[error("log error")]
    LogError(#[from] log::SetLoggerError),

    #[error("invalid direction {0:?}, expected one of up, down, left, right")]
    InvalidDirection(String),

    #[error("invalid spawn policy {0:?}, expected one of classic, scaled")]
    InvalidSpawnPolicy(String),

    #[error("invalid board size {0}, must be between {1} and {2}")]
    InvalidBoardSize(usize, usize, usize),

    #[error("tile at ({x}, {y}) lies outside a {size}x{size} board")]
    TileOutOfBounds { x: usize, y: usize, size: usize },

    #[error("tile value {0} is not a power of two greater than one")]
    InvalidTileValue(u32),

    #[error("invalid tile {0:?}, expected x,y,value")]
    InvalidCell(String),

    #[error("cell ({0}, {1}) is already occupied")]
    CellOccupied(usize, usize),

    #[error("terminal too small, required minimum size {0} x {1}")]
    TerminalTooSmall(usize, usize),
}
