use thiserror::Error;

/// Top-level error type for wadmap.
#[derive(Debug, Error)]
pub enum WadmapError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Level(#[from] LevelError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised while reading the WAD container.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("unsupported archive magic {found:?}, expected \"IWAD\"")]
    BadMagic { found: [u8; 4] },

    #[error("{what} at offset {offset} (length {len}) runs past the end of the archive")]
    Truncated {
        what: &'static str,
        offset: i64,
        len: i64,
    },

    #[error("lump not found: {0}")]
    MissingLump(String),

    #[error("lump {name} has size {size}, not a multiple of its record size {stride}")]
    LumpSize {
        name: &'static str,
        size: usize,
        stride: usize,
    },

    #[error("map not found: {0}")]
    UnknownMap(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised while assembling a level from decoded records.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("{from} {index} references {to} {target}, but only {len} exist")]
    DanglingReference {
        from: &'static str,
        index: usize,
        to: &'static str,
        target: usize,
        len: usize,
    },
}

/// Errors raised while rendering a map.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid render parameters: {0}")]
    InvalidParameters(String),

    #[error("level has no vertices to render")]
    EmptyLevel,

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Convenience type alias for results using [`WadmapError`].
pub type Result<T> = std::result::Result<T, WadmapError>;
