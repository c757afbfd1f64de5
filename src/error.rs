use thiserror::Error;

/// Errors surfaced by the paint view and its host glue
#[derive(Error, Debug)]
pub enum CanvasError {
    /// A pixel buffer of the requested size could not be created.
    /// The view cannot continue without one.
    #[error("failed to allocate a {width}x{height} pixel buffer")]
    Allocation { width: u32, height: u32 },
    /// Something tried to draw before the host reported any dimensions
    #[error("paint cache used before the view was sized")]
    NotSized,
    #[error("invalid view configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("failed to read view configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl CanvasError {
    /// Whether the host has to stop driving the view after this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Allocation { .. } | Self::NotSized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_message() {
        let err = CanvasError::Allocation { width: 10, height: 20 };
        assert_eq!(err.to_string(), "failed to allocate a 10x20 pixel buffer");
        assert!(err.is_fatal());
    }

    #[test]
    fn test_config_errors_are_recoverable() {
        let parse_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = CanvasError::from(parse_err);
        assert!(!err.is_fatal());
    }
}
