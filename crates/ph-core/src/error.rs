use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SizeMismatch { expected: usize, actual: usize },
    OutOfBounds,
    InvalidScale,
    NotReadable,
    StagingUnavailable,
    Readback(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::OutOfBounds => write!(f, "out of bounds"),
            Self::InvalidScale => write!(f, "pixels per unit must be positive and finite"),
            Self::NotReadable => write!(f, "pixel storage is not readable"),
            Self::StagingUnavailable => write!(f, "no readable staging copy available"),
            Self::Readback(msg) => write!(f, "pixel readback failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
