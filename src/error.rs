use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("max height must be at least 1, got {0}")]
    InvalidMaxHeight(usize),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::InvalidMaxHeight(0);
        assert_eq!(err.to_string(), "max height must be at least 1, got 0");
    }
}
