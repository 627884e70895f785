use core::fmt;

/// Errors reported by grid construction and access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A coordinate fell outside `[0, width) x [0, height)`.
    OutOfRange {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    /// A backing vector did not hold exactly `width * height` cells.
    SizeMismatch { expected: usize, got: usize },
    /// `width * height` does not fit in `usize`.
    DimensionsOverflow { width: u32, height: u32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "coordinate ({x}, {y}) is out of range for a {width}x{height} grid"
            ),
            Self::SizeMismatch { expected, got } => {
                write!(f, "expected {expected} cells, got {got}")
            }
            Self::DimensionsOverflow { width, height } => {
                write!(f, "a {width}x{height} grid has more cells than fit in memory")
            }
        }
    }
}

impl core::error::Error for GridError {}

/// Errors reported while building a [`ScriptTable`](crate::ScriptTable).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptError {
    /// A codepoint range was empty or overlapped another range.
    InvalidRange {
        script: &'static str,
        start: u32,
        end: u32,
    },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange { script, start, end } => write!(
                f,
                "{script} codepoint range [{start}, {end}) is empty or overlapping"
            ),
        }
    }
}

impl core::error::Error for ScriptError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn out_of_range_message() {
        let err = GridError::OutOfRange {
            x: 3,
            y: 0,
            width: 2,
            height: 2,
        };
        assert_eq!(
            err.to_string(),
            "coordinate (3, 0) is out of range for a 2x2 grid"
        );
    }

    #[test]
    fn size_mismatch_message() {
        let err = GridError::SizeMismatch {
            expected: 6,
            got: 5,
        };
        assert_eq!(err.to_string(), "expected 6 cells, got 5");
    }

    #[test]
    fn invalid_range_message() {
        let err = ScriptError::InvalidRange {
            script: "Greek",
            start: 5,
            end: 5,
        };
        assert_eq!(
            err.to_string(),
            "Greek codepoint range [5, 5) is empty or overlapping"
        );
    }
}
