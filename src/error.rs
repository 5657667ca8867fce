use std::fmt;

/// Errors raised while evaluating or exporting the dyke temperature field.
#[derive(Debug)]
pub enum DykeError {
    /// Frame index outside the animation, or one that maps to a non-positive time.
    InvalidFrameIndex { frame: u32, reason: String },
    /// A temperature sample came out NaN or infinite.
    NumericDomain {
        frame: u32,
        index: usize,
        x: f64,
        value: f64,
    },
    /// Physical or animation parameters that cannot produce a valid field.
    InvalidProps(String),
    Io(std::io::Error),
    Json(serde_json::Error),
    Image(image::ImageError),
}

impl DykeError {
    pub fn invalid_frame(frame: u32, reason: impl Into<String>) -> Self {
        DykeError::InvalidFrameIndex {
            frame,
            reason: reason.into(),
        }
    }

    /// True for errors the evaluator raises about a single frame;
    /// the animation driver may skip these.
    pub fn is_frame_error(&self) -> bool {
        matches!(
            self,
            DykeError::InvalidFrameIndex { .. } | DykeError::NumericDomain { .. }
        )
    }
}

impl fmt::Display for DykeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DykeError::InvalidFrameIndex { frame, reason } => {
                write!(f, "invalid frame index {}: {}", frame, reason)
            }
            DykeError::NumericDomain {
                frame,
                index,
                x,
                value,
            } => write!(
                f,
                "non-finite temperature {} at frame {} (sample {}, x = {:.3})",
                value, frame, index, x
            ),
            DykeError::InvalidProps(msg) => write!(f, "invalid dyke props: {}", msg),
            DykeError::Io(e) => write!(f, "io error: {}", e),
            DykeError::Json(e) => write!(f, "failed to parse JSON: {}", e),
            DykeError::Image(e) => write!(f, "image error: {}", e),
        }
    }
}

impl std::error::Error for DykeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DykeError::Io(e) => Some(e),
            DykeError::Json(e) => Some(e),
            DykeError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DykeError {
    fn from(e: std::io::Error) -> Self {
        DykeError::Io(e)
    }
}

impl From<serde_json::Error> for DykeError {
    fn from(e: serde_json::Error) -> Self {
        DykeError::Json(e)
    }
}

impl From<image::ImageError> for DykeError {
    fn from(e: image::ImageError) -> Self {
        DykeError::Image(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_errors_are_skippable() {
        assert!(DykeError::invalid_frame(0, "zero time").is_frame_error());
        assert!(
            DykeError::NumericDomain {
                frame: 3,
                index: 20,
                x: 1.0,
                value: f64::NAN
            }
            .is_frame_error()
        );
        assert!(!DykeError::InvalidProps("half width".into()).is_frame_error());
    }

    #[test]
    fn test_display_mentions_frame() {
        let msg = DykeError::invalid_frame(0, "dimensionless time is zero").to_string();
        assert!(msg.contains("frame index 0"), "{}", msg);
        assert!(msg.contains("dimensionless time is zero"), "{}", msg);
    }
}
