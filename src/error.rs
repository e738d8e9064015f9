//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;
use crate::loader::TransportError;

/// Errors produced by the wcurve crate.
#[derive(Debug)]
pub enum WCurveError {
    /// Curve data did not parse as an array of `[x, y, r, g, b]` records.
    Parse(String),
    /// The transport could not deliver the curve body.
    Transport(TransportError),
    /// Malformed FASTA input.
    Fasta(String),
    /// A segment color patch addressed a segment past the end of the curve.
    SegmentOutOfRange {
        /// The requested segment index.
        segment: usize,
        /// Number of segments in the target line-strip.
        segment_count: usize,
    },
    /// No scene object is registered under the given handle.
    UnknownObject(u32),
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for WCurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "curve parse error: {msg}"),
            Self::Transport(e) => write!(f, "transport error: {e}"),
            Self::Fasta(msg) => write!(f, "FASTA error: {msg}"),
            Self::SegmentOutOfRange {
                segment,
                segment_count,
            } => write!(
                f,
                "segment {segment} out of range (curve has {segment_count} \
                 segments)"
            ),
            Self::UnknownObject(id) => {
                write!(f, "no scene object with handle {id}")
            }
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for WCurveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Gpu(e) => Some(e),
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for WCurveError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for WCurveError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<TransportError> for WCurveError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl From<serde_json::Error> for WCurveError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
