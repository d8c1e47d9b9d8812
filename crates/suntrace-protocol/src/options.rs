use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use suntrace_core::constants::{DEFAULT_MAX_UNKNOWN_FRAME_LEN, DEFAULT_MAX_UNKNOWN_TAIL_LEN};

/// Configuration for [`Parser`](crate::Parser)
///
/// Missing keys take their default value when deserialized, so an
/// embedding service can keep only the overrides in its own config. Caps
/// are non-zero; a config setting one to 0 fails to deserialize.
///
/// # Example
///
/// ```
/// use suntrace_protocol::ParserOptions;
///
/// let options = ParserOptions {
///     skip_unknown_frames: true,
///     ..Default::default()
/// };
/// assert_eq!(options.max_unknown_frame_len.get(), 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Consume frames with an unrecognized header up to the next CR and keep
    /// going, instead of stopping the stream
    pub skip_unknown_frames: bool,

    /// Maximum bytes consumed when skipping an unrecognized frame
    pub max_unknown_frame_len: NonZeroUsize,

    /// Maximum bytes of undocumented trailing fields on ST300 models
    pub max_unknown_tail_len: NonZeroUsize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            skip_unknown_frames: false,
            max_unknown_frame_len: DEFAULT_MAX_UNKNOWN_FRAME_LEN,
            max_unknown_tail_len: DEFAULT_MAX_UNKNOWN_TAIL_LEN,
        }
    }
}
