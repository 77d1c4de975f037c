//! Error types for the synthesis core.
//!
//! Every variant describes input the host adapter should have rejected
//! before calling into the engine. The engine checks a whole block up front
//! and returns one of these before touching any voice state.

use thiserror::Error;

/// Errors returned by the synthesis core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthError {
    /// `render` was called before `prepare`.
    #[error("engine has not been prepared; call prepare() before render()")]
    NotPrepared,

    /// Sample rate was zero, negative, or not finite.
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(f64),

    /// An event's sample offset lies outside the block.
    #[error("event offset {offset} is outside a block of {frames} frames")]
    EventOffsetOutOfRange {
        /// Offending sample offset.
        offset: usize,
        /// Number of frames in the block.
        frames: usize,
    },

    /// Event offsets decrease somewhere in the batch.
    #[error("event {index} is earlier than the event before it")]
    EventsOutOfOrder {
        /// Index of the first event whose offset went backwards.
        index: usize,
    },

    /// A note number above 127.
    #[error("note number {0} is outside 0..=127")]
    NoteOutOfRange(usize),

    /// A pitch wheel value above the 14-bit maximum.
    #[error("pitch wheel value {0} is outside 0..=16383")]
    PitchBendOutOfRange(u16),

    /// Output channels do not all have the same number of frames.
    #[error("channel {channel} has {found} frames, expected {expected}")]
    ChannelLengthMismatch {
        /// Index of the mismatched channel.
        channel: usize,
        /// Frame count of channel 0.
        expected: usize,
        /// Frame count of the mismatched channel.
        found: usize,
    },

    /// A host parameter was NaN, infinite, or outside its range.
    #[error("parameter '{name}' value {value} is outside [{min}, {max}]")]
    ParameterOutOfRange {
        /// Parameter name.
        name: &'static str,
        /// Value received.
        value: f32,
        /// Lowest accepted value.
        min: f32,
        /// Highest accepted value.
        max: f32,
    },

    /// A wavetable was built from zero samples.
    #[error("wavetable must contain at least one sample")]
    EmptyWavetable,
}

/// Convenience result type for the synthesis core.
pub type Result<T> = core::result::Result<T, SynthError>;
