//! Sample-accurate block rendering.
//!
//! A block is split at every event offset. Audio for the span before an
//! event is rendered with the state that held before it; the event is then
//! applied and rendering resumes at its offset. Everything is rendered into
//! channel 0 and copied verbatim into the other channels afterwards.

use crate::error::{Result, SynthError};
use crate::event::{EventKind, NoteEvent, validate_events};

/// A sound source that can be driven by [`process_block`].
///
/// Implementors add their output into `out` (the buffer is not cleared by
/// the renderer) and update their state in `apply_event`. Neither method
/// may allocate.
pub trait BlockVoice {
    /// Add audio for `out.len()` consecutive samples into `out`.
    fn render_span(&mut self, out: &mut [f32]);

    /// Apply one event at the current position.
    fn apply_event(&mut self, kind: &EventKind);
}

/// Render one block of `voice` into `channels`, applying `events` at their offsets.
///
/// All channels must have the same length. The whole batch is validated
/// first, so a rejected block leaves both the voice and the buffer
/// untouched. An empty channel list is treated as a zero-frame block.
///
/// # Example
///
/// ```rust
/// use reeser_synth::{BlockVoice, EventKind, NoteEvent, process_block};
///
/// struct Click(bool);
///
/// impl BlockVoice for Click {
///     fn render_span(&mut self, out: &mut [f32]) {
///         if let (true, Some(first)) = (self.0, out.first_mut()) {
///             *first += 1.0;
///             self.0 = false;
///         }
///     }
///     fn apply_event(&mut self, kind: &EventKind) {
///         self.0 = matches!(kind, EventKind::NoteOn { .. });
///     }
/// }
///
/// let mut left = [0.0f32; 8];
/// let mut right = [0.0f32; 8];
/// let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
/// process_block(&mut Click(false), &mut channels, &[NoteEvent::note_on(3, 60)]).unwrap();
/// assert_eq!(left[3], 1.0);
/// assert_eq!(right, left);
/// ```
pub fn process_block<V: BlockVoice + ?Sized>(
    voice: &mut V,
    channels: &mut [&mut [f32]],
    events: &[NoteEvent],
) -> Result<()> {
    validate_block(channels, events)?;

    let Some((first, rest)) = channels.split_first_mut() else {
        return Ok(());
    };

    let mut cursor = 0;
    for event in events {
        voice.render_span(&mut first[cursor..event.offset]);
        voice.apply_event(&event.kind);
        cursor = event.offset;
    }
    voice.render_span(&mut first[cursor..]);

    for channel in rest.iter_mut() {
        channel.copy_from_slice(first);
    }
    Ok(())
}

/// Check channel shape and events for one block without rendering.
///
/// Returns the block length in frames.
pub fn validate_block(channels: &[&mut [f32]], events: &[NoteEvent]) -> Result<usize> {
    let frames = channels.first().map_or(0, |c| c.len());
    for (channel, buf) in channels.iter().enumerate().skip(1) {
        if buf.len() != frames {
            return Err(SynthError::ChannelLengthMismatch {
                channel,
                expected: frames,
                found: buf.len(),
            });
        }
    }
    validate_events(events, frames)?;
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    /// Writes a constant level while "on" and records every span boundary.
    #[derive(Default)]
    struct Recorder {
        level: f32,
        spans: Vec<usize>,
        applied: Vec<EventKind>,
    }

    impl BlockVoice for Recorder {
        fn render_span(&mut self, out: &mut [f32]) {
            self.spans.push(out.len());
            for s in out.iter_mut() {
                *s += self.level;
            }
        }

        fn apply_event(&mut self, kind: &EventKind) {
            self.applied.push(*kind);
            self.level = match kind {
                EventKind::NoteOn { .. } => 1.0,
                _ => 0.0,
            };
        }
    }

    #[test]
    fn splits_at_event_offsets() {
        let mut voice = Recorder::default();
        let mut buf = vec![0.0f32; 16];
        let mut channels: [&mut [f32]; 1] = [&mut buf];
        let events = [NoteEvent::note_on(4, 60), NoteEvent::note_off(10, 60)];

        process_block(&mut voice, &mut channels, &events).unwrap();

        assert_eq!(voice.spans, vec![4, 6, 6]);
        assert!(buf[..4].iter().all(|&s| s == 0.0));
        assert!(buf[4..10].iter().all(|&s| s == 1.0));
        assert!(buf[10..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn coincident_events_apply_in_arrival_order() {
        let mut voice = Recorder::default();
        let mut buf = vec![0.0f32; 8];
        let mut channels: [&mut [f32]; 1] = [&mut buf];
        let events = [NoteEvent::note_off(2, 60), NoteEvent::note_on(2, 62)];

        process_block(&mut voice, &mut channels, &events).unwrap();

        assert_eq!(voice.spans, vec![2, 0, 6]);
        assert_eq!(
            voice.applied,
            vec![EventKind::NoteOff { note: 60 }, EventKind::NoteOn { note: 62 }]
        );
        assert!(buf[2..].iter().all(|&s| s == 1.0));
    }

    #[test]
    fn mirrors_channel_zero() {
        let mut voice = Recorder::default();
        let mut a = vec![0.0f32; 8];
        let mut b = vec![0.5f32; 8];
        let mut c = vec![-0.5f32; 8];
        let mut channels: [&mut [f32]; 3] = [&mut a, &mut b, &mut c];

        process_block(&mut voice, &mut channels, &[NoteEvent::note_on(5, 60)]).unwrap();

        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn accumulates_into_existing_content() {
        let mut voice = Recorder {
            level: 1.0,
            ..Recorder::default()
        };
        let mut buf = vec![0.25f32; 4];
        let mut channels: [&mut [f32]; 1] = [&mut buf];
        process_block(&mut voice, &mut channels, &[]).unwrap();
        assert!(buf.iter().all(|&s| s == 1.25));
    }

    #[test]
    fn rejected_block_touches_nothing() {
        let mut voice = Recorder::default();
        let mut buf = vec![0.0f32; 8];
        let mut channels: [&mut [f32]; 1] = [&mut buf];
        let events = [NoteEvent::note_on(1, 60), NoteEvent::note_on(9, 64)];

        let err = process_block(&mut voice, &mut channels, &events).unwrap_err();

        assert_eq!(
            err,
            SynthError::EventOffsetOutOfRange {
                offset: 9,
                frames: 8
            }
        );
        assert!(voice.spans.is_empty());
        assert!(voice.applied.is_empty());
    }

    #[test]
    fn rejects_ragged_channels() {
        let mut voice = Recorder::default();
        let mut a = vec![0.0f32; 8];
        let mut b = vec![0.0f32; 4];
        let mut channels: [&mut [f32]; 2] = [&mut a, &mut b];
        assert_eq!(
            process_block(&mut voice, &mut channels, &[]),
            Err(SynthError::ChannelLengthMismatch {
                channel: 1,
                expected: 8,
                found: 4
            })
        );
    }

    #[test]
    fn no_channels_is_an_empty_block() {
        let mut voice = Recorder::default();
        let mut channels: [&mut [f32]; 0] = [];
        assert_eq!(process_block(&mut voice, &mut channels, &[]), Ok(()));
        assert!(voice.spans.is_empty());
        assert!(
            process_block(&mut voice, &mut channels, &[NoteEvent::note_on(0, 60)]).is_err()
        );
    }
}
