//! Timestamped note and control events.
//!
//! Events arrive with a sample offset relative to the start of the block
//! they belong to. The renderer applies each event at exactly that sample.

use crate::error::{Result, SynthError};
use crate::tuning::PITCH_BEND_MAX;

/// Highest valid MIDI note number.
pub const MAX_NOTE: u8 = 127;

/// MIDI controller number for "All Notes Off".
const CC_ALL_NOTES_OFF: u8 = 123;

/// What an event does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// Start (or retrigger) a note.
    NoteOn {
        /// MIDI note number, 0..=127.
        note: u8,
    },
    /// Release a note.
    NoteOff {
        /// MIDI note number, 0..=127.
        note: u8,
    },
    /// Release everything.
    AllNotesOff,
    /// Move the pitch wheel.
    PitchBend {
        /// 14-bit wheel value, centered at 8192.
        value: u16,
    },
}

impl EventKind {
    /// Decode a raw MIDI channel-voice message.
    ///
    /// Channel bits are ignored. Note-on with velocity 0 is a note-off.
    /// Returns `None` for messages the engine does not act on and for
    /// truncated input.
    pub fn from_midi(bytes: &[u8]) -> Option<Self> {
        let (&status, data) = bytes.split_first()?;
        match status & 0xF0 {
            0x80 => Some(EventKind::NoteOff {
                note: *data.first()? & 0x7F,
            }),
            0x90 => {
                let note = *data.first()? & 0x7F;
                let velocity = *data.get(1)? & 0x7F;
                if velocity == 0 {
                    Some(EventKind::NoteOff { note })
                } else {
                    Some(EventKind::NoteOn { note })
                }
            }
            0xB0 => (*data.first()? == CC_ALL_NOTES_OFF).then_some(EventKind::AllNotesOff),
            0xE0 => {
                let lsb = u16::from(*data.first()? & 0x7F);
                let msb = u16::from(*data.get(1)? & 0x7F);
                Some(EventKind::PitchBend {
                    value: (msb << 7) | lsb,
                })
            }
            _ => None,
        }
    }

    /// Check note and wheel ranges.
    pub fn validate(&self) -> Result<()> {
        match *self {
            EventKind::NoteOn { note } | EventKind::NoteOff { note } if note > MAX_NOTE => {
                Err(SynthError::NoteOutOfRange(usize::from(note)))
            }
            EventKind::PitchBend { value } if value > PITCH_BEND_MAX => {
                Err(SynthError::PitchBendOutOfRange(value))
            }
            _ => Ok(()),
        }
    }
}

/// An event placed at a sample offset within a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoteEvent {
    /// Sample offset from the start of the block.
    pub offset: usize,
    /// The event itself.
    pub kind: EventKind,
}

impl NoteEvent {
    /// Create an event at `offset`.
    pub fn new(offset: usize, kind: EventKind) -> Self {
        Self { offset, kind }
    }

    /// Note-on at `offset`.
    pub fn note_on(offset: usize, note: u8) -> Self {
        Self::new(offset, EventKind::NoteOn { note })
    }

    /// Note-off at `offset`.
    pub fn note_off(offset: usize, note: u8) -> Self {
        Self::new(offset, EventKind::NoteOff { note })
    }

    /// All-notes-off at `offset`.
    pub fn all_notes_off(offset: usize) -> Self {
        Self::new(offset, EventKind::AllNotesOff)
    }

    /// Pitch wheel move at `offset`.
    pub fn pitch_bend(offset: usize, value: u16) -> Self {
        Self::new(offset, EventKind::PitchBend { value })
    }
}

/// Check a block's events before any of them is applied.
///
/// Offsets must be below `frames` and non-decreasing; equal offsets keep
/// their arrival order. Note and wheel values must be in range.
pub fn validate_events(events: &[NoteEvent], frames: usize) -> Result<()> {
    let mut previous = 0;
    for (index, event) in events.iter().enumerate() {
        if event.offset >= frames {
            return Err(SynthError::EventOffsetOutOfRange {
                offset: event.offset,
                frames,
            });
        }
        if event.offset < previous {
            return Err(SynthError::EventsOutOfOrder { index });
        }
        event.kind.validate()?;
        previous = event.offset;
    }
    Ok(())
}
