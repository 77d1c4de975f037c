//! Score scheduling: absolute sample times to block-relative events.

use reeser_config::ScoreNote;
use reeser_synth::{EventKind, NoteEvent};

/// An event at an absolute sample position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedEvent {
    /// Sample index from the start of the render.
    pub sample: u64,
    /// The event.
    pub kind: EventKind,
}

/// Order of events that share a sample: wheel moves land before the note
/// they belong to, and releases before new notes.
fn priority(kind: &EventKind) -> u8 {
    match kind {
        EventKind::PitchBend { .. } => 0,
        EventKind::NoteOff { .. } | EventKind::AllNotesOff => 1,
        EventKind::NoteOn { .. } => 2,
    }
}

fn to_sample(secs: f64, sample_rate: u32) -> u64 {
    (secs.max(0.0) * f64::from(sample_rate)).round() as u64
}

/// All events of a score, sorted by sample.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    events: Vec<TimedEvent>,
}

impl Schedule {
    /// Convert score notes into note-on/note-off pairs (plus an optional
    /// pitch-wheel move) at `sample_rate`.
    pub fn from_notes(notes: &[ScoreNote], sample_rate: u32) -> Self {
        let mut events = Vec::with_capacity(notes.len() * 3);
        for note in notes {
            let on = to_sample(note.start, sample_rate);
            let off = to_sample(note.end(), sample_rate).max(on + 1);
            if let Some(value) = note.bend {
                events.push(TimedEvent {
                    sample: on,
                    kind: EventKind::PitchBend { value },
                });
            }
            events.push(TimedEvent {
                sample: on,
                kind: EventKind::NoteOn { note: note.note },
            });
            events.push(TimedEvent {
                sample: off,
                kind: EventKind::NoteOff { note: note.note },
            });
        }
        // stable: equal keys keep score order
        events.sort_by_key(|e| (e.sample, priority(&e.kind)));
        Self { events }
    }

    /// Every event, in render order.
    pub fn events(&self) -> &[TimedEvent] {
        &self.events
    }

    /// Sample of the last event, or 0 when empty.
    pub fn end_sample(&self) -> u64 {
        self.events.last().map_or(0, |e| e.sample)
    }

    /// Fill `out` with the events inside `[start, start + frames)`, offsets
    /// relative to `start`.
    pub fn block_events(&self, start: u64, frames: usize, out: &mut Vec<NoteEvent>) {
        out.clear();
        let end = start + frames as u64;
        let lo = self.events.partition_point(|e| e.sample < start);
        let hi = self.events.partition_point(|e| e.sample < end);
        out.extend(
            self.events[lo..hi]
                .iter()
                .map(|e| NoteEvent::new((e.sample - start) as usize, e.kind)),
        );
    }
}
