//! Patch validation.
//!
//! Checks every host parameter, render setting, and score note against the
//! ranges the engine accepts. All violations are collected, not just the
//! first.
//!
//! # Example
//!
//! ```rust
//! use reeser_config::{Patch, PatchParams, validate_patch};
//!
//! let ok = Patch::new("Fine");
//! assert!(validate_patch(&ok).is_ok());
//!
//! let bad = Patch::new("Loud").with_params(PatchParams { gain: 3.0, ..PatchParams::default() });
//! assert!(validate_patch(&bad).is_err());
//! ```

use reeser_synth::{MAX_DETUNE_AMOUNT, MAX_NOTE, PITCH_BEND_MAX};
use thiserror::Error;

use crate::patch::{Patch, ScoreNote};

/// Lowest sample rate a patch may request.
pub const MIN_SAMPLE_RATE: u32 = 8000;

/// Highest sample rate a patch may request.
pub const MAX_SAMPLE_RATE: u32 = 384_000;

/// Largest render block a patch may request.
pub const MAX_BLOCK_SIZE: usize = 8192;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A value lies outside its allowed range.
    #[error("'{field}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Dotted path of the offending field.
        field: String,
        /// The value found.
        value: f64,
        /// Minimum allowed value.
        min: f64,
        /// Maximum allowed value.
        max: f64,
    },

    /// A score note has unusable timing.
    #[error("note {index}: {reason}")]
    InvalidNote {
        /// Position of the note in the score.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn check_range(
    errors: &mut Vec<ValidationError>,
    field: impl Into<String>,
    value: f64,
    min: f64,
    max: f64,
) {
    // NaN is never contained, so it is reported too
    if !(min..=max).contains(&value) {
        errors.push(ValidationError::OutOfRange {
            field: field.into(),
            value,
            min,
            max,
        });
    }
}

fn check_note(errors: &mut Vec<ValidationError>, index: usize, note: &ScoreNote) {
    check_range(
        errors,
        format!("notes[{index}].note"),
        f64::from(note.note),
        0.0,
        f64::from(MAX_NOTE),
    );
    if let Some(bend) = note.bend {
        check_range(
            errors,
            format!("notes[{index}].bend"),
            f64::from(bend),
            0.0,
            f64::from(PITCH_BEND_MAX),
        );
    }
    if !note.start.is_finite() || note.start < 0.0 {
        errors.push(ValidationError::InvalidNote {
            index,
            reason: format!("start {} must be a non-negative time", note.start),
        });
    }
    if !note.length.is_finite() || note.length <= 0.0 {
        errors.push(ValidationError::InvalidNote {
            index,
            reason: format!("length {} must be positive", note.length),
        });
    }
}

/// Validate a patch.
///
/// Returns the single violation, or [`ValidationError::Multiple`] when
/// there are several.
pub fn validate_patch(patch: &Patch) -> ValidationResult<()> {
    let mut errors = Vec::new();

    check_range(
        &mut errors,
        "sample_rate",
        f64::from(patch.sample_rate),
        f64::from(MIN_SAMPLE_RATE),
        f64::from(MAX_SAMPLE_RATE),
    );
    check_range(
        &mut errors,
        "block_size",
        patch.block_size as f64,
        1.0,
        MAX_BLOCK_SIZE as f64,
    );
    check_range(
        &mut errors,
        "params.detune_amount",
        f64::from(patch.params.detune_amount),
        0.0,
        f64::from(MAX_DETUNE_AMOUNT),
    );
    check_range(
        &mut errors,
        "params.waveform",
        f64::from(patch.params.waveform),
        0.0,
        2.0,
    );
    check_range(
        &mut errors,
        "params.gain",
        f64::from(patch.params.gain),
        0.0,
        1.0,
    );

    for (index, note) in patch.notes.iter().enumerate() {
        check_note(&mut errors, index, note);
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::PatchParams;

    #[test]
    fn default_patch_is_valid() {
        assert_eq!(validate_patch(&Patch::default()), Ok(()));
    }

    #[test]
    fn single_violation_is_reported_directly() {
        let patch = Patch::new("x").with_params(PatchParams {
            detune_amount: 120.0,
            ..PatchParams::default()
        });
        let err = validate_patch(&patch).unwrap_err();
        assert!(
            matches!(err, ValidationError::OutOfRange { ref field, .. } if field == "params.detune_amount")
        );
    }

    #[test]
    fn collects_every_violation() {
        let patch = Patch::new("x")
            .with_sample_rate(100)
            .with_block_size(0)
            .with_params(PatchParams {
                detune_amount: -1.0,
                waveform: 5,
                gain: 1.5,
            });
        match validate_patch(&patch).unwrap_err() {
            ValidationError::Multiple(errors) => assert_eq!(errors.len(), 5),
            other => panic!("expected Multiple, got {other:?}"),
        }
    }

    #[test]
    fn nan_gain_is_rejected() {
        let patch = Patch::new("x").with_params(PatchParams {
            gain: f32::NAN,
            ..PatchParams::default()
        });
        assert!(validate_patch(&patch).is_err());
    }

    #[test]
    fn score_notes_are_checked() {
        let patch = Patch::new("x")
            .with_note(ScoreNote::new(60, 0.0, 1.0))
            .with_note(ScoreNote::new(200, -1.0, 0.0).with_bend(20000));
        match validate_patch(&patch).unwrap_err() {
            ValidationError::Multiple(errors) => {
                assert_eq!(errors.len(), 4);
                assert!(errors.iter().all(|e| e.to_string().contains("1")));
            }
            other => panic!("expected Multiple, got {other:?}"),
        }
    }

    #[test]
    fn multiple_display_joins_messages() {
        let err = ValidationError::Multiple(vec![
            ValidationError::InvalidNote {
                index: 0,
                reason: "a".to_string(),
            },
            ValidationError::InvalidNote {
                index: 1,
                reason: "b".to_string(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "multiple validation errors: note 0: a; note 1: b"
        );
    }
}
