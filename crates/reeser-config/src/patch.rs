//! Patch file format and operations.

use reeser_synth::{DEFAULT_GAIN, SynthParams, Waveform};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// A synth patch: the three host parameters, render settings, and an
/// optional note score.
///
/// # TOML Format
///
/// ```toml
/// name = "Reese"
/// description = "Classic detuned saw bass"
/// sample_rate = 48000
/// block_size = 512
///
/// [params]
/// detune_amount = 30.0
/// waveform = 1
/// gain = 0.7
///
/// [[notes]]
/// note = 38
/// start = 0.0
/// length = 1.5
///
/// [[notes]]
/// note = 41
/// start = 1.5
/// length = 0.5
/// bend = 10240
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patch {
    /// Name of the patch.
    pub name: String,

    /// Optional description of the patch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sample rate hint (defaults to 48000).
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Frames per render block (defaults to 512).
    #[serde(default = "default_block_size")]
    pub block_size: usize,

    /// Host parameter values.
    #[serde(default)]
    pub params: PatchParams,

    /// Notes to play when the patch is rendered.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<ScoreNote>,
}

fn default_sample_rate() -> u32 {
    48000
}

fn default_block_size() -> usize {
    512
}

/// The persisted host parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PatchParams {
    /// Detune control, 0 to 100.
    pub detune_amount: f32,
    /// Waveform selector: 0 sine, 1 saw, 2 square.
    pub waveform: i32,
    /// Output gain, 0 to 1.
    pub gain: f32,
}

impl Default for PatchParams {
    fn default() -> Self {
        Self {
            detune_amount: 0.0,
            waveform: 0,
            gain: DEFAULT_GAIN,
        }
    }
}

impl PatchParams {
    /// Waveform the selector resolves to.
    pub fn waveform(&self) -> Waveform {
        Waveform::from_selector(self.waveform)
    }
}

impl From<PatchParams> for SynthParams {
    fn from(p: PatchParams) -> Self {
        SynthParams::new(p.detune_amount, p.waveform, p.gain)
    }
}

impl From<SynthParams> for PatchParams {
    fn from(p: SynthParams) -> Self {
        Self {
            detune_amount: p.detune_amount,
            waveform: p.waveform,
            gain: p.gain,
        }
    }
}

/// One note of a patch score. Times are in seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoreNote {
    /// MIDI note number.
    pub note: u8,
    /// Start time.
    pub start: f64,
    /// Held duration.
    pub length: f64,
    /// Pitch wheel value sent just before the note starts. The wheel keeps
    /// its previous position when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bend: Option<u16>,
}

impl ScoreNote {
    /// Note held from `start` for `length` seconds.
    pub fn new(note: u8, start: f64, length: f64) -> Self {
        Self {
            note,
            start,
            length,
            bend: None,
        }
    }

    /// Send `bend` before the note starts.
    pub fn with_bend(mut self, bend: u16) -> Self {
        self.bend = Some(bend);
        self
    }

    /// Release time.
    pub fn end(&self) -> f64 {
        self.start + self.length
    }
}

impl Patch {
    /// Create a patch with default settings and no notes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: default_sample_rate(),
            block_size: default_block_size(),
            params: PatchParams::default(),
            notes: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sample rate hint.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the render block size.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Set the host parameters.
    pub fn with_params(mut self, params: PatchParams) -> Self {
        self.params = params;
        self
    }

    /// Append a note to the score.
    pub fn with_note(mut self, note: ScoreNote) -> Self {
        self.notes.push(note);
        self
    }

    /// Load a patch from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let patch: Patch = toml::from_str(&content)?;
        Ok(patch)
    }

    /// Load a patch from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the patch to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the patch to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parameter snapshot for the engine.
    pub fn synth_params(&self) -> SynthParams {
        self.params.into()
    }

    /// Time at which the last note is released, or 0 for an empty score.
    pub fn duration_secs(&self) -> f64 {
        self.notes.iter().map(ScoreNote::end).fold(0.0, f64::max)
    }
}

impl Default for Patch {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
