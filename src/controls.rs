//! Slider controls and their mappings onto the tone engine

use std::fmt;
use std::str::FromStr;

/// Base frequency of the pitch slider (A3), value 0 on the slider
pub const PITCH_BASE_FREQUENCY: f32 = 220.;

/// Identifier of a sound control on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    Pitch,
    Volume,
    Reverb,
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ControlId::Pitch => "pitch",
            ControlId::Volume => "volume",
            ControlId::Reverb => "reverb",
        };
        f.write_str(s)
    }
}

/// A string was not a known control identifier
#[derive(Debug, Clone)]
pub struct UnknownControl(String);

impl fmt::Display for UnknownControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown control {:?}", self.0)
    }
}

impl std::error::Error for UnknownControl {}

impl FromStr for ControlId {
    type Err = UnknownControl;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pitch" => Ok(ControlId::Pitch),
            "volume" => Ok(ControlId::Volume),
            "reverb" => Ok(ControlId::Reverb),
            other => Err(UnknownControl(other.to_string())),
        }
    }
}

/// A control-value change event: the slider's identifier and its new value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlChange {
    pub id: ControlId,
    pub value: i32,
}

/// Map a pitch slider value to a frequency in Hertz.
///
/// Linear in octaves: 0..=100 spans 220 Hz to 880 Hz (A3 to A5), with 440 Hz
/// at the midpoint. Values outside the slider range extrapolate on the same
/// curve.
pub fn frequency_from_pitch(value: i32) -> f32 {
    PITCH_BASE_FREQUENCY * 2f32.powf(value as f32 / 50.)
}

/// Map a volume slider value to a gain factor, linear 0..=100 to 0.0..=1.0
pub fn gain_from_volume(value: i32) -> f32 {
    value as f32 / 100.
}
