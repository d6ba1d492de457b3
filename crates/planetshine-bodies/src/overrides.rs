use std::collections::HashMap;

use planetshine_core::Rgba;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BodyConfigError {
    #[error("Failed to parse body settings RON: {0}")]
    ParseError(String),
    #[error("Body '{name}' has non-positive intensity {value}")]
    NonPositiveIntensity { name: String, value: f32 },
    #[error("Body '{name}' atmosphere ambient {value} outside [0, 1]")]
    AmbientOutOfRange { name: String, value: f32 },
    #[error("Body '{0}' is configured more than once")]
    DuplicateBody(String),
}

/// Albedo color setting of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorSetting {
    /// Sample the color automatically.
    Auto,
    /// Fixed 8-bit color.
    Rgb(u8, u8, u8),
}

impl ColorSetting {
    /// The fixed color, `None` for automatic.
    pub fn manual_color(self) -> Option<Rgba> {
        match self {
            ColorSetting::Auto => None,
            ColorSetting::Rgb(r, g, b) => Some(Rgba::from_rgb8(r, g, b)),
        }
    }
}

/// One body entry from the body settings file. Absent fields keep defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyOverride {
    pub name: String,
    #[serde(default)]
    pub color: Option<ColorSetting>,
    #[serde(default)]
    pub intensity: Option<f32>,
    #[serde(default)]
    pub atmosphere_ambient: Option<f32>,
}

/// Body overrides indexed by body name.
#[derive(Debug, Clone, Default)]
pub struct BodyOverrides {
    by_name: HashMap<String, BodyOverride>,
}

impl BodyOverrides {
    /// Parse a RON list of body entries. Problems are logged, not rejected:
    /// a repeated name replaces the earlier entry and bad values are clamped
    /// or ignored when the entry is applied.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, BodyConfigError> {
        let options = ron::Options::default();
        let entries: Vec<BodyOverride> = options
            .from_str(ron_str)
            .map_err(|e| BodyConfigError::ParseError(e.to_string()))?;

        if let Err(problems) = validate_overrides(&entries) {
            for problem in &problems {
                log::warn!("{}", problem);
            }
        }

        let mut overrides = Self::default();
        for entry in entries {
            overrides.insert(entry);
        }
        Ok(overrides)
    }

    pub fn insert(&mut self, entry: BodyOverride) {
        self.by_name.insert(entry.name.clone(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&BodyOverride> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Validate raw entries before indexing. Returns every problem found.
pub fn validate_overrides(entries: &[BodyOverride]) -> Result<(), Vec<BodyConfigError>> {
    let mut errors = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for entry in entries {
        if !seen.insert(entry.name.as_str()) {
            errors.push(BodyConfigError::DuplicateBody(entry.name.clone()));
        }
        if let Some(value) = entry.intensity {
            if value <= 0.0 {
                errors.push(BodyConfigError::NonPositiveIntensity {
                    name: entry.name.clone(),
                    value,
                });
            }
        }
        if let Some(value) = entry.atmosphere_ambient {
            if !(0.0..=1.0).contains(&value) {
                errors.push(BodyConfigError::AmbientOutOfRange {
                    name: entry.name.clone(),
                    value,
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
