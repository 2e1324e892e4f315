//! Transition configuration (parsed from TOML)

use super::{Direction, Fade, Scale, Sequence, Slide, SlideMode, Transition};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use tableau_core::{easing, Result, TableauError};

/// Longest accepted transition time
const MAX_TIME_MS: f32 = 60_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    MoveIn,
    MoveOut,
    Scroll,
    FadeIn,
    FadeOut,
    FadeInOut,
    ScaleIn,
    ScaleOut,
    ScaleInOut,
}

impl TransitionKind {
    pub const ALL: [TransitionKind; 9] = [
        TransitionKind::MoveIn,
        TransitionKind::MoveOut,
        TransitionKind::Scroll,
        TransitionKind::FadeIn,
        TransitionKind::FadeOut,
        TransitionKind::FadeInOut,
        TransitionKind::ScaleIn,
        TransitionKind::ScaleOut,
        TransitionKind::ScaleInOut,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionKind::MoveIn => "move_in",
            TransitionKind::MoveOut => "move_out",
            TransitionKind::Scroll => "scroll",
            TransitionKind::FadeIn => "fade_in",
            TransitionKind::FadeOut => "fade_out",
            TransitionKind::FadeInOut => "fade_in_out",
            TransitionKind::ScaleIn => "scale_in",
            TransitionKind::ScaleOut => "scale_out",
            TransitionKind::ScaleInOut => "scale_in_out",
        }
    }
}

impl FromStr for TransitionKind {
    type Err = TableauError;

    fn from_str(s: &str) -> Result<Self> {
        TransitionKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| TableauError::UnknownTransition(s.to_string()))
    }
}

/// A transition described in TOML:
///
/// ```toml
/// kind = "fade_in_out"
/// time_ms = 400
/// easing = "quad_out"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionConfig {
    pub kind: TransitionKind,
    #[serde(default = "default_time_ms")]
    pub time_ms: f32,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default = "default_easing")]
    pub easing: String,
}

fn default_time_ms() -> f32 {
    500.0
}

fn default_easing() -> String {
    "linear".to_string()
}

/// Document holding several named transitions under `[transitions.<name>]`
#[derive(Debug, Deserialize)]
struct TransitionFile {
    #[serde(default)]
    transitions: BTreeMap<String, TransitionConfig>,
}

impl TransitionConfig {
    pub fn new(kind: TransitionKind, time_ms: f32) -> Self {
        Self {
            kind,
            time_ms,
            direction: Direction::default(),
            easing: default_easing(),
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_easing(mut self, easing: impl Into<String>) -> Self {
        self.easing = easing.into();
        self
    }

    /// Parse and validate a single transition table
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse every `[transitions.<name>]` table of a document, validating each
    pub fn load_named(source: &str) -> Result<BTreeMap<String, TransitionConfig>> {
        let file: TransitionFile = toml::from_str(source)?;
        for (name, config) in &file.transitions {
            config
                .validate()
                .map_err(|e| TableauError::ConfigError(format!("transition '{name}': {e}")))?;
        }
        Ok(file.transitions)
    }

    /// Read and parse a `[transitions.<name>]` document from disk
    pub fn load_named_file(path: impl AsRef<Path>) -> Result<BTreeMap<String, TransitionConfig>> {
        let source = std::fs::read_to_string(path)?;
        Self::load_named(&source)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=MAX_TIME_MS).contains(&self.time_ms) {
            return Err(TableauError::ValueOutOfRange {
                field: "time_ms".to_string(),
                min: 0.0,
                max: MAX_TIME_MS as f64,
                value: self.time_ms as f64,
            });
        }
        easing::by_name(&self.easing)?;
        Ok(())
    }

    /// Construct the configured transition
    pub fn build(&self) -> Result<Box<dyn Transition>> {
        self.validate()?;
        let ease = easing::by_name(&self.easing)?;
        let time = self.time_ms;
        let dir = self.direction;
        let transition: Box<dyn Transition> = match self.kind {
            TransitionKind::MoveIn => Box::new(Slide::new(SlideMode::In, dir, time, ease)),
            TransitionKind::MoveOut => Box::new(Slide::new(SlideMode::Out, dir, time, ease)),
            TransitionKind::Scroll => Box::new(Slide::new(SlideMode::Scroll, dir, time, ease)),
            TransitionKind::FadeIn => Box::new(Fade::new(Sequence::In, time, ease)),
            TransitionKind::FadeOut => Box::new(Fade::new(Sequence::Out, time, ease)),
            TransitionKind::FadeInOut => Box::new(Fade::new(Sequence::InOut, time, ease)),
            TransitionKind::ScaleIn => Box::new(Scale::new(Sequence::In, time, ease)),
            TransitionKind::ScaleOut => Box::new(Scale::new(Sequence::Out, time, ease)),
            TransitionKind::ScaleInOut => Box::new(Scale::new(Sequence::InOut, time, ease)),
        };
        Ok(transition)
    }
}
