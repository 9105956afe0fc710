use bevy_ecs::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::events::UiInteraction;

/// Interaction kind that auto-triggers the loading state for a widget.
///
/// [`TriggerEvent::Off`] disables auto-triggering; state changes then only
/// happen through queued requests or direct calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerEvent {
    #[default]
    Off,
    Click,
    DoubleClick,
    Hover,
}

impl TriggerEvent {
    /// Parse a trigger name as written in raw entity attributes.
    pub fn parse(name: &str) -> Result<Self, LoadingConfigError> {
        match name {
            "off" => Ok(Self::Off),
            "click" => Ok(Self::Click),
            "double_click" => Ok(Self::DoubleClick),
            "hover" => Ok(Self::Hover),
            other => Err(LoadingConfigError::UnknownTrigger(other.to_string())),
        }
    }

    #[must_use]
    pub fn matches(self, interaction: UiInteraction) -> bool {
        match self {
            Self::Off => false,
            Self::Click => interaction == UiInteraction::Click,
            Self::DoubleClick => interaction == UiInteraction::DoubleClick,
            Self::Hover => interaction == UiInteraction::Hover,
        }
    }
}

/// Fully resolved configuration for one loading widget.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoadingOptions {
    /// Degrees added to the spinner rotation per animation tick.
    pub angle: i32,
    /// Milliseconds between animation ticks.
    pub interval: u64,
    /// Text displayed while loading.
    pub tips: String,
    /// Class token(s) selecting the spinner glyph.
    pub icon: String,
    /// Interaction kind that auto-triggers loading.
    pub trigger: TriggerEvent,
}

impl Default for LoadingOptions {
    fn default() -> Self {
        Self {
            angle: 15,
            interval: 50,
            tips: "loading...".to_string(),
            icon: "fa fa-refresh".to_string(),
            trigger: TriggerEvent::Off,
        }
    }
}

impl LoadingOptions {
    #[must_use]
    pub fn with_angle(mut self, angle: i32) -> Self {
        self.angle = angle;
        self
    }

    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_tips(mut self, tips: impl Into<String>) -> Self {
        self.tips = tips.into();
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    #[must_use]
    pub fn with_trigger(mut self, trigger: TriggerEvent) -> Self {
        self.trigger = trigger;
        self
    }

    /// Range checks that the typed schema cannot express.
    ///
    /// A repeating animation timer with a zero period has no meaning, so a
    /// zero `interval` is rejected before any attach effect runs.
    pub fn validate(&self) -> Result<(), LoadingConfigError> {
        if self.interval == 0 {
            return Err(LoadingConfigError::ZeroInterval);
        }
        Ok(())
    }
}

/// Partial configuration; `None` fields fall through to the next source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoadingOverrides {
    pub angle: Option<i32>,
    pub interval: Option<u64>,
    pub tips: Option<String>,
    pub icon: Option<String>,
    pub trigger: Option<TriggerEvent>,
}

impl LoadingOverrides {
    /// Take every set field from `overlay` into `self`.
    pub fn merge_from(&mut self, overlay: &LoadingOverrides) {
        if overlay.angle.is_some() {
            self.angle = overlay.angle;
        }
        if overlay.interval.is_some() {
            self.interval = overlay.interval;
        }
        if overlay.tips.is_some() {
            self.tips = overlay.tips.clone();
        }
        if overlay.icon.is_some() {
            self.icon = overlay.icon.clone();
        }
        if overlay.trigger.is_some() {
            self.trigger = overlay.trigger;
        }
    }

    /// Produce full options by overlaying the set fields onto `base`.
    #[must_use]
    pub fn apply_to(&self, base: &LoadingOptions) -> LoadingOptions {
        LoadingOptions {
            angle: self.angle.unwrap_or(base.angle),
            interval: self.interval.unwrap_or(base.interval),
            tips: self.tips.clone().unwrap_or_else(|| base.tips.clone()),
            icon: self.icon.clone().unwrap_or_else(|| base.icon.clone()),
            trigger: self.trigger.unwrap_or(base.trigger),
        }
    }
}

/// Resolve the effective options for one attachment.
///
/// Priority: inline entity attributes > per-call overrides > global defaults.
#[must_use]
pub fn resolve_options(
    defaults: &LoadingOptions,
    call: &LoadingOverrides,
    inline: &LoadingOverrides,
) -> LoadingOptions {
    inline.apply_to(&call.apply_to(defaults))
}

/// Raw string-typed configuration carried on markup-driven entities.
///
/// Values are kept as written; [`LoadingAttrs::validate`] parses them into
/// the typed schema and fails fast on anything unparseable instead of
/// letting bad numbers propagate into timer arithmetic.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoadingAttrs {
    pub angle: Option<String>,
    pub interval: Option<String>,
    pub tips: Option<String>,
    pub icon: Option<String>,
    pub trigger: Option<String>,
}

impl LoadingAttrs {
    /// Deserialize raw attributes from RON text.
    pub fn from_ron(text: &str) -> Result<Self, LoadingConfigError> {
        ron::from_str(text).map_err(|error| LoadingConfigError::Malformed(error.to_string()))
    }

    /// Parse the raw values into typed overrides.
    pub fn validate(&self) -> Result<LoadingOverrides, LoadingConfigError> {
        let angle = match &self.angle {
            Some(raw) => Some(parse_integer("angle", raw)?),
            None => None,
        };
        let interval = match &self.interval {
            Some(raw) => {
                let parsed: u64 = parse_integer("interval", raw)?;
                if parsed == 0 {
                    return Err(LoadingConfigError::ZeroInterval);
                }
                Some(parsed)
            }
            None => None,
        };
        let trigger = match &self.trigger {
            Some(raw) => Some(TriggerEvent::parse(raw)?),
            None => None,
        };

        Ok(LoadingOverrides {
            angle,
            interval,
            tips: self.tips.clone(),
            icon: self.icon.clone(),
            trigger,
        })
    }
}

fn parse_integer<T: std::str::FromStr>(
    field: &'static str,
    raw: &str,
) -> Result<T, LoadingConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| LoadingConfigError::InvalidInteger {
            field,
            value: raw.to_string(),
        })
}

/// Configuration failure reported by the attach path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadingConfigError {
    #[error("attribute `{field}` has non-integer value `{value}`")]
    InvalidInteger { field: &'static str, value: String },
    #[error("interval must be at least 1 millisecond")]
    ZeroInterval,
    #[error("unknown trigger event `{0}`")]
    UnknownTrigger(String),
    #[error("malformed loading attributes: {0}")]
    Malformed(String),
}

/// Defaults applied to every future attachment, owned by the [`App`](bevy_app::App).
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingDefaults {
    pub options: LoadingOptions,
}

impl LoadingDefaults {
    #[must_use]
    pub fn new(options: LoadingOptions) -> Self {
        Self { options }
    }

    /// Overlay new values onto the current defaults.
    ///
    /// Widgets attached earlier keep the options they resolved at attach.
    pub fn merge(&mut self, overrides: &LoadingOverrides) {
        self.options = overrides.apply_to(&self.options);
    }
}
