//! Game rules and tolerances
//!
//! Persisted in LocalStorage on the web. Only configuration lives here,
//! never round progress.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// How strictly an assembled sentence is judged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Strictness {
    /// Drag margin plus horizontal gap check
    #[default]
    Strict,
    /// Older, looser rules: no drag margin and no gap check
    Legacy,
}

impl Strictness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strictness::Strict => "Strict",
            Strictness::Legacy => "Legacy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "strict" => Some(Strictness::Strict),
            "legacy" | "loose" => Some(Strictness::Legacy),
            _ => None,
        }
    }

    pub fn drag_margin(&self) -> f32 {
        match self {
            Strictness::Strict => DRAG_MARGIN,
            Strictness::Legacy => 0.0,
        }
    }

    pub fn max_horizontal_gap(&self) -> Option<f32> {
        match self {
            Strictness::Strict => Some(MAX_HORIZONTAL_GAP),
            Strictness::Legacy => None,
        }
    }
}

/// Tunable rules for a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub strictness: Strictness,

    // === Dragging ===
    /// Keep-out band along every container edge while dragging
    pub drag_margin: f32,

    // === Win check ===
    /// Max vertical deviation from the leftmost card
    pub vertical_tolerance: f32,
    /// Max X distance between neighbours (`None` skips the check)
    pub max_horizontal_gap: Option<f32>,

    // === Scattering ===
    pub max_placement_attempts: u32,
    /// Size estimate used before a card is measured
    pub char_width: f32,
    pub card_padding: f32,
    pub approx_card_height: f32,

    // === Celebration ===
    pub celebration_margin: f32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            strictness: Strictness::Strict,
            drag_margin: DRAG_MARGIN,
            vertical_tolerance: VERTICAL_TOLERANCE,
            max_horizontal_gap: Some(MAX_HORIZONTAL_GAP),
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            char_width: APPROX_CHAR_WIDTH,
            card_padding: APPROX_CARD_PADDING,
            approx_card_height: APPROX_CARD_HEIGHT,
            celebration_margin: CELEBRATION_MARGIN,
        }
    }
}

impl Rules {
    /// Create rules from a strictness preset
    pub fn from_strictness(strictness: Strictness) -> Self {
        let mut rules = Self::default();
        rules.apply_strictness(strictness);
        rules
    }

    /// Apply a strictness preset (updates margin and gap check)
    pub fn apply_strictness(&mut self, strictness: Strictness) {
        self.strictness = strictness;
        self.drag_margin = strictness.drag_margin();
        self.max_horizontal_gap = strictness.max_horizontal_gap();
    }

    /// Parse rules from JSON
    ///
    /// The `strictness` preset is applied first; any field given explicitly
    /// overrides it, and everything else takes its default.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let overrides: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let strictness = match overrides.get("strictness") {
            Some(value) => serde_json::from_value(value.clone())?,
            None => Strictness::default(),
        };

        let mut merged = serde_json::to_value(Self::from_strictness(strictness))?;
        if let serde_json::Value::Object(base) = &mut merged {
            base.extend(overrides);
        }

        let rules: Self = serde_json::from_value(merged)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reject negative or non-finite distances
    pub fn validate(&self) -> Result<(), GameError> {
        let distances = [
            ("drag_margin", self.drag_margin),
            ("vertical_tolerance", self.vertical_tolerance),
            ("char_width", self.char_width),
            ("card_padding", self.card_padding),
            ("approx_card_height", self.approx_card_height),
            ("celebration_margin", self.celebration_margin),
        ];
        for (name, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(GameError::InvalidRules(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if let Some(gap) = self.max_horizontal_gap {
            if !gap.is_finite() || gap < 0.0 {
                return Err(GameError::InvalidRules(format!(
                    "max_horizontal_gap must be a non-negative number, got {gap}"
                )));
            }
        }
        Ok(())
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "word_line_rules";

    /// Load rules from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(rules) => {
                        log::info!("Loaded rules from LocalStorage ({})", rules.strictness.as_str());
                        return rules;
                    }
                    Err(e) => log::warn!("Ignoring stored rules: {}", e),
                }
            }
        }

        log::info!("Using default rules");
        Self::default()
    }

    /// Save rules to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Rules saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No storage on native, using default rules ({})", Self::STORAGE_KEY);
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
