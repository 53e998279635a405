//! Settings model: load, merge, update
//!
//! Stored settings are merged over the defaults field by field, so fields
//! introduced by later versions always have a value and a single bad field
//! never discards the rest of the user's configuration.

use crate::config::models::{
    DisplayMode, Quote, QuoteSource, QuoteUpdateFreq, ThemeColor, WidgetSettings, parse_hex_color,
};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Partial settings update; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    /// New card layout
    pub display_mode: Option<DisplayMode>,
    /// New card width (clamped)
    pub card_width: Option<u32>,
    /// New content scale (clamped)
    pub font_size_scale: Option<f64>,
    /// New text colour
    pub text_color: Option<ThemeColor>,
    /// New background colour; ignored unless `#rrggbb`
    pub background_color: Option<String>,
    /// New background opacity (clamped)
    pub bg_opacity: Option<u8>,
    /// Show or hide the target date
    pub show_date: Option<bool>,
    /// Show or hide the quote
    pub show_quote: Option<bool>,
    /// New quote pool
    pub quote_source: Option<QuoteSource>,
    /// Replacement custom quote list
    pub custom_quotes: Option<Vec<Quote>>,
    /// New lock state
    pub is_locked: Option<bool>,
    /// New click-through simulation state
    pub is_click_through: Option<bool>,
    /// New always-on-top state
    pub always_on_top: Option<bool>,
    /// New quote rotation
    pub quote_update_freq: Option<QuoteUpdateFreq>,
}

impl SettingsPatch {
    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply_to(self, settings: &mut WidgetSettings) {
        if let Some(mode) = self.display_mode {
            settings.display_mode = mode;
        }
        if let Some(width) = self.card_width {
            settings.card_width = width;
        }
        if let Some(scale) = self.font_size_scale {
            settings.font_size_scale = scale;
        }
        if let Some(color) = self.text_color {
            settings.text_color = color;
        }
        if let Some(color) = self.background_color {
            if parse_hex_color(&color).is_some() {
                settings.background_color = color;
            } else {
                warn!("Ignoring invalid background colour '{}'", color);
            }
        }
        if let Some(opacity) = self.bg_opacity {
            settings.bg_opacity = opacity;
        }
        if let Some(show) = self.show_date {
            settings.show_date = show;
        }
        if let Some(show) = self.show_quote {
            settings.show_quote = show;
        }
        if let Some(source) = self.quote_source {
            settings.quote_source = source;
        }
        if let Some(quotes) = self.custom_quotes {
            settings.custom_quotes = quotes;
        }
        if let Some(locked) = self.is_locked {
            settings.is_locked = locked;
        }
        if let Some(click_through) = self.is_click_through {
            settings.is_click_through = click_through;
        }
        if let Some(on_top) = self.always_on_top {
            settings.always_on_top = on_top;
        }
        if let Some(freq) = self.quote_update_freq {
            settings.quote_update_freq = freq;
        }
        settings.clamp_ranges();
    }
}

/// In-memory owner of the current widget settings
#[derive(Debug, Clone, Default)]
pub struct SettingsModel {
    current: WidgetSettings,
}

impl SettingsModel {
    /// Wrap an already-resolved settings value
    pub fn new(mut settings: WidgetSettings) -> Self {
        settings.clamp_ranges();
        Self { current: settings }
    }

    /// Build the model from the raw persisted JSON, if any
    ///
    /// Absent or unparseable input yields the defaults unmodified.
    pub fn load(raw: Option<&str>) -> Self {
        let defaults = WidgetSettings::default();
        let Some(raw) = raw else {
            info!("No stored settings, using defaults");
            return Self::new(defaults);
        };

        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(stored)) => Self::new(merge_with_defaults(&defaults, &stored)),
            Ok(other) => {
                warn!(
                    "Stored settings are not an object ({}), using defaults",
                    json_kind(&other)
                );
                Self::new(defaults)
            }
            Err(e) => {
                warn!("Failed to parse stored settings, using defaults: {}", e);
                Self::new(defaults)
            }
        }
    }

    /// Current settings
    pub fn get(&self) -> &WidgetSettings {
        &self.current
    }

    /// Apply a partial update and return the new snapshot
    pub fn update(&mut self, patch: SettingsPatch) -> WidgetSettings {
        if patch.is_empty() {
            return self.current.clone();
        }
        let mut next = self.current.clone();
        patch.apply_to(&mut next);
        debug!("Settings updated: {:?}", next);
        self.current = next;
        self.current.clone()
    }

    /// Flip the position lock and return the new state
    pub fn toggle_lock(&mut self) -> bool {
        self.current.is_locked = !self.current.is_locked;
        info!("Widget position lock: {}", self.current.is_locked);
        self.current.is_locked
    }

    /// Restore the appearance fields (scale, colours, opacity, width) to defaults
    pub fn reset_appearance(&mut self) -> WidgetSettings {
        let defaults = WidgetSettings::default();
        self.current.font_size_scale = defaults.font_size_scale;
        self.current.text_color = defaults.text_color;
        self.current.bg_opacity = defaults.bg_opacity;
        self.current.card_width = defaults.card_width;
        self.current.background_color = defaults.background_color;
        info!("Appearance settings reset to defaults");
        self.current.clone()
    }

    /// Append a custom quote; empty text is ignored, empty source becomes absent
    pub fn add_custom_quote(&mut self, text: &str, source: Option<&str>) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let source = source
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        self.current.custom_quotes.push(Quote {
            text: text.to_string(),
            source,
        });
        true
    }

    /// Remove the custom quote at `index`; out-of-range indices are ignored
    pub fn remove_custom_quote(&mut self, index: usize) -> bool {
        if index < self.current.custom_quotes.len() {
            self.current.custom_quotes.remove(index);
            true
        } else {
            false
        }
    }
}

/// Merge stored fields over `defaults`
///
/// Stored values win. Missing keys keep their default. Keys the current
/// version does not know are dropped, and a stored value that does not fit
/// its field's type is discarded with a warning. Ranges are clamped last.
pub fn merge_with_defaults(defaults: &WidgetSettings, stored: &Map<String, Value>) -> WidgetSettings {
    let Ok(Value::Object(mut merged)) = serde_json::to_value(defaults) else {
        return defaults.clone();
    };

    for (key, value) in stored {
        if !merged.contains_key(key) {
            debug!("Ignoring unknown stored setting '{}'", key);
            continue;
        }
        let previous = merged.insert(key.clone(), value.clone());
        if serde_json::from_value::<WidgetSettings>(Value::Object(merged.clone())).is_err() {
            warn!("Discarding stored setting '{}' with unexpected value {}", key, value);
            if let Some(previous) = previous {
                merged.insert(key.clone(), previous);
            }
        }
    }

    let mut settings =
        serde_json::from_value::<WidgetSettings>(Value::Object(merged)).unwrap_or_else(|e| {
            warn!("Merged settings failed to deserialize, using defaults: {}", e);
            defaults.clone()
        });
    settings.clamp_ranges();
    settings
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::{MAX_CARD_WIDTH, MAX_OPACITY};

    #[test]
    fn test_load_absent_uses_defaults() {
        let model = SettingsModel::load(None);
        assert_eq!(*model.get(), WidgetSettings::default());
    }

    #[test]
    fn test_load_malformed_uses_defaults() {
        for raw in ["", "{", "null", "[1,2]", "\"text\"", "42", "{\"cardWidth\":}"] {
            let model = SettingsModel::load(Some(raw));
            assert_eq!(*model.get(), WidgetSettings::default(), "input: {raw}");
        }
    }

    #[test]
    fn test_load_merges_partial_over_defaults() {
        let model = SettingsModel::load(Some(r#"{"bgOpacity":55,"isLocked":true}"#));
        let settings = model.get();
        assert_eq!(settings.bg_opacity, 55);
        assert!(settings.is_locked);
        // Untouched fields keep defaults
        assert_eq!(settings.card_width, 320);
        assert!(settings.always_on_top);
    }

    #[test]
    fn test_load_older_data_without_new_fields() {
        // Data written before cardWidth/backgroundColor/alwaysOnTop existed
        let raw = r#"{"displayMode":"MINIMAL","fontSizeScale":1.5,"textColor":"text-red-500",
            "bgOpacity":40,"showDate":false,"showQuote":true,"quoteSource":"custom",
            "customQuotes":[],"isLocked":false,"isClickThrough":true}"#;
        let settings = SettingsModel::load(Some(raw)).get().clone();
        assert_eq!(settings.display_mode, DisplayMode::Minimal);
        assert_eq!(settings.text_color, ThemeColor::Red);
        assert_eq!(settings.card_width, 320);
        assert_eq!(settings.background_color, "#000000");
        assert!(settings.always_on_top);
        assert!(settings.custom_quotes.is_empty());
    }

    #[test]
    fn test_load_discards_mistyped_field_only() {
        let model = SettingsModel::load(Some(r#"{"cardWidth":"wide","showDate":false}"#));
        assert_eq!(model.get().card_width, 320);
        assert!(!model.get().show_date);
    }

    #[test]
    fn test_load_clamps_out_of_range_values() {
        let model =
            SettingsModel::load(Some(r#"{"cardWidth":5000,"fontSizeScale":9.0,"bgOpacity":180}"#));
        assert_eq!(model.get().card_width, MAX_CARD_WIDTH);
        assert!((model.get().font_size_scale - 2.0).abs() < f64::EPSILON);
        assert_eq!(model.get().bg_opacity, MAX_OPACITY);
    }

    #[test]
    fn test_merge_empty_yields_defaults() {
        let defaults = WidgetSettings::default();
        assert_eq!(merge_with_defaults(&defaults, &Map::new()), defaults);
    }

    #[test]
    fn test_update_returns_snapshot() {
        let mut model = SettingsModel::default();
        let before = model.get().clone();
        let after = model.update(SettingsPatch {
            bg_opacity: Some(75),
            show_quote: Some(false),
            ..SettingsPatch::default()
        });
        assert_eq!(after.bg_opacity, 75);
        assert!(!after.show_quote);
        assert_eq!(before.bg_opacity, 20);
        assert_eq!(*model.get(), after);
    }

    #[test]
    fn test_update_rejects_invalid_colour() {
        let mut model = SettingsModel::default();
        let after = model.update(SettingsPatch {
            background_color: Some("purple".to_string()),
            ..SettingsPatch::default()
        });
        assert_eq!(after.background_color, "#000000");

        let after = model.update(SettingsPatch {
            background_color: Some("#336699".to_string()),
            ..SettingsPatch::default()
        });
        assert_eq!(after.background_color, "#336699");
    }

    #[test]
    fn test_update_clamps() {
        let mut model = SettingsModel::default();
        let after = model.update(SettingsPatch {
            card_width: Some(50),
            ..SettingsPatch::default()
        });
        assert_eq!(after.card_width, 200);
    }

    #[test]
    fn test_toggle_lock() {
        let mut model = SettingsModel::default();
        assert!(model.toggle_lock());
        assert!(!model.toggle_lock());
    }

    #[test]
    fn test_reset_appearance_keeps_behaviour_fields() {
        let mut model = SettingsModel::default();
        model.update(SettingsPatch {
            card_width: Some(480),
            bg_opacity: Some(90),
            text_color: Some(ThemeColor::Blue),
            background_color: Some("#ffffff".to_string()),
            font_size_scale: Some(1.4),
            show_date: Some(false),
            is_locked: Some(true),
            ..SettingsPatch::default()
        });
        let reset = model.reset_appearance();
        let defaults = WidgetSettings::default();
        assert_eq!(reset.card_width, defaults.card_width);
        assert_eq!(reset.bg_opacity, defaults.bg_opacity);
        assert_eq!(reset.text_color, defaults.text_color);
        assert_eq!(reset.background_color, defaults.background_color);
        assert!(!reset.show_date);
        assert!(reset.is_locked);
    }

    #[test]
    fn test_custom_quote_crud() {
        let mut model = SettingsModel::new(WidgetSettings {
            custom_quotes: Vec::new(),
            ..WidgetSettings::default()
        });
        assert!(!model.add_custom_quote("   ", Some("nobody")));
        assert!(model.add_custom_quote("Stay curious", Some("")));
        assert!(model.add_custom_quote("One step at a time", Some("Me")));
        assert_eq!(model.get().custom_quotes.len(), 2);
        assert_eq!(model.get().custom_quotes[0].source, None);

        assert!(!model.remove_custom_quote(5));
        assert!(model.remove_custom_quote(0));
        assert_eq!(model.get().custom_quotes[0].text, "One step at a time");
    }

    #[test]
    fn test_patch_deserializes_partially() {
        let patch: SettingsPatch = serde_json::from_str(r#"{"alwaysOnTop":false}"#).unwrap();
        assert_eq!(patch.always_on_top, Some(false));
        assert!(patch.card_width.is_none());
        assert!(!patch.is_empty());
    }
}
