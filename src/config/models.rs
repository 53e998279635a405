//! Widget data models
//!
//! This module defines the data structures persisted by the widget. Field
//! names are camelCase on disk so previously stored data keeps loading.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lower bound for `card_width` in pixels
pub const MIN_CARD_WIDTH: u32 = 200;
/// Upper bound for `card_width` in pixels
pub const MAX_CARD_WIDTH: u32 = 600;
/// Lower bound for `font_size_scale`
pub const MIN_FONT_SCALE: f64 = 0.5;
/// Upper bound for `font_size_scale`
pub const MAX_FONT_SCALE: f64 = 2.0;
/// Upper bound for `bg_opacity` (percent)
pub const MAX_OPACITY: u8 = 100;

/// Layout of the widget card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DisplayMode {
    /// Exam name, countdown, target date and quote
    Standard,
    /// Exam name and countdown only
    Minimal,
}

/// Text colour choices offered by the settings panel
///
/// Older data stored CSS class names (`text-white`, ...); those are accepted
/// as aliases on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeColor {
    /// White text
    #[serde(alias = "text-white")]
    White,
    /// Near-black text
    #[serde(alias = "text-gray-900")]
    Black,
    /// Red text
    #[serde(alias = "text-red-500")]
    Red,
    /// Blue text
    #[serde(alias = "text-blue-500")]
    Blue,
    /// Emerald text
    #[serde(alias = "text-emerald-500")]
    Green,
    /// Light gray text
    #[serde(alias = "text-gray-400")]
    Gray,
    /// Yellow text
    #[serde(alias = "text-yellow-400")]
    Yellow,
}

/// Where refreshed quotes come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    /// Built-in quote list
    Default,
    /// Remote quote generator, falling back to the built-in list
    Ai,
    /// User-maintained list, falling back to the built-in list when empty
    Custom,
}

/// How often the quote is expected to change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteUpdateFreq {
    /// Once per day
    Daily,
    /// On every manual refresh
    Random,
}

/// A motivational quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Quote text
    pub text: String,
    /// Attribution, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Quote {
    /// Create a quote with an attribution
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: Some(source.into()),
        }
    }
}

/// A countdown target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    /// Unique identifier (creation instant in epoch milliseconds, or a seeded id)
    pub id: String,
    /// Display name
    pub name: String,
    /// Exam day
    pub date: NaiveDate,
    /// Seeded defaults cannot be deleted
    #[serde(default)]
    pub is_default: bool,
}

/// Widget top-left corner in screen space
///
/// Unconstrained: the widget may sit partially or fully off-screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Position {
    /// Create a new position
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(50.0, 50.0)
    }
}

/// Canonical widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSettings {
    /// Card layout
    pub display_mode: DisplayMode,
    /// Card width in pixels (200-600)
    pub card_width: u32,
    /// Content scale factor (0.5-2.0)
    pub font_size_scale: f64,
    /// Text colour
    pub text_color: ThemeColor,
    /// Card background as `#rrggbb`
    pub background_color: String,
    /// Card background opacity in percent (0-100)
    pub bg_opacity: u8,
    /// Show the target date under the countdown
    pub show_date: bool,
    /// Show the current quote
    pub show_quote: bool,
    /// Quote pool used on refresh
    pub quote_source: QuoteSource,
    /// User-maintained quotes
    pub custom_quotes: Vec<Quote>,
    /// Position lock; dragging is refused while set
    pub is_locked: bool,
    /// Visual click-through simulation
    pub is_click_through: bool,
    /// Keep the overlay above other windows
    pub always_on_top: bool,
    /// Expected quote rotation
    pub quote_update_freq: QuoteUpdateFreq,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::Standard,
            card_width: 320,
            font_size_scale: 1.0,
            text_color: ThemeColor::White,
            background_color: "#000000".to_string(),
            bg_opacity: 20,
            show_date: true,
            show_quote: true,
            quote_source: QuoteSource::Default,
            custom_quotes: vec![Quote::new("加油，你是最棒的！", "自己")],
            is_locked: false,
            is_click_through: false,
            always_on_top: true,
            quote_update_freq: QuoteUpdateFreq::Daily,
        }
    }
}

impl WidgetSettings {
    /// Force every numeric field into its documented range
    pub fn clamp_ranges(&mut self) {
        self.card_width = self.card_width.clamp(MIN_CARD_WIDTH, MAX_CARD_WIDTH);
        self.font_size_scale = if self.font_size_scale.is_finite() {
            self.font_size_scale.clamp(MIN_FONT_SCALE, MAX_FONT_SCALE)
        } else {
            1.0
        };
        self.bg_opacity = self.bg_opacity.min(MAX_OPACITY);
    }

    /// Card background as `(r, g, b, alpha)`, alpha derived from `bg_opacity`
    ///
    /// An unparseable colour renders as black.
    pub fn background_rgba(&self) -> (u8, u8, u8, f32) {
        let (r, g, b) = parse_hex_color(&self.background_color).unwrap_or((0, 0, 0));
        (r, g, b, f32::from(self.bg_opacity) / 100.0)
    }
}

/// Parse `#rrggbb` (leading `#` optional, case-insensitive)
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
