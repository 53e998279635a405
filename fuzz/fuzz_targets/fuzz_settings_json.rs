#![no_main]

use focus_countdown::config::SettingsModel;
use focus_countdown::config::models::{MAX_CARD_WIDTH, MAX_FONT_SCALE, MAX_OPACITY, MIN_CARD_WIDTH, MIN_FONT_SCALE};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary stored settings must never panic and must always honour the ranges
    if let Ok(s) = std::str::from_utf8(data) {
        let model = SettingsModel::load(Some(s));
        let settings = model.get();
        assert!((MIN_CARD_WIDTH..=MAX_CARD_WIDTH).contains(&settings.card_width));
        assert!((MIN_FONT_SCALE..=MAX_FONT_SCALE).contains(&settings.font_size_scale));
        assert!(settings.bg_opacity <= MAX_OPACITY);
    }
});
