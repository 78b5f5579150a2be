//! Embedded slot tables for the icon sheets this repository ships.
//!
//! Each preset lists, in row-major order, which plugin every sheet slot
//! belongs to. Editing these tables (or adding a new preset) is the way to
//! retarget the tool at a new sheet layout.

use crate::{slots, SlotTable};

/// Every preset name accepted by [`by_name`].
pub const NAMES: [&str; 2] = ["plugin-pack", "tts-pack"];

/// Looks up a preset table by name.
///
/// # Example
/// ```
/// use iconsplit::presets;
///
/// assert_eq!(presets::by_name("plugin-pack").unwrap().len(), 16);
/// assert!(presets::by_name("unknown").is_none());
/// ```
pub fn by_name(name: &str) -> Option<SlotTable> {
    match name {
        "plugin-pack" => Some(plugin_pack()),
        "tts-pack" => Some(tts_pack()),
        _ => None,
    }
}

/// The 4x4 sheet holding the theme, engine, and Piper TTS icons.
///
/// The bottom-right slot is empty.
pub fn plugin_pack() -> SlotTable {
    slots![
        // Row 1
        ("themes", "nordic-frost"),
        ("themes", "sakura-night"),
        ("themes", "cyber-neon"),
        ("themes", "arctic-aurora"),
        // Row 2
        ("themes", "desert-sand"),
        ("themes", "vintage-sepia"),
        ("themes", "mint-fresh"),
        ("themes", "coffee-bean"),
        // Row 3
        ("themes", "royal-velvet"),
        ("themes", "slate-gray"),
        ("themes", "coral-reef"),
        ("engines", "graalvm-engine"),
        // Row 4
        ("engines", "j2v8-engine"),
        ("engines", "quickjs-engine"),
        ("tts", "piper-tts"),
        _,
    ]
}

/// The 4x4 sheet holding the Gradio TTS provider icons.
///
/// The last three slots are empty.
pub fn tts_pack() -> SlotTable {
    slots![
        // Row 1
        ("tts", "gradio-edge-tts"),
        ("tts", "gradio-persian-edge-tts"),
        ("tts", "gradio-persian-chatterbox"),
        ("tts", "gradio-persian-piper"),
        // Row 2
        ("tts", "gradio-xtts-v2"),
        ("tts", "gradio-persian-xtts"),
        ("tts", "gradio-bark-tts"),
        ("tts", "gradio-parler-tts"),
        // Row 3
        ("tts", "gradio-style-tts-2"),
        ("tts", "gradio-tortoise-tts"),
        ("tts", "gradio-silero-tts"),
        ("tts", "gradio-openvoice"),
        // Row 4
        ("tts", "gradio-fish-speech"),
        _,
        _,
        _,
    ]
}
