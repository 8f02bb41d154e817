//! Built-in voice name table.
//!
//! Configs may name a voice ("Clara") or pass a raw provider voice ID. Names in
//! this table map to their provider IDs; anything else passes through untouched.

/// A named voice offered by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetVoice {
    /// Display name.
    pub name: &'static str,
    /// Provider voice ID.
    pub id: &'static str,
}

/// Voices offered by default, in display order.
pub const PRESET_VOICES: &[PresetVoice] = &[
    PresetVoice {
        name: "Clara",
        id: "Qggl4b0xRMiqOwhPtVWT",
    },
    PresetVoice {
        name: "Anne",
        id: "flHkNRp1BlvT73UL6gyz",
    },
    PresetVoice {
        name: "Emma",
        id: "56bWURjYFHyYyVf490Dp",
    },
    PresetVoice {
        name: "Sadie",
        id: "bD9maNcCuQQS75DGuteM",
    },
    PresetVoice {
        name: "Brian",
        id: "nPczCjzI2devNBz1zQrb",
    },
    PresetVoice {
        name: "Charlie",
        id: "IKne3meq5aSn9XLyUdCD",
    },
    PresetVoice {
        name: "Jon",
        id: "Cz0K1kOv9tD8l0b5Qu53",
    },
    PresetVoice {
        name: "Clancy",
        id: "FLpz0UhC9a7CIfUSBo6S",
    },
];

/// Resolves a voice name to its provider ID.
///
/// Name matching is case-insensitive. Unknown names and raw IDs are returned
/// unchanged.
///
/// # Example
/// ```
/// use entrain_spec::resolve_voice_id;
///
/// assert_eq!(resolve_voice_id("Clara"), "Qggl4b0xRMiqOwhPtVWT");
/// assert_eq!(resolve_voice_id("clara"), "Qggl4b0xRMiqOwhPtVWT");
/// assert_eq!(resolve_voice_id("custom-voice-id"), "custom-voice-id");
/// ```
pub fn resolve_voice_id(name_or_id: &str) -> &str {
    PRESET_VOICES
        .iter()
        .find(|v| v.name.eq_ignore_ascii_case(name_or_id))
        .map(|v| v.id)
        .unwrap_or(name_or_id)
}
