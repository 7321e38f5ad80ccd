//! Status enumerations and their badge tones.

use serde::{Deserialize, Serialize};

/// Badge colouring for a status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BadgeTone {
    Positive,
    Warning,
    Negative,
    Neutral,
}

impl BadgeTone {
    /// Badge colour as RGB.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            BadgeTone::Positive => (0x2E, 0x7D, 0x32),
            BadgeTone::Warning => (0xF5, 0x7F, 0x17),
            BadgeTone::Negative => (0xD3, 0x2F, 0x2F),
            BadgeTone::Neutral => (0x61, 0x61, 0x61),
        }
    }
}

/// A small closed set of lifecycle states.
pub trait StatusEnum: Sized + Copy + PartialEq + 'static {
    /// Every variant, in display order.
    fn all() -> &'static [Self];

    /// Display label, also the value matched by status filters.
    fn label(&self) -> &'static str;

    fn tone(&self) -> BadgeTone;

    /// Parse a label, case-insensitively.
    fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::all()
            .iter()
            .copied()
            .find(|s| s.label().eq_ignore_ascii_case(input))
    }
}
