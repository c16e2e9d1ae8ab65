//! Cosmetic label palette for tasks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed palette of label colours a task may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelColor {
    /// Deep blue.
    Sapphire,
    /// Green.
    Emerald,
    /// Warm yellow.
    Amber,
    /// Purple.
    Orchid,
    /// Neutral grey.
    Slate,
}

impl LabelColor {
    /// Every palette entry, in display order.
    pub const ALL: [Self; 5] = [
        Self::Sapphire,
        Self::Emerald,
        Self::Amber,
        Self::Orchid,
        Self::Slate,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sapphire => "sapphire",
            Self::Emerald => "emerald",
            Self::Amber => "amber",
            Self::Orchid => "orchid",
            Self::Slate => "slate",
        }
    }

    /// Maps an arbitrary client value onto the palette.
    ///
    /// Unknown values yield `None` instead of an error: an unrecognised colour
    /// clears the label rather than rejecting the request.
    #[must_use]
    pub fn sanitize(value: Option<&str>) -> Option<Self> {
        let normalized = value?.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == normalized)
    }
}

impl fmt::Display for LabelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
