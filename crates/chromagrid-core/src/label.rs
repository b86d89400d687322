use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Discrete color a sample or a grid cell resolves to.
///
/// The set is closed: every classified sample maps to exactly one label and
/// there is no blending between them.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorLabel {
    #[default]
    Undefined,
    Red,
    Green,
    Blue,
    Yellow,
    White,
    Black,
}

impl ColorLabel {
    /// All labels, `Undefined` first. Position matches [`ColorLabel::index`].
    pub const ALL: [ColorLabel; 7] = [
        ColorLabel::Undefined,
        ColorLabel::Red,
        ColorLabel::Green,
        ColorLabel::Blue,
        ColorLabel::Yellow,
        ColorLabel::White,
        ColorLabel::Black,
    ];

    /// The six semantic palette colors.
    pub const PALETTE: [ColorLabel; 6] = [
        ColorLabel::Red,
        ColorLabel::Green,
        ColorLabel::Blue,
        ColorLabel::Yellow,
        ColorLabel::White,
        ColorLabel::Black,
    ];

    /// Dense index in `0..7`, usable for per-label counters.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            ColorLabel::Undefined => 0,
            ColorLabel::Red => 1,
            ColorLabel::Green => 2,
            ColorLabel::Blue => 3,
            ColorLabel::Yellow => 4,
            ColorLabel::White => 5,
            ColorLabel::Black => 6,
        }
    }

    #[inline]
    pub const fn is_defined(self) -> bool {
        !matches!(self, ColorLabel::Undefined)
    }

    /// Canonical display color. `Undefined` is fully transparent.
    pub const fn rgba(self) -> [u8; 4] {
        match self {
            ColorLabel::Undefined => [0, 0, 0, 0],
            ColorLabel::Red => [255, 0, 0, 255],
            ColorLabel::Green => [0, 255, 0, 255],
            ColorLabel::Blue => [0, 0, 255, 255],
            ColorLabel::Yellow => [255, 255, 0, 255],
            ColorLabel::White => [255, 255, 255, 255],
            ColorLabel::Black => [0, 0, 0, 255],
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ColorLabel::Undefined => "undefined",
            ColorLabel::Red => "red",
            ColorLabel::Green => "green",
            ColorLabel::Blue => "blue",
            ColorLabel::Yellow => "yellow",
            ColorLabel::White => "white",
            ColorLabel::Black => "black",
        }
    }
}

impl fmt::Display for ColorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown color label `{0}`")]
pub struct ParseColorLabelError(pub String);

impl FromStr for ColorLabel {
    type Err = ParseColorLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ColorLabel::ALL
            .into_iter()
            .find(|label| label.name() == lower)
            .ok_or(ParseColorLabelError(s.to_string()))
    }
}
