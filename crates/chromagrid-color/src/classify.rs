//! Single-sample color classification.

use chromagrid_core::ColorLabel;

use crate::hsv::HsvSample;

/// Low-saturation samples at or below this are white candidates.
pub const WHITE_MAX_SATURATION: f64 = 0.25;
/// White needs at least this brightness.
pub const WHITE_MIN_VALUE: f64 = 0.55;
/// Anything darker is black, whatever its hue.
pub const BLACK_MAX_VALUE: f64 = 0.25;
/// Minimum saturation for a hue band to apply.
pub const CHROMATIC_MIN_SATURATION: f64 = 0.30;

pub const RED_MAX_HUE: f64 = 25.0;
pub const RED_MIN_HUE: f64 = 300.0;
pub const YELLOW_HUE: (f64, f64) = (25.0, 70.0);
pub const GREEN_HUE: (f64, f64) = (70.0, 155.0);
pub const BLUE_HUE: (f64, f64) = (155.0, 300.0);

/// Classify an 8-bit RGB sample.
#[inline]
pub fn classify_rgb(r: u8, g: u8, b: u8) -> ColorLabel {
    classify_hsv(&HsvSample::from_rgb(r, g, b))
}

/// Classify an HSV sample. Always returns a label.
///
/// The hue bands are closed intervals and share their end points. Bands are
/// tested in the fixed order red, yellow, green, blue and a later match
/// replaces an earlier one, so hue 25 is yellow, 70 green, 155 and 300 blue.
pub fn classify_hsv(hsv: &HsvSample) -> ColorLabel {
    if hsv.saturation <= WHITE_MAX_SATURATION && hsv.value >= WHITE_MIN_VALUE {
        return ColorLabel::White;
    }
    if hsv.value < BLACK_MAX_VALUE {
        return ColorLabel::Black;
    }
    if hsv.saturation < CHROMATIC_MIN_SATURATION {
        return ColorLabel::Undefined;
    }

    let h = hsv.hue;
    let mut label = ColorLabel::Undefined;
    if h <= RED_MAX_HUE || h >= RED_MIN_HUE {
        label = ColorLabel::Red;
    }
    if in_band(h, YELLOW_HUE) {
        label = ColorLabel::Yellow;
    }
    if in_band(h, GREEN_HUE) {
        label = ColorLabel::Green;
    }
    if in_band(h, BLUE_HUE) {
        label = ColorLabel::Blue;
    }
    label
}

#[inline]
fn in_band(hue: f64, (lo, hi): (f64, f64)) -> bool {
    hue >= lo && hue <= hi
}
