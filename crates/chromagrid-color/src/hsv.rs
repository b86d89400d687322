/// Hue / saturation / value triple derived from an 8-bit RGB sample.
///
/// `hue` is in degrees `[0, 360)`, `saturation` and `value` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HsvSample {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

impl HsvSample {
    /// Standard max/min/delta conversion. Achromatic samples get `hue = 0`.
    ///
    /// When several channels share the maximum, red wins over green and
    /// green over blue.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let r = f64::from(r) / 255.0;
        let g = f64::from(g) / 255.0;
        let b = f64::from(b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let saturation = if max == 0.0 { 0.0 } else { delta / max };

        let sector = if delta == 0.0 {
            0.0
        } else if max == r {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        Self {
            hue: sector / 6.0 * 360.0,
            saturation,
            value: max,
        }
    }
}
