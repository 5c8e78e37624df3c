//! Toolkit-independent curve colors.

use serde::{Deserialize, Serialize};

/// An sRGB color, converted to the UI toolkit's color type by the app layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn r(self) -> u8 {
        self.0[0]
    }

    pub fn g(self) -> u8 {
        self.0[1]
    }

    pub fn b(self) -> u8 {
        self.0[2]
    }

    /// Convert from HSV with `hue` in degrees and `saturation`/`value` in `[0, 1]`.
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let v = value.clamp(0.0, 1.0);
        let c = v * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = v - c;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let to_u8 = |f: f64| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self([to_u8(r), to_u8(g), to_u8(b)])
    }
}

/// Hue step between successive curves; coprime with 360 so hues do not repeat early.
const HUE_STEP: usize = 47;

/// Default color for the curve at `index` in the registry.
pub fn default_color_for_index(index: usize) -> Rgb {
    Rgb::from_hsv(default_hue_for_index(index) as f64, 200.0 / 255.0, 220.0 / 255.0)
}

/// Hue in degrees of the default color for `index`.
pub fn default_hue_for_index(index: usize) -> usize {
    (index * HUE_STEP) % 360
}
