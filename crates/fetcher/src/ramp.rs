//! Rainfall color ramp
//!
//! The ramp is viridis sampled at 256 evenly spaced points and reversed, so
//! dry stations are pale yellow and the wettest ones dark purple.

use serde::Serialize;

/// Number of entries in the ramp
pub const RAMP_SIZE: usize = 256;

/// Rainfall mapped to the first ramp entry, mm
pub const RAINFALL_DOMAIN_MIN: f64 = 0.0;

/// Rainfall mapped to the end of the ramp, mm
pub const RAINFALL_DOMAIN_MAX: f64 = 200.0;

/// An 8-bit sRGB color, serialized as `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        [color.r, color.g, color.b]
    }
}

/// Linear lookup from a rainfall value into a fixed color table
#[derive(Debug, Clone, Copy)]
pub struct ColorRamp {
    colors: &'static [[u8; 3]; RAMP_SIZE],
    min: f64,
    max: f64,
}

impl Default for ColorRamp {
    fn default() -> Self {
        ColorRamp {
            colors: &RAINFALL_RAMP,
            min: RAINFALL_DOMAIN_MIN,
            max: RAINFALL_DOMAIN_MAX,
        }
    }
}

impl ColorRamp {
    /// Ramp index for `value`: `floor(256 * (value - min) / (max - min))`,
    /// clamped to `0..=255`. Values at or above `max` take the last entry.
    pub fn index_for(&self, value: f64) -> usize {
        let scaled = (RAMP_SIZE as f64 * (value - self.min) / (self.max - self.min)).floor();
        if scaled.is_nan() || scaled <= 0.0 {
            0
        } else {
            (scaled as usize).min(RAMP_SIZE - 1)
        }
    }

    /// Rainfall range spread across the ramp, mm
    pub fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn color_at(&self, index: usize) -> Rgb {
        self.colors[index.min(RAMP_SIZE - 1)].into()
    }

    pub fn color_for(&self, value: f64) -> Rgb {
        self.color_at(self.index_for(value))
    }
}

#[rustfmt::skip]
static RAINFALL_RAMP: [[u8; 3]; RAMP_SIZE] = [
    [253, 231, 37], [250, 231, 36], [248, 230, 36], [245, 230, 35],
    [243, 230, 35], [240, 230, 34], [238, 229, 33], [235, 229, 33],
    [233, 229, 32], [230, 228, 32], [228, 228, 31], [225, 228, 31],
    [223, 227, 30], [220, 227, 29], [218, 227, 29], [215, 227, 28],
    [213, 226, 28], [210, 226, 27], [207, 226, 29], [205, 225, 30],
    [202, 225, 32], [199, 224, 33], [197, 224, 35], [194, 224, 37],
    [191, 223, 38], [189, 223, 40], [186, 222, 41], [184, 222, 43],
    [181, 221, 44], [178, 221, 46], [176, 221, 48], [173, 220, 49],
    [170, 220, 51], [168, 219, 52], [165, 219, 54], [162, 218, 56],
    [160, 218, 57], [157, 217, 59], [155, 217, 60], [152, 216, 62],
    [150, 215, 64], [147, 215, 65], [145, 214, 67], [142, 214, 68],
    [140, 213, 70], [137, 213, 71], [135, 212, 73], [132, 211, 75],
    [130, 211, 76], [127, 210, 78], [125, 210, 79], [122, 209, 81],
    [120, 208, 82], [118, 208, 84], [115, 207, 85], [113, 206, 86],
    [111, 205, 88], [109, 205, 89], [106, 204, 90], [104, 203, 92],
    [102, 203, 93], [100, 202, 95], [97, 201, 96], [95, 201, 97],
    [93, 200, 99], [91, 199, 100], [88, 198, 101], [86, 198, 103],
    [84, 197, 104], [82, 196, 105], [80, 195, 106], [79, 195, 107],
    [77, 194, 108], [75, 193, 109], [73, 192, 110], [71, 191, 111],
    [69, 190, 112], [68, 190, 113], [66, 189, 114], [64, 188, 115],
    [62, 187, 116], [60, 186, 117], [58, 185, 118], [57, 185, 119],
    [55, 184, 120], [53, 183, 121], [52, 182, 122], [51, 181, 122],
    [50, 180, 123], [49, 179, 124], [47, 179, 124], [46, 178, 125],
    [45, 177, 126], [44, 176, 126], [43, 175, 127], [42, 174, 127],
    [41, 173, 128], [40, 172, 129], [38, 172, 129], [37, 171, 130],
    [36, 170, 131], [35, 169, 131], [34, 168, 132], [34, 167, 132],
    [34, 166, 133], [33, 165, 133], [33, 164, 134], [33, 163, 134],
    [33, 162, 134], [33, 161, 135], [33, 160, 135], [32, 160, 136],
    [32, 159, 136], [32, 158, 137], [32, 157, 137], [32, 156, 137],
    [32, 155, 138], [31, 154, 138], [31, 153, 139], [31, 152, 139],
    [31, 151, 139], [31, 150, 139], [32, 149, 140], [32, 148, 140],
    [32, 147, 140], [32, 146, 140], [33, 145, 140], [33, 144, 140],
    [33, 144, 141], [33, 143, 141], [34, 142, 141], [34, 141, 141],
    [34, 140, 141], [34, 139, 141], [35, 138, 142], [35, 137, 142],
    [35, 136, 142], [35, 135, 142], [36, 134, 142], [36, 133, 142],
    [37, 132, 142], [37, 131, 142], [37, 130, 142], [38, 129, 142],
    [38, 128, 142], [39, 128, 142], [39, 127, 142], [40, 126, 142],
    [40, 125, 142], [40, 124, 142], [41, 123, 142], [41, 122, 142],
    [42, 121, 142], [42, 120, 142], [42, 119, 142], [43, 118, 142],
    [43, 117, 142], [44, 116, 142], [44, 115, 142], [44, 114, 142],
    [45, 113, 142], [45, 112, 142], [46, 112, 142], [46, 111, 142],
    [47, 110, 142], [47, 109, 142], [47, 108, 142], [48, 107, 142],
    [48, 106, 142], [49, 105, 142], [49, 104, 142], [49, 103, 142],
    [50, 102, 142], [50, 101, 142], [51, 100, 142], [51, 99, 141],
    [52, 98, 141], [52, 97, 141], [53, 96, 141], [53, 94, 141],
    [54, 93, 141], [54, 92, 141], [55, 91, 141], [55, 90, 140],
    [56, 89, 140], [56, 88, 140], [57, 87, 140], [57, 86, 140],
    [57, 85, 140], [58, 84, 139], [58, 83, 139], [59, 82, 139],
    [59, 81, 139], [60, 80, 138], [60, 79, 138], [61, 78, 138],
    [61, 76, 137], [62, 75, 137], [62, 74, 137], [63, 73, 136],
    [63, 72, 136], [64, 71, 136], [64, 70, 136], [65, 69, 135],
    [65, 68, 135], [65, 67, 134], [66, 66, 134], [66, 64, 133],
    [66, 63, 133], [67, 62, 132], [67, 61, 131], [67, 59, 131],
    [68, 58, 130], [68, 57, 130], [69, 56, 129], [69, 54, 129],
    [69, 53, 128], [70, 52, 127], [70, 51, 127], [70, 49, 126],
    [71, 48, 126], [71, 47, 125], [71, 46, 124], [71, 45, 123],
    [71, 43, 122], [71, 42, 121], [71, 41, 120], [71, 40, 119],
    [71, 38, 118], [71, 37, 117], [72, 36, 116], [72, 35, 115],
    [72, 33, 114], [72, 32, 113], [72, 31, 112], [72, 30, 111],
    [72, 28, 110], [72, 27, 109], [72, 26, 108], [72, 25, 107],
    [72, 23, 105], [71, 22, 104], [71, 20, 102], [71, 19, 101],
    [71, 17, 100], [70, 16, 98], [70, 14, 97], [70, 13, 95],
    [70, 11, 94], [69, 10, 92], [69, 8, 91], [69, 7, 90],
    [69, 5, 88], [68, 4, 87], [68, 2, 85], [68, 1, 84],
];
