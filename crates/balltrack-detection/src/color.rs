use serde::{Deserialize, Serialize};

// Inclusive HSV bounds for the tracking mask. Hue uses the halved
// 0..=180 scale, saturation and value the full 0..=255 scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRange {
    pub hue_min: u8,
    pub hue_max: u8,
    pub sat_min: u8,
    pub sat_max: u8,
    pub val_min: u8,
    pub val_max: u8,
}

impl ColorRange {
    pub fn hue_contains(&self, h: u8) -> bool {
        h >= self.hue_min && h <= self.hue_max
    }

    pub fn sat_contains(&self, s: u8) -> bool {
        s >= self.sat_min && s <= self.sat_max
    }

    pub fn val_contains(&self, v: u8) -> bool {
        v >= self.val_min && v <= self.val_max
    }

    pub fn contains(&self, h: u8, s: u8, v: u8) -> bool {
        self.hue_contains(h) && self.sat_contains(s) && self.val_contains(v)
    }
}

// Converts an RGB triple to HSV components. Hue is halved to 0..=180,
// saturation and value scale to 0..=255.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };

    let h = if h < 0.0 { h + 360.0 } else { h };
    let h_byte = (h / 2.0).round() as u8;

    let s = if max == 0.0 { 0.0 } else { delta / max };
    let s_byte = (s * 255.0).round() as u8;
    let v_byte = (max * 255.0).round() as u8;

    (h_byte, s_byte, v_byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_colors() {
        assert_eq!(rgb_to_hsv(255, 0, 0), (0, 255, 255));
        assert_eq!(rgb_to_hsv(0, 255, 0), (60, 255, 255));
        assert_eq!(rgb_to_hsv(0, 0, 255), (120, 255, 255));
    }

    #[test]
    fn gray_has_no_saturation() {
        let (_, s, v) = rgb_to_hsv(128, 128, 128);
        assert_eq!(s, 0);
        assert_eq!(v, 128);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let range = ColorRange {
            hue_min: 163,
            hue_max: 180,
            sat_min: 139,
            sat_max: 224,
            val_min: 176,
            val_max: 200,
        };
        assert!(range.contains(163, 139, 176));
        assert!(range.contains(180, 224, 200));
        assert!(!range.contains(162, 139, 176));
        assert!(!range.contains(163, 225, 176));
        assert!(!range.contains(163, 139, 201));
    }
}
