use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

// Raw depth readings are 11-bit sensor values.
pub const RAW_DEPTH_MAX: u16 = 2047;

// Strategy for converting a raw reading into physical distance. Both
// forms come from OpenKinect calibration work; the constants are
// sensor magic numbers, not derived quantities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthModel {
    // Non-linear tangent fit, sampled at a single pixel.
    Tangent,
    // Linear reciprocal fit, applied per pixel over the whole frame.
    Linear,
}

impl DepthModel {
    pub fn distance_cm(self, raw: u16) -> f64 {
        match self {
            DepthModel::Tangent => tangent_distance_cm(raw),
            DepthModel::Linear => linear_distance_mm(raw) / 10.0,
        }
    }
}

pub fn tangent_distance_cm(raw: u16) -> f64 {
    0.1236 * (raw as f64 / 2842.5 + 1.1863).tan() * 100.0
}

// Zero raw readings mean "no return" and convert to zero distance.
pub fn linear_distance_mm(raw: u16) -> f64 {
    if raw == 0 {
        0.0
    } else {
        1000.0 / (-0.00307 * raw as f64 + 3.33)
    }
}

// Full-frame form of the linear conversion.
pub fn linear_frame_mm(raw: ArrayView2<u16>) -> Array2<f64> {
    raw.map(|&r| linear_distance_mm(r))
}
