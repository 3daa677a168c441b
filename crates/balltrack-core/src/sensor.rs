use crate::config::{SensorConfig, SensorKind};
use crate::frame::{color_from_raw, ColorFrame, DepthFrame};
use anyhow::Result;
use ndarray::Array2;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

// A depth-camera source: paired color and raw 11-bit depth frames.
// Acquisition failure is fatal to the pipeline; there is no retry.
// Sensors are opened on the pipeline thread and never leave it.
pub trait DepthSensor {
    fn color_frame(&mut self) -> Result<ColorFrame>;
    fn depth_frame(&mut self) -> Result<DepthFrame>;
}

pub fn open(cfg: &SensorConfig) -> Result<Box<dyn DepthSensor>> {
    match cfg.source {
        SensorKind::Synthetic => Ok(Box::new(SyntheticSensor::new(cfg.width, cfg.height))),
        SensorKind::Camera => Ok(Box::new(CameraSensor::open(cfg)?)),
    }
}

// Webcam-backed color source. Webcams carry no depth channel; depth
// reads come back zero so the tracker still runs for mask tuning.
pub struct CameraSensor {
    camera: Camera,
    dims: (u32, u32),
}

impl CameraSensor {
    pub fn open(cfg: &SensorConfig) -> Result<Self> {
        let index = CameraIndex::Index(cfg.device_id);
        let format_type = RequestedFormatType::AbsoluteHighestFrameRate;
        let requested = RequestedFormat::new::<RgbFormat>(format_type);

        let mut camera = Camera::new(index, requested)?;
        camera.open_stream()?;
        Ok(Self {
            camera,
            dims: (cfg.width, cfg.height),
        })
    }
}

impl DepthSensor for CameraSensor {
    fn color_frame(&mut self) -> Result<ColorFrame> {
        let frame = self.camera.frame()?;
        let decoded = frame.decode_image::<RgbFormat>()?;
        self.dims = (decoded.width(), decoded.height());
        Ok(color_from_raw(
            decoded.as_raw(),
            decoded.width(),
            decoded.height(),
        )?)
    }

    fn depth_frame(&mut self) -> Result<DepthFrame> {
        let (width, height) = self.dims;
        Ok(Array2::zeros((height as usize, width as usize)))
    }
}

// Renders a flat-colored ball over a uniform background, with a uniform
// raw depth reading under the ball. Drives demos and the integration
// tests without hardware.
pub struct SyntheticSensor {
    width: u32,
    height: u32,
    ball_x: i32,
    ball_y: i32,
    ball_radius: u32,
    ball_rgb: [u8; 3],
    background_rgb: [u8; 3],
    ball_raw_depth: u16,
    background_raw_depth: u16,
}

impl SyntheticSensor {
    pub fn new(width: u32, height: u32) -> Self {
        SyntheticSensor {
            width,
            height,
            ball_x: width as i32 / 3,
            ball_y: height as i32 / 2,
            ball_radius: 40,
            // HSV (170, 180, 190): inside the default red range.
            ball_rgb: [190, 56, 101],
            background_rgb: [20, 20, 20],
            ball_raw_depth: 512,
            background_raw_depth: 900,
        }
    }

    pub fn set_ball(&mut self, x: i32, y: i32, radius: u32) {
        self.ball_x = x;
        self.ball_y = y;
        self.ball_radius = radius;
    }

    pub fn set_ball_rgb(&mut self, rgb: [u8; 3]) {
        self.ball_rgb = rgb;
    }

    pub fn set_ball_raw_depth(&mut self, raw: u16) {
        self.ball_raw_depth = raw;
    }

    pub fn ball(&self) -> (i32, i32, u32) {
        (self.ball_x, self.ball_y, self.ball_radius)
    }

    fn covers(&self, x: usize, y: usize) -> bool {
        let dx = x as i32 - self.ball_x;
        let dy = y as i32 - self.ball_y;
        let r = self.ball_radius as i32;
        dx * dx + dy * dy <= r * r
    }
}

impl DepthSensor for SyntheticSensor {
    fn color_frame(&mut self) -> Result<ColorFrame> {
        let (w, h) = (self.width as usize, self.height as usize);
        Ok(Array2::from_shape_fn((h, w), |(y, x)| {
            if self.covers(x, y) {
                self.ball_rgb
            } else {
                self.background_rgb
            }
        }))
    }

    fn depth_frame(&mut self) -> Result<DepthFrame> {
        let (w, h) = (self.width as usize, self.height as usize);
        Ok(Array2::from_shape_fn((h, w), |(y, x)| {
            if self.covers(x, y) {
                self.ball_raw_depth
            } else {
                self.background_raw_depth
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_ball_shows_in_both_frames() {
        let mut sensor = SyntheticSensor::new(64, 48);
        sensor.set_ball(32, 24, 10);
        sensor.set_ball_raw_depth(700);

        let color = sensor.color_frame().unwrap();
        let depth = sensor.depth_frame().unwrap();
        assert_eq!(color.dim(), (48, 64));
        assert_eq!(color[(24, 32)], [190, 56, 101]);
        assert_eq!(color[(0, 0)], [20, 20, 20]);
        assert_eq!(depth[(24, 32)], 700);
        assert_eq!(depth[(0, 0)], 900);
    }

    #[test]
    fn synthetic_honors_configured_size() {
        let mut sensor = SyntheticSensor::new(320, 240);
        assert_eq!(sensor.color_frame().unwrap().dim(), (240, 320));
    }
}
