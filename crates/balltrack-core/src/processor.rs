use crate::config::{DepthConfig, RunConfig, Tuning};
use crate::distlog::DistanceLog;
use crate::frame::{depth_display, gray_to_rgb, ColorFrame, DepthFrame};
use crate::sensor::DepthSensor;
use crate::streaming::{gray_to_jpeg, rgb_to_jpeg, AppState};
use balltrack_calibration::depth::{linear_frame_mm, DepthModel};
use balltrack_calibration::geometry::{real_world_position, RealWorldPosition};
use balltrack_detection::circle::{precompute_circle_points, Circle};
use balltrack_detection::contour::contours_from_mask;
use balltrack_detection::draw;
use balltrack_detection::hough::hough_circles;
use balltrack_detection::{mask, morphology};
use ndarray::{Array2, ArrayView2};
use std::collections::HashMap;
use std::time::{Duration, Instant};

// 5x5 kernels.
const MORPH_RADIUS: usize = 2;
const BINARIZE_CUTOFF: u8 = 128;
const OUTLINE_THICKNESS: u32 = 5;
const CENTER_MARKER_RADIUS: u32 = 5;

pub struct Detection {
    pub circle: Circle,
    // None when the center failed the edge guard or the depth sample
    // fell outside the frame.
    pub position: Option<RealWorldPosition>,
}

// One acquisition -> mask -> detect -> measure pass over a frame pair.
// Holds scratch buffers and the circle-point cache so steady-state
// iterations allocate nothing; no detection state survives between
// iterations.
pub struct FrameProcessor {
    dims: (usize, usize),
    hue_mask: Array2<u8>,
    sat_mask: Array2<u8>,
    val_mask: Array2<u8>,
    combined: Array2<u8>,
    dilated: Array2<u8>,
    close_scratch: Array2<u8>,
    closed: Array2<u8>,
    blur_scratch: Array2<u16>,
    blurred: Array2<u8>,
    binary: Array2<u8>,
    circle_cache: HashMap<u32, Vec<(i32, i32)>>,
    cached_radii: (u32, u32),
}

impl FrameProcessor {
    pub fn new() -> Self {
        FrameProcessor {
            dims: (0, 0),
            hue_mask: Array2::zeros((0, 0)),
            sat_mask: Array2::zeros((0, 0)),
            val_mask: Array2::zeros((0, 0)),
            combined: Array2::zeros((0, 0)),
            dilated: Array2::zeros((0, 0)),
            close_scratch: Array2::zeros((0, 0)),
            closed: Array2::zeros((0, 0)),
            blur_scratch: Array2::zeros((0, 0)),
            blurred: Array2::zeros((0, 0)),
            binary: Array2::zeros((0, 0)),
            circle_cache: HashMap::new(),
            cached_radii: (0, 0),
        }
    }

    fn ensure_dims(&mut self, dims: (usize, usize)) {
        if self.dims == dims {
            return;
        }
        self.hue_mask = Array2::zeros(dims);
        self.sat_mask = Array2::zeros(dims);
        self.val_mask = Array2::zeros(dims);
        self.combined = Array2::zeros(dims);
        self.dilated = Array2::zeros(dims);
        self.close_scratch = Array2::zeros(dims);
        self.closed = Array2::zeros(dims);
        self.blur_scratch = Array2::zeros(dims);
        self.blurred = Array2::zeros(dims);
        self.binary = Array2::zeros(dims);
        self.dims = dims;
    }

    pub fn process(
        &mut self,
        color: &ColorFrame,
        depth: &DepthFrame,
        tuning: &Tuning,
    ) -> Vec<Detection> {
        let (height, width) = color.dim();
        self.ensure_dims((height, width));

        mask::channel_masks(
            color.view(),
            &tuning.detection.color,
            &mut self.hue_mask,
            &mut self.sat_mask,
            &mut self.val_mask,
        );
        mask::combine(
            self.hue_mask.view(),
            self.sat_mask.view(),
            self.val_mask.view(),
            &mut self.combined,
        );

        morphology::dilate(self.combined.view(), MORPH_RADIUS, &mut self.dilated);
        morphology::close(
            self.dilated.view(),
            MORPH_RADIUS,
            &mut self.close_scratch,
            &mut self.closed,
        );
        morphology::gaussian_blur_5(self.closed.view(), &mut self.blur_scratch, &mut self.blurred);
        mask::binarize(self.blurred.view(), BINARIZE_CUTOFF, &mut self.binary);

        let mut edge_pixels: Vec<(i32, i32)> = Vec::new();
        for contour in contours_from_mask(self.binary.view()) {
            if contour.area >= tuning.detection.min_area {
                edge_pixels.extend_from_slice(&contour.points);
            }
        }

        let (r_min, r_max) = tuning.detection.hough.radius_bounds(height, width);
        if self.cached_radii != (r_min, r_max) {
            self.circle_cache = precompute_circle_points(r_min, r_max);
            self.cached_radii = (r_min, r_max);
        }
        let circles = hough_circles(
            &edge_pixels,
            height,
            width,
            &tuning.detection.hough,
            &self.circle_cache,
        );

        // The linear model converts the whole frame, then indexes it.
        let linear_mm = match tuning.depth.model {
            DepthModel::Linear => Some(linear_frame_mm(depth.view())),
            DepthModel::Tangent => None,
        };

        circles
            .into_iter()
            .map(|circle| {
                let position =
                    measure(&circle, depth, linear_mm.as_ref(), &tuning.depth, width, height);
                Detection { circle, position }
            })
            .collect()
    }

    pub fn hue_mask(&self) -> ArrayView2<'_, u8> {
        self.hue_mask.view()
    }

    pub fn sat_mask(&self) -> ArrayView2<'_, u8> {
        self.sat_mask.view()
    }

    pub fn val_mask(&self) -> ArrayView2<'_, u8> {
        self.val_mask.view()
    }

    // The cleaned mask as fed to circle detection, before re-binarizing.
    pub fn cleaned_mask(&self) -> ArrayView2<'_, u8> {
        self.blurred.view()
    }
}

impl Default for FrameProcessor {
    fn default() -> Self {
        Self::new()
    }
}

fn measure(
    circle: &Circle,
    depth: &DepthFrame,
    linear_mm: Option<&Array2<f64>>,
    cfg: &DepthConfig,
    width: usize,
    height: usize,
) -> Option<RealWorldPosition> {
    if circle.x >= cfg.edge_guard_x {
        return None;
    }

    let distance_cm = match cfg.model {
        DepthModel::Tangent => {
            let sx = circle.x as i64 + cfg.sample_offset_x as i64;
            let sy = circle.y as i64;
            if sx < 0 || sx >= width as i64 || sy >= height as i64 {
                return None;
            }
            cfg.model.distance_cm(depth[(sy as usize, sx as usize)])
        }
        DepthModel::Linear => {
            let mm = linear_mm?;
            if circle.x as usize >= width || circle.y as usize >= height {
                return None;
            }
            mm[(circle.y as usize, circle.x as usize)] / 10.0
        }
    };

    Some(real_world_position(
        circle.x as f64,
        circle.y as f64,
        width as u32,
        height as u32,
        distance_cm,
    ))
}

// Circle outline and center marker on the annotated surfaces.
pub fn annotate(color: &mut ColorFrame, depth_rgb: &mut ColorFrame, detections: &[Detection]) {
    for detection in detections {
        let c = &detection.circle;
        for frame in [&mut *color, &mut *depth_rgb] {
            draw::circle_outline(
                frame,
                c.x as i32,
                c.y as i32,
                c.radius,
                OUTLINE_THICKNESS,
                draw::GREEN,
            );
            draw::disk(frame, c.x as i32, c.y as i32, CENTER_MARKER_RADIUS, draw::RED);
        }
    }
}

// The blocking pipeline loop: runs forever, or until the configured
// iteration cap. Sensor failure aborts the loop with the error.
pub fn run(
    mut sensor: Box<dyn DepthSensor>,
    state: AppState,
    run_cfg: RunConfig,
) -> anyhow::Result<()> {
    let sensor_cfg = state.blocking_config().sensor;
    let frame_period = if sensor_cfg.fps > 0 {
        Duration::from_secs_f64(1.0 / sensor_cfg.fps as f64)
    } else {
        Duration::ZERO
    };

    let mut processor = FrameProcessor::new();
    let mut distance_log = match &run_cfg.distance_log {
        Some(path) => Some(DistanceLog::create(path, run_cfg.distance_log_samples)?),
        None => None,
    };

    let mut iterations: u64 = 0;
    let mut frames_in_window: u64 = 0;
    let mut last_summary = Instant::now();

    loop {
        if let Some(cap) = run_cfg.max_iterations {
            if iterations >= cap {
                tracing::info!(iterations, "Iteration cap reached, stopping pipeline");
                return Ok(());
            }
        }
        let iteration_started = Instant::now();

        let mut color = sensor.color_frame()?;
        let depth = sensor.depth_frame()?;
        let tuning = state.blocking_tuning();

        let detections = processor.process(&color, &depth, &tuning);

        for detection in &detections {
            match &detection.position {
                Some(pos) => {
                    tracing::info!(
                        x_cm = pos.x_cm,
                        y_cm = pos.y_cm,
                        z_cm = pos.z_cm,
                        radius = detection.circle.radius,
                        "ball located"
                    );
                    if let Some(log) = distance_log.as_mut() {
                        log.record(pos.z_cm)?;
                    }
                }
                None => {
                    tracing::debug!(
                        x = detection.circle.x,
                        y = detection.circle.y,
                        "circle center too close to the frame edge, skipping distance"
                    );
                }
            }
        }

        let mut depth_rgb = gray_to_rgb(&depth_display(&depth));
        annotate(&mut color, &mut depth_rgb, &detections);
        publish_frames(&state, &processor, &color, &depth_rgb);

        iterations += 1;
        frames_in_window += 1;
        if last_summary.elapsed() >= Duration::from_secs(1) {
            tracing::debug!(
                frames_in_window,
                detections = detections.len(),
                "pipeline running"
            );
            frames_in_window = 0;
            last_summary = Instant::now();
        }

        if let Some(remaining) = frame_period.checked_sub(iteration_started.elapsed()) {
            std::thread::sleep(remaining);
        }
    }
}

fn publish_frames(
    state: &AppState,
    processor: &FrameProcessor,
    color: &ColorFrame,
    depth_rgb: &ColorFrame,
) {
    let hubs = &state.hubs;
    if let Some(jpeg) = rgb_to_jpeg(color.view()) {
        hubs.color.publish(jpeg);
    }
    if let Some(jpeg) = gray_to_jpeg(processor.hue_mask()) {
        hubs.hue.publish(jpeg);
    }
    if let Some(jpeg) = gray_to_jpeg(processor.sat_mask()) {
        hubs.sat.publish(jpeg);
    }
    if let Some(jpeg) = gray_to_jpeg(processor.val_mask()) {
        hubs.val.publish(jpeg);
    }
    if let Some(jpeg) = gray_to_jpeg(processor.cleaned_mask()) {
        hubs.closing.publish(jpeg);
    }
    if let Some(jpeg) = rgb_to_jpeg(depth_rgb.view()) {
        hubs.depth.publish(jpeg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ndarray::Array2;

    fn default_depth_cfg() -> DepthConfig {
        Config::default().depth
    }

    #[test]
    fn edge_guard_skips_measurement() {
        let depth: DepthFrame = Array2::from_elem((480, 640), 512u16);
        let circle = Circle {
            x: 620,
            y: 240,
            radius: 20,
            votes: 100,
        };
        let pos = measure(&circle, &depth, None, &default_depth_cfg(), 640, 480);
        assert!(pos.is_none());
    }

    #[test]
    fn tangent_measurement_samples_right_of_center() {
        let mut depth: DepthFrame = Array2::zeros((480, 640));
        depth[(240, 325)] = 512;
        let circle = Circle {
            x: 300,
            y: 240,
            radius: 30,
            votes: 100,
        };
        let pos = measure(&circle, &depth, None, &default_depth_cfg(), 640, 480)
            .expect("inside the guard");
        assert!((pos.z_cm - 59.633).abs() < 0.05);
        // 300 is left of the 320 center, so x_cm is negative.
        assert!(pos.x_cm < 0.0);
    }

    #[test]
    fn out_of_frame_sample_skips_measurement() {
        let depth: DepthFrame = Array2::from_elem((480, 640), 512u16);
        let circle = Circle {
            x: 630,
            y: 240,
            radius: 20,
            votes: 100,
        };
        let mut cfg = default_depth_cfg();
        cfg.edge_guard_x = 640; // guard disabled, bounds check still holds
        assert!(measure(&circle, &depth, None, &cfg, 640, 480).is_none());
    }
}
