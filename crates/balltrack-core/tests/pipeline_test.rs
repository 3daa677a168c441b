//! End-to-end pipeline tests over synthetic sensor frames.

use balltrack_calibration::depth::{linear_distance_mm, DepthModel};
use balltrack_core::config::{Config, Tuning};
use balltrack_core::processor::FrameProcessor;
use balltrack_core::sensor::{DepthSensor, SyntheticSensor};

fn default_tuning() -> Tuning {
    Config::default().tuning()
}

#[test]
fn ball_is_located_in_three_dimensions() {
    let mut sensor = SyntheticSensor::new(640, 480);
    let color = sensor.color_frame().unwrap();
    let depth = sensor.depth_frame().unwrap();

    let mut processor = FrameProcessor::new();
    let detections = processor.process(&color, &depth, &default_tuning());

    assert!(!detections.is_empty(), "the ball should be detected");
    let best = &detections[0];
    let (bx, by, br) = sensor.ball();
    assert!((best.circle.x as i32 - bx).abs() <= 6, "x: {}", best.circle.x);
    assert!((best.circle.y as i32 - by).abs() <= 6, "y: {}", best.circle.y);
    // Dilation and blur grow the blob a little before detection.
    assert!(
        (best.circle.radius as i32 - br as i32).abs() <= 6,
        "radius: {}",
        best.circle.radius
    );

    let pos = best
        .position
        .as_ref()
        .expect("center is inside the edge guard");
    // Uniform raw reading of 512 under the ball, tangent model.
    assert!((pos.z_cm - 59.633).abs() < 0.05, "z: {}", pos.z_cm);
    // The ball sits left of and on the frame's vertical center line.
    assert!(pos.x_cm < 0.0);
    assert!(pos.y_cm.abs() < 2.0);
}

#[test]
fn retuning_takes_effect_on_the_next_iteration() {
    let mut sensor = SyntheticSensor::new(640, 480);
    let color = sensor.color_frame().unwrap();
    let depth = sensor.depth_frame().unwrap();
    let mut processor = FrameProcessor::new();

    let mut tuning = default_tuning();
    assert!(!processor.process(&color, &depth, &tuning).is_empty());

    // Move the hue window off the ball; the very next iteration must
    // see an empty mask, with nothing cached from the last one.
    tuning.detection.color.hue_min = 40;
    tuning.detection.color.hue_max = 80;
    assert!(processor.process(&color, &depth, &tuning).is_empty());

    tuning.detection.color.hue_min = 163;
    tuning.detection.color.hue_max = 180;
    assert!(!processor.process(&color, &depth, &tuning).is_empty());
}

#[test]
fn empty_scene_yields_no_detections_and_no_positions() {
    let mut sensor = SyntheticSensor::new(640, 480);
    // Paint the ball in the background color so the mask stays empty.
    sensor.set_ball_rgb([20, 20, 20]);
    let color = sensor.color_frame().unwrap();
    let depth = sensor.depth_frame().unwrap();

    let mut processor = FrameProcessor::new();
    let detections = processor.process(&color, &depth, &default_tuning());
    assert!(detections.is_empty());
}

#[test]
fn circle_past_the_edge_guard_keeps_no_position() {
    let mut sensor = SyntheticSensor::new(640, 480);
    sensor.set_ball(610, 240, 20);
    let color = sensor.color_frame().unwrap();
    let depth = sensor.depth_frame().unwrap();

    let mut processor = FrameProcessor::new();
    let detections = processor.process(&color, &depth, &default_tuning());

    assert!(!detections.is_empty(), "the circle itself is still found");
    assert!(detections[0].position.is_none());
}

#[test]
fn linear_model_reports_converted_frame_distance() {
    let mut sensor = SyntheticSensor::new(640, 480);
    sensor.set_ball_raw_depth(700);
    let color = sensor.color_frame().unwrap();
    let depth = sensor.depth_frame().unwrap();

    let mut tuning = default_tuning();
    tuning.depth.model = DepthModel::Linear;

    let mut processor = FrameProcessor::new();
    let detections = processor.process(&color, &depth, &tuning);

    assert!(!detections.is_empty());
    let pos = detections[0]
        .position
        .as_ref()
        .expect("center is inside the edge guard");
    let expected_cm = linear_distance_mm(700) / 10.0;
    assert!((pos.z_cm - expected_cm).abs() < 1e-9, "z: {}", pos.z_cm);
}
