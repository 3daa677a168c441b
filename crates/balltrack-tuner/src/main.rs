use anyhow::Result;
use balltrack_core::config::Config;
use balltrack_core::sensor;
use balltrack_detection::color::ColorRange;
use balltrack_detection::mask;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use ndarray::Array2;
use std::time::{Duration, Instant};

const MAX_HUE: u8 = 180;

// Key pairs adjust the six range bounds: A/Z S/X D/C raise and lower
// the minimums, F/V G/B H/N the maximums (hue, sat, val in that
// order). Escape quits and prints a config snippet.
fn handle_key_input(window: &Window, range: &mut ColorRange, step: u8) {
    type Field = fn(&mut ColorRange) -> &mut u8;
    let bindings: [(Key, Field, bool); 12] = [
        (Key::A, |r| &mut r.hue_min, true),
        (Key::Z, |r| &mut r.hue_min, false),
        (Key::S, |r| &mut r.sat_min, true),
        (Key::X, |r| &mut r.sat_min, false),
        (Key::D, |r| &mut r.val_min, true),
        (Key::C, |r| &mut r.val_min, false),
        (Key::F, |r| &mut r.hue_max, true),
        (Key::V, |r| &mut r.hue_max, false),
        (Key::G, |r| &mut r.sat_max, true),
        (Key::B, |r| &mut r.sat_max, false),
        (Key::H, |r| &mut r.val_max, true),
        (Key::N, |r| &mut r.val_max, false),
    ];

    for (key, field, is_add) in bindings {
        if window.is_key_pressed(key, KeyRepeat::No) {
            let bound = field(range);
            *bound = if is_add {
                bound.saturating_add(step)
            } else {
                bound.saturating_sub(step)
            };
        }
    }
    range.hue_min = range.hue_min.min(MAX_HUE);
    range.hue_max = range.hue_max.min(MAX_HUE);
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("balltrack tuner waking up...");

    let config = Config::load_default().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Using default configuration");
        Config::default()
    });

    let width = config.sensor.width as usize;
    let height = config.sensor.height as usize;
    let mut range = config.detection.color;

    let mut sensor = sensor::open(&config.sensor)?;

    let mut window = Window::new(
        "balltrack tuner",
        width,
        height,
        WindowOptions::default(),
    )?;
    window.set_target_fps(60);

    let mut hue_mask: Array2<u8> = Array2::zeros((height, width));
    let mut sat_mask: Array2<u8> = Array2::zeros((height, width));
    let mut val_mask: Array2<u8> = Array2::zeros((height, width));
    let mut combined: Array2<u8> = Array2::zeros((height, width));
    let mut window_buf: Vec<u32> = vec![0; width * height];

    let mut last_log = Instant::now();

    while window.is_open() && !window.is_key_down(Key::Escape) {
        handle_key_input(&window, &mut range, 1);

        let color = sensor.color_frame()?;
        if color.dim() != (height, width) {
            anyhow::bail!(
                "sensor frame is {:?}, configured size is {}x{}",
                color.dim(),
                width,
                height
            );
        }

        mask::channel_masks(
            color.view(),
            &range,
            &mut hue_mask,
            &mut sat_mask,
            &mut val_mask,
        );
        mask::combine(
            hue_mask.view(),
            sat_mask.view(),
            val_mask.view(),
            &mut combined,
        );

        // Mask to grayscale pixels for the window
        for (dst, &gray) in window_buf.iter_mut().zip(combined.iter()) {
            let g = gray as u32;
            *dst = (g << 16) | (g << 8) | g;
        }
        window.update_with_buffer(&window_buf, width, height)?;

        if last_log.elapsed() >= Duration::from_secs(1) {
            tracing::info!(
                hue = ?(range.hue_min, range.hue_max),
                sat = ?(range.sat_min, range.sat_max),
                val = ?(range.val_min, range.val_max),
                "current range"
            );
            last_log = Instant::now();
        }
    }

    println!("\n[detection.color]\n{}", toml::to_string(&range)?);
    Ok(())
}
