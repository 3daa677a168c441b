use ndarray::Array2;

pub const GREEN: [u8; 3] = [0, 255, 0];
pub const RED: [u8; 3] = [255, 0, 0];

// Draws a circle outline of the given thickness by painting every pixel
// whose distance from the center is within half a thickness of the
// radius. Scanning the bounding box avoids the gaps angle sampling
// leaves on large rings.
pub fn circle_outline(
    frame: &mut Array2<[u8; 3]>,
    cx: i32,
    cy: i32,
    radius: u32,
    thickness: u32,
    color: [u8; 3],
) {
    let (height, width) = frame.dim();
    let r = radius as f32;
    let half = thickness as f32 / 2.0;
    let reach = radius as i32 + thickness as i32;

    for y in (cy - reach).max(0)..=(cy + reach).min(height as i32 - 1) {
        for x in (cx - reach).max(0)..=(cx + reach).min(width as i32 - 1) {
            let dx = (x - cx) as f32;
            let dy = (y - cy) as f32;
            let dist = (dx * dx + dy * dy).sqrt();
            if (dist - r).abs() <= half {
                frame[(y as usize, x as usize)] = color;
            }
        }
    }
}

// Filled disk, used for the center marker.
pub fn disk(frame: &mut Array2<[u8; 3]>, cx: i32, cy: i32, radius: u32, color: [u8; 3]) {
    let (height, width) = frame.dim();
    let r = radius as i32;
    let r_sq = r * r;

    for y in (cy - r).max(0)..=(cy + r).min(height as i32 - 1) {
        for x in (cx - r).max(0)..=(cx + r).min(width as i32 - 1) {
            let dx = x - cx;
            let dy = y - cy;
            if dx * dx + dy * dy <= r_sq {
                frame[(y as usize, x as usize)] = color;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_paints_the_ring_but_not_the_center() {
        let mut frame = Array2::from_elem((64, 64), [0u8; 3]);
        circle_outline(&mut frame, 32, 32, 10, 2, GREEN);
        assert_eq!(frame[(32, 42)], GREEN);
        assert_eq!(frame[(22, 32)], GREEN);
        assert_eq!(frame[(32, 32)], [0, 0, 0]);
    }

    #[test]
    fn drawing_clips_at_frame_edges() {
        let mut frame = Array2::from_elem((16, 16), [0u8; 3]);
        circle_outline(&mut frame, 0, 0, 10, 2, GREEN);
        disk(&mut frame, 15, 15, 4, RED);
        assert_eq!(frame[(10, 0)], GREEN);
        assert_eq!(frame[(15, 15)], RED);
    }

    #[test]
    fn disk_fills_inside_the_radius() {
        let mut frame = Array2::from_elem((32, 32), [0u8; 3]);
        disk(&mut frame, 16, 16, 3, RED);
        assert_eq!(frame[(16, 16)], RED);
        assert_eq!(frame[(16, 19)], RED);
        assert_eq!(frame[(16, 20)], [0, 0, 0]);
    }
}
