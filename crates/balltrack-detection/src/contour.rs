use crate::mask::FOREGROUND;
use ndarray::{Array2, ArrayView2};

pub struct Contour {
    // Boundary pixels in trace order, as (x, y).
    pub points: Vec<(i32, i32)>,
    pub area: f32,
    pub perimeter: f32,
}

// Clockwise 8-neighborhood starting East, (dx, dy) with y growing down.
const NEIGHBORS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

// Traces blob boundaries with Moore-neighbor following. A trace starts
// at any untraced foreground pixel whose left neighbor is background,
// so each boundary is walked once.
pub fn contours_from_mask(mask: ArrayView2<u8>) -> Vec<Contour> {
    let (height, width) = mask.dim();
    let mut traced = Array2::from_elem((height, width), false);
    let mut contours = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if mask[(y, x)] != FOREGROUND || traced[(y, x)] {
                continue;
            }
            if x > 0 && mask[(y, x - 1)] == FOREGROUND {
                continue;
            }
            contours.push(trace(mask, (x, y), &mut traced));
        }
    }
    contours
}

fn trace(mask: ArrayView2<u8>, start: (usize, usize), traced: &mut Array2<bool>) -> Contour {
    let (height, width) = mask.dim();
    let mut points: Vec<(i32, i32)> = Vec::new();

    let mut curr = start;
    // Direction index of the backtrack pixel; the scan arrived from the
    // west, so the first sweep starts just past west.
    let mut backtrack = 4usize;

    let max_steps = 8 * height * width;
    for _ in 0..max_steps {
        points.push((curr.0 as i32, curr.1 as i32));
        traced[(curr.1, curr.0)] = true;

        let mut next = None;
        for i in 1..=8 {
            let dir = (backtrack + i) % 8;
            let (dx, dy) = NEIGHBORS[dir];
            let nx = curr.0 as i32 + dx;
            let ny = curr.1 as i32 + dy;
            if nx < 0 || nx >= width as i32 || ny < 0 || ny >= height as i32 {
                continue;
            }
            if mask[(ny as usize, nx as usize)] == FOREGROUND {
                next = Some(((nx as usize, ny as usize), dir));
                break;
            }
        }

        let Some((next_px, dir)) = next else {
            break; // isolated pixel
        };
        if next_px == start {
            break;
        }
        curr = next_px;
        backtrack = (dir + 4) % 8;
    }

    let area = shoelace_area(&points);
    let perimeter = closed_perimeter(&points);
    Contour {
        points,
        area,
        perimeter,
    }
}

fn shoelace_area(points: &[(i32, i32)]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut doubled: i64 = 0;
    for (i, &(x0, y0)) in points.iter().enumerate() {
        let (x1, y1) = points[(i + 1) % points.len()];
        doubled += x0 as i64 * y1 as i64 - x1 as i64 * y0 as i64;
    }
    doubled.unsigned_abs() as f32 / 2.0
}

fn closed_perimeter(points: &[(i32, i32)]) -> f32 {
    if points.len() < 2 {
        return 0.0;
    }
    let mut total = 0.0f32;
    for (i, &(x0, y0)) in points.iter().enumerate() {
        let (x1, y1) = points[(i + 1) % points.len()];
        let dx = (x1 - x0) as f32;
        let dy = (y1 - y0) as f32;
        total += (dx * dx + dy * dy).sqrt();
    }
    total
}
