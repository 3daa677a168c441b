use crate::circle::Circle;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoughParams {
    // Accumulator downscale factor; centers are voted on a grid this
    // many times coarser than the frame.
    pub accumulator_scale: u32,
    // Minimum distance in pixels between two reported centers.
    pub min_center_dist: f32,
    // Votes an accumulator cell needs before it becomes a candidate.
    pub vote_threshold: u32,
    pub min_radius: u32,
    // 0 means half the smaller frame dimension.
    pub max_radius: u32,
}

impl HoughParams {
    pub fn radius_bounds(&self, height: usize, width: usize) -> (u32, u32) {
        let max = if self.max_radius == 0 {
            (height.min(width) as u32) / 2
        } else {
            self.max_radius
        };
        (self.min_radius.min(max), max)
    }
}

// Circle Hough transform over boundary pixels. One 2D accumulator per
// radius keeps memory bounded; candidates above the vote threshold are
// suppressed greedily by center distance, strongest first.
pub fn hough_circles(
    edge_pixels: &[(i32, i32)],
    height: usize,
    width: usize,
    params: &HoughParams,
    circle_cache: &HashMap<u32, Vec<(i32, i32)>>,
) -> Vec<Circle> {
    if edge_pixels.is_empty() {
        return Vec::new();
    }

    let dp = params.accumulator_scale.max(1) as usize;
    let (r_min, r_max) = params.radius_bounds(height, width);

    let acc_h = height.div_ceil(dp);
    let acc_w = width.div_ceil(dp);
    let mut accumulator: Array2<u32> = Array2::zeros((acc_h, acc_w));
    let mut candidates: Vec<Circle> = Vec::new();

    for radius in r_min..=r_max {
        let Some(offsets) = circle_cache.get(&radius) else {
            continue;
        };
        accumulator.fill(0);

        for &(x, y) in edge_pixels {
            for &(dx, dy) in offsets {
                let cx = x - dx;
                let cy = y - dy;
                if cx >= 0 && cx < width as i32 && cy >= 0 && cy < height as i32 {
                    accumulator[(cy as usize / dp, cx as usize / dp)] += 1;
                }
            }
        }

        for ((ay, ax), &votes) in accumulator.indexed_iter() {
            if votes >= params.vote_threshold {
                candidates.push(Circle {
                    x: (ax * dp + dp / 2) as u32,
                    y: (ay * dp + dp / 2) as u32,
                    radius,
                    votes,
                });
            }
        }
    }

    suppress_close_centers(candidates, params.min_center_dist)
}

fn suppress_close_centers(mut candidates: Vec<Circle>, min_dist: f32) -> Vec<Circle> {
    candidates.sort_unstable_by(|a, b| b.votes.cmp(&a.votes));

    let mut kept: Vec<Circle> = Vec::new();
    for candidate in candidates {
        let far_enough = kept.iter().all(|c| {
            let dx = c.x as f32 - candidate.x as f32;
            let dy = c.y as f32 - candidate.y as f32;
            (dx * dx + dy * dy).sqrt() >= min_dist
        });
        if far_enough {
            kept.push(candidate);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circle::{circle_points, precompute_circle_points};

    const PARAMS: HoughParams = HoughParams {
        accumulator_scale: 2,
        min_center_dist: 50.0,
        vote_threshold: 30,
        min_radius: 15,
        max_radius: 25,
    };

    #[test]
    fn synthetic_ring_is_found_where_it_was_drawn() {
        let (cx, cy, radius) = (100i32, 90i32, 20u32);
        let edge_pixels: Vec<(i32, i32)> = circle_points(radius)
            .into_iter()
            .map(|(dx, dy)| (cx + dx, cy + dy))
            .collect();

        let cache = precompute_circle_points(PARAMS.min_radius, PARAMS.max_radius);
        let circles = hough_circles(&edge_pixels, 200, 200, &PARAMS, &cache);

        assert!(!circles.is_empty());
        let best = &circles[0];
        assert!((best.x as i32 - cx).abs() <= 3, "x off: {}", best.x);
        assert!((best.y as i32 - cy).abs() <= 3, "y off: {}", best.y);
        assert!((best.radius as i32 - radius as i32).abs() <= 2);
    }

    #[test]
    fn close_candidates_collapse_to_the_strongest() {
        let candidates = vec![
            Circle { x: 100, y: 100, radius: 20, votes: 80 },
            Circle { x: 104, y: 101, radius: 21, votes: 60 },
            Circle { x: 300, y: 100, radius: 18, votes: 40 },
        ];
        let kept = suppress_close_centers(candidates, 50.0);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].votes, 80);
        assert_eq!(kept[1].x, 300);
    }

    #[test]
    fn no_edges_means_no_circles() {
        let cache = precompute_circle_points(PARAMS.min_radius, PARAMS.max_radius);
        assert!(hough_circles(&[], 200, 200, &PARAMS, &cache).is_empty());
    }

    #[test]
    fn max_radius_zero_tracks_frame_size() {
        let params = HoughParams {
            max_radius: 0,
            ..PARAMS
        };
        assert_eq!(params.radius_bounds(480, 640), (15, 240));
    }
}
