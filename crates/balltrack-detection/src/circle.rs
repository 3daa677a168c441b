use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Circle {
    pub x: u32,
    pub y: u32,
    pub radius: u32,
    pub votes: u32,
}

// Perimeter offsets for one radius, deduplicated so each boundary pixel
// contributes a single vote.
pub fn circle_points(radius: u32) -> Vec<(i32, i32)> {
    let r = radius as f64;
    let mut points: Vec<(i32, i32)> = Vec::with_capacity(360);
    for angle_deg in 0..360 {
        let theta = (angle_deg as f64) * std::f64::consts::PI / 180.0;
        let x = (r * theta.cos()).round() as i32;
        let y = (r * theta.sin()).round() as i32;
        points.push((x, y));
    }
    points.sort_unstable();
    points.dedup();
    points
}

pub fn precompute_circle_points(r_min: u32, r_max: u32) -> HashMap<u32, Vec<(i32, i32)>> {
    let mut cache = HashMap::with_capacity((r_max.saturating_sub(r_min) + 1) as usize);
    for r in r_min..=r_max {
        cache.insert(r, circle_points(r));
    }
    cache
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_lie_on_the_radius() {
        for &(x, y) in &circle_points(10) {
            let dist = ((x * x + y * y) as f64).sqrt();
            assert!((dist - 10.0).abs() < 1.0, "({x}, {y}) is off the ring");
        }
    }

    #[test]
    fn points_are_unique() {
        let points = circle_points(4);
        let mut deduped = points.clone();
        deduped.dedup();
        assert_eq!(points.len(), deduped.len());
    }

    #[test]
    fn cache_covers_inclusive_range() {
        let cache = precompute_circle_points(10, 12);
        assert_eq!(cache.len(), 3);
        assert!(cache.contains_key(&10) && cache.contains_key(&12));
    }
}
