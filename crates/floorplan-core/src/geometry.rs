//! Pure geometry helpers shared by snapping, hit testing and placement.

use crate::entities::Wall;
use kurbo::Point;

/// Distance from a point to the closest point on segment `a`-`b`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let seg = kurbo::Vec2::new(b.x - a.x, b.y - a.y);
    let to_p = kurbo::Vec2::new(p.x - a.x, p.y - a.y);

    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        // Segment is a point
        return to_p.hypot();
    }

    let t = (to_p.dot(seg) / len_sq).clamp(0.0, 1.0);
    let closest = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((p.x - closest.x).powi(2) + (p.y - closest.y).powi(2)).sqrt()
}

/// Whether a world point lies within `tolerance` of a wall segment.
pub fn point_near_wall(p: Point, wall: &Wall, tolerance: f64) -> bool {
    distance_to_segment(p, wall.start(), wall.end()) <= tolerance
}

/// Column/row slot for the i-th entity of a square-ish grid:
/// `cols = ceil(sqrt(count))`.
pub fn grid_slot(index: usize, count: usize) -> (usize, usize) {
    let cols = (count.max(1) as f64).sqrt().ceil() as usize;
    (index % cols, index / cols)
}

/// World position for the i-th entity of a bulk-add grid.
pub fn grid_position(index: usize, count: usize, origin: Point, spacing: f64) -> Point {
    let (col, row) = grid_slot(index, count);
    Point::new(
        origin.x + col as f64 * spacing,
        origin.y + row as f64 * spacing,
    )
}
