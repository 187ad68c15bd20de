//! Endpoint snapping for wall drawing and endpoint drags.

use crate::entities::{Wall, WallEndpoint, WallId};
use kurbo::Point;

/// Maximum distance at which an endpoint attracts a drawn/dragged point.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 15.0;

/// A snap query result: the endpoint pulled onto, and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapHit {
    /// The snapped-to endpoint location.
    pub point: Point,
    /// The wall owning the endpoint.
    pub wall_id: WallId,
    /// Whether it was the wall's start point.
    pub is_start: bool,
}

/// Find the nearest wall endpoint strictly within `threshold` of `p`.
///
/// `exclude` prevents a wall from snapping to itself while one of its own
/// endpoints is being dragged. The scan keeps a running minimum seeded
/// with the threshold and compares with strict `<`, so when two endpoints
/// are exactly equidistant the first one encountered wins — walls in
/// collection order, each wall's start before its end. That tie-break is
/// deliberate and load-bearing: given a fixed wall order the result is
/// deterministic and idempotent.
pub fn find_nearest_endpoint(
    p: Point,
    walls: &[Wall],
    threshold: f64,
    exclude: Option<&WallId>,
) -> Option<SnapHit> {
    let mut nearest: Option<SnapHit> = None;
    let mut min_distance = threshold;

    for wall in walls {
        if exclude.is_some_and(|id| *id == wall.id) {
            continue;
        }

        for (endpoint, is_start) in [(wall.start(), true), (wall.end(), false)] {
            let dist = ((p.x - endpoint.x).powi(2) + (p.y - endpoint.y).powi(2)).sqrt();
            if dist < min_distance {
                min_distance = dist;
                nearest = Some(SnapHit {
                    point: endpoint,
                    wall_id: wall.id.clone(),
                    is_start,
                });
            }
        }
    }

    nearest
}

/// Resolve an endpoint drag: snap the new position against every other
/// wall, then return the wall's updated point array together with the
/// active snap (for the indicator).
pub fn update_wall_endpoint(
    wall: &Wall,
    which: WallEndpoint,
    new_pos: Point,
    walls: &[Wall],
    threshold: f64,
) -> ([f64; 4], Option<SnapHit>) {
    let snap = find_nearest_endpoint(new_pos, walls, threshold, Some(&wall.id));
    let resolved = snap.as_ref().map_or(new_pos, |hit| hit.point);

    let mut points = wall.points;
    match which {
        WallEndpoint::Start => {
            points[0] = resolved.x;
            points[1] = resolved.y;
        }
        WallEndpoint::End => {
            points[2] = resolved.x;
            points[3] = resolved.y;
        }
    }
    (points, snap)
}

/// Translate a whole wall by a delta.
pub fn move_wall(wall: &Wall, dx: f64, dy: f64) -> [f64; 4] {
    let p = wall.points;
    [p[0] + dx, p[1] + dy, p[2] + dx, p[3] + dy]
}
