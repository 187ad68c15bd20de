//! Wall entity: a two-endpoint straight divider segment.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Opaque wall identifier.
///
/// Walls are never renumbered or displayed by id, so a monotonic string id
/// is enough. Generated ids are `"line-{millis}"`, wire-compatible with
/// persisted layouts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WallId(pub String);

impl WallId {
    /// Generate a fresh id from the wall-clock time, disambiguated by an
    /// atomic counter so rapid successive creation within the same
    /// millisecond never collides.
    pub fn generate() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        static LAST_MILLIS: AtomicU64 = AtomicU64::new(0);

        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let prev = LAST_MILLIS.swap(millis, Ordering::Relaxed);
        if prev == millis {
            let n = COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
            WallId(format!("line-{millis}-{n}"))
        } else {
            COUNTER.store(0, Ordering::Relaxed);
            WallId(format!("line-{millis}"))
        }
    }
}

impl std::fmt::Display for WallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which end of a wall segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallEndpoint {
    Start,
    End,
}

/// A straight wall/divider segment.
///
/// Points are `[x1, y1, x2, y2]` in world coordinates. Degenerate
/// (sub-length) segments are rejected at creation by the draw tool, and
/// import rejects non-finite coordinates, so both endpoints are always
/// finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: WallId,
    pub points: [f64; 4],
}

impl Wall {
    pub fn new(id: WallId, points: [f64; 4]) -> Self {
        Self { id, points }
    }

    pub fn start(&self) -> Point {
        Point::new(self.points[0], self.points[1])
    }

    pub fn end(&self) -> Point {
        Point::new(self.points[2], self.points[3])
    }

    pub fn endpoint(&self, which: WallEndpoint) -> Point {
        match which {
            WallEndpoint::Start => self.start(),
            WallEndpoint::End => self.end(),
        }
    }

    /// Replace one endpoint, leaving the other untouched.
    pub fn set_endpoint(&mut self, which: WallEndpoint, point: Point) {
        match which {
            WallEndpoint::Start => {
                self.points[0] = point.x;
                self.points[1] = point.y;
            }
            WallEndpoint::End => {
                self.points[2] = point.x;
                self.points[3] = point.y;
            }
        }
    }

    pub fn length(&self) -> f64 {
        let dx = self.points[2] - self.points[0];
        let dy = self.points[3] - self.points[1];
        (dx * dx + dy * dy).sqrt()
    }

    /// Whether all four coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|v| v.is_finite())
    }
}
