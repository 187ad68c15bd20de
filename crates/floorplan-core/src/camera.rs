//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Multiplicative step applied per wheel tick.
pub const ZOOM_STEP_FACTOR: f64 = 1.05;

/// Camera manages the view transform for the floor-plan canvas.
///
/// It handles panning (translation) and zooming (scaling) operations,
/// converting between screen coordinates and world coordinates, and it
/// tracks the visible canvas size reported by the host container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan)
    pub offset: Vec2,
    /// Current zoom level (1.0 = 100%)
    pub scale: f64,
    /// Minimum allowed zoom level
    pub min_scale: f64,
    /// Maximum allowed zoom level
    pub max_scale: f64,
    /// Visible canvas size in screen pixels.
    pub viewport: Size,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            min_scale: 0.1,
            max_scale: 5.0,
            viewport: Size::new(300.0, 150.0),
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts world coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts screen coordinates to world coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Convert the current pointer position (if any) to world coordinates.
    ///
    /// The host surface may have no pointer available, e.g. before the
    /// first move event of a touch gesture; that maps through as `None`.
    pub fn screen_to_world_at(&self, pointer: Option<Point>) -> Option<Point> {
        pointer.map(|p| self.screen_to_world(p))
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom the camera, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, pivot: Point, factor: f64) {
        let new_scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }

        // Convert pivot to world before the zoom
        let world_point = self.screen_to_world(pivot);

        self.scale = new_scale;

        // Adjust offset so world_point stays under the pivot
        let new_screen = self.world_to_screen(world_point);
        self.offset += Vec2::new(pivot.x - new_screen.x, pivot.y - new_screen.y);
    }

    /// Zoom one step in (`direction > 0`) or out (`direction <= 0`) around
    /// the given screen point.
    pub fn zoom_step(&mut self, direction: i32, pivot: Point) {
        let factor = if direction > 0 {
            ZOOM_STEP_FACTOR
        } else {
            1.0 / ZOOM_STEP_FACTOR
        };
        self.zoom_at(pivot, factor);
    }

    /// Handle a wheel event at the given screen point.
    ///
    /// Positive `delta_y` (scrolling down) zooms out. Pinch gestures on a
    /// trackpad arrive as ctrl-wheel and use the reversed direction for a
    /// natural feel.
    pub fn wheel_zoom(&mut self, pivot: Point, delta_y: f64, ctrl_held: bool) {
        let mut direction = if delta_y > 0.0 { -1 } else { 1 };
        if ctrl_held {
            direction = -direction;
        }
        self.zoom_step(direction, pivot);
    }

    /// Update the visible canvas size in response to container resizes.
    ///
    /// Returns `true` if the size changed. Calling with unchanged
    /// dimensions is a no-op, so resize observers can fire freely.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        let size = Size::new(width.max(0.0), height.max(0.0));
        if size == self.viewport {
            return false;
        }
        self.viewport = size;
        true
    }

    /// Reset camera to default position and zoom.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.offset, Vec2::ZERO);
        assert!((camera.scale - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_identity() {
        let camera = Camera::new();
        let screen = Point::new(100.0, 200.0);
        let world = camera.screen_to_world(screen);
        assert!((world.x - screen.x).abs() < f64::EPSILON);
        assert!((world.y - screen.y).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_offset_and_scale() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(50.0, 100.0);
        camera.scale = 2.0;
        let world = camera.screen_to_world(Point::new(150.0, 300.0));
        assert!((world.x - 50.0).abs() < f64::EPSILON);
        assert!((world.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(30.0, -20.0);
        camera.scale = 1.5;

        let original = Point::new(123.0, 456.0);
        let back = camera.world_to_screen(camera.screen_to_world(original));

        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_no_pointer_maps_through() {
        let camera = Camera::new();
        assert!(camera.screen_to_world_at(None).is_none());
        assert!(camera.screen_to_world_at(Some(Point::ZERO)).is_some());
    }

    #[test]
    fn test_zoom_anchoring() {
        // The world point under the pivot must stay under the pivot.
        let mut camera = Camera::new();
        camera.offset = Vec2::new(12.0, -7.0);
        camera.scale = 1.3;

        let pivot = Point::new(240.0, 180.0);
        let world_before = camera.screen_to_world(pivot);

        camera.zoom_step(1, pivot);
        let world_after = camera.screen_to_world(pivot);

        assert!((world_before.x - world_after.x).abs() < 1e-9);
        assert!((world_before.y - world_after.y).abs() < 1e-9);
        assert!((camera.scale - 1.3 * ZOOM_STEP_FACTOR).abs() < 1e-12);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        camera.zoom_at(Point::ZERO, 0.001);
        assert!((camera.scale - camera.min_scale).abs() < f64::EPSILON);

        camera.scale = 1.0;
        camera.zoom_at(Point::ZERO, 1000.0);
        assert!((camera.scale - camera.max_scale).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wheel_direction() {
        let mut camera = Camera::new();
        camera.wheel_zoom(Point::ZERO, 10.0, false);
        assert!(camera.scale < 1.0);

        let mut camera = Camera::new();
        camera.wheel_zoom(Point::ZERO, 10.0, true);
        assert!(camera.scale > 1.0);
    }

    #[test]
    fn test_resize_idempotent() {
        let mut camera = Camera::new();
        assert!(camera.resize(800.0, 600.0));
        assert!(!camera.resize(800.0, 600.0));
        assert_eq!(camera.viewport, Size::new(800.0, 600.0));
    }

    #[test]
    fn test_pan() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(10.0, 20.0));
        assert!((camera.offset.x - 10.0).abs() < f64::EPSILON);
        assert!((camera.offset.y - 20.0).abs() < f64::EPSILON);
    }
}
