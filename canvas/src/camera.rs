//! Camera state and the screen-to-ground-plane projection.
//!
//! Nodes live in a 3D scene but are only ever moved across the horizontal
//! (x, z) plane. The camera orbits that plane around `target`; its `yaw` is
//! the rotation about the vertical axis in radians. Everything here is pure
//! math so gestures can be tested without a renderer.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::WORLD_UNITS_PER_PX;

/// A point in screen space (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A position in world space, stored as `[x, y, z]` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Offset this position on the ground plane, keeping `y`.
    #[must_use]
    pub fn offset_ground(self, dx: f64, dz: f64) -> Self {
        Self { x: self.x + dx, y: self.y, z: self.z + dz }
    }

    /// True when no component is NaN or infinite. Only finite positions
    /// survive a JSON round-trip.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

/// Convert a screen-space pointer delta into a ground-plane world delta.
///
/// The delta is scaled by [`WORLD_UNITS_PER_PX`] and rotated by `yaw` so that
/// horizontal and vertical screen motion follow the camera's view of the
/// x and z axes. Returns `(dx, dz)`.
#[must_use]
pub fn screen_delta_to_world(dx_px: f64, dy_px: f64, yaw: f64) -> (f64, f64) {
    let dx = dx_px * WORLD_UNITS_PER_PX;
    let dz = dy_px * WORLD_UNITS_PER_PX;
    let (sin, cos) = yaw.sin_cos();
    (dx * cos - dz * sin, dx * sin + dz * cos)
}

/// Inverse of [`screen_delta_to_world`]: ground-plane delta to pixels.
#[must_use]
pub fn world_delta_to_screen(dx: f64, dz: f64, yaw: f64) -> (f64, f64) {
    let (sin, cos) = yaw.sin_cos();
    let sx = dx * cos + dz * sin;
    let sy = -dx * sin + dz * cos;
    (sx / WORLD_UNITS_PER_PX, sy / WORLD_UNITS_PER_PX)
}

/// Orbit camera looking down at the ground plane.
///
/// `target` is the world point shown at the viewport center. `yaw` is in
/// radians. `viewport_width` / `viewport_height` are in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub target: Vec3,
    pub yaw: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { target: Vec3::default(), yaw: 0.0, viewport_width: 0.0, viewport_height: 0.0 }
    }
}

impl Camera {
    /// Screen-space center of the viewport.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.viewport_width / 2.0, self.viewport_height / 2.0)
    }

    /// Project a world position onto the screen. Height (`y`) is ignored.
    #[must_use]
    pub fn world_to_screen(&self, world: Vec3) -> Point {
        let (sx, sy) = world_delta_to_screen(world.x - self.target.x, world.z - self.target.z, self.yaw);
        let c = self.center();
        Point::new(c.x + sx, c.y + sy)
    }

    /// Unproject a screen point onto the ground plane at the target's height.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Vec3 {
        let c = self.center();
        let (dx, dz) = screen_delta_to_world(screen.x - c.x, screen.y - c.y, self.yaw);
        self.target.offset_ground(dx, dz)
    }

    /// Move the target so the ground follows a pointer drag of `(dx_px, dy_px)`.
    pub fn pan_by(&mut self, dx_px: f64, dy_px: f64) {
        let (dx, dz) = screen_delta_to_world(dx_px, dy_px, self.yaw);
        self.target = self.target.offset_ground(-dx, -dz);
    }
}
