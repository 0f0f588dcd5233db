//! Virtual trackball
//!
//! Cursor samples are lifted onto a hemisphere over the viewport. Two
//! consecutive samples define a small rotation: the axis is their cross
//! product and the angle comes from its length. Each rotation is an
//! increment between samples and is never accumulated here.

use crate::point::Vector3f;
use nalgebra::{Unit, UnitQuaternion};

/// Viewport size assumed until the window reports its own
pub const DEFAULT_VIEWPORT: (u32, u32) = (640, 480);

/// Samples closer than this are treated as no motion
pub const MOTION_EPSILON: f32 = 1e-4;

/// Keeps the hemisphere height real at the rim (`d == 1`)
const RIM_SLACK: f32 = 1.001;

/// Incremental rotation between two trackball samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub angle: f32,
    pub axis: Unit<Vector3f>,
}

impl Rotation {
    /// Rotation carrying `previous` onto `current`, or `None` when the
    /// samples are too close to define an axis.
    ///
    /// The angle is `asin(|p x c| / (|p| |c|))`, which is only accurate for
    /// the small steps between cursor events.
    pub fn between(previous: &Vector3f, current: &Vector3f) -> Option<Self> {
        if (current - previous).norm() <= MOTION_EPSILON {
            return None;
        }

        let cross = previous.cross(current);
        let lengths = previous.norm() * current.norm();
        if lengths <= f32::EPSILON {
            return None;
        }

        let axis = Unit::try_new(cross, f32::EPSILON)?;
        let angle = (cross.norm() / lengths).clamp(-1.0, 1.0).asin();
        Some(Self { angle, axis })
    }

    pub fn to_quaternion(&self) -> UnitQuaternion<f32> {
        UnitQuaternion::from_axis_angle(&self.axis, self.angle)
    }
}

/// Trackball with its drag state
#[derive(Debug, Clone, PartialEq)]
pub struct Trackball {
    width: f32,
    height: f32,
    dragging: bool,
    previous: Vector3f,
    current: Vector3f,
}

impl Trackball {
    pub fn new(width: u32, height: u32) -> Self {
        let mut trackball = Self {
            width: DEFAULT_VIEWPORT.0 as f32,
            height: DEFAULT_VIEWPORT.1 as f32,
            dragging: false,
            previous: Vector3f::z(),
            current: Vector3f::z(),
        };
        trackball.resize(width, height);
        trackball
    }

    /// Follow the viewport size. Zero-sized viewports (minimized windows)
    /// are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.width = width as f32;
            self.height = height as f32;
        }
    }

    pub fn viewport(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Point on the hemisphere under the cursor, before normalization.
    ///
    /// `x` and `y` are mapped to `[-1, 1]` with `y` pointing up. The height is
    /// `sqrt(1.001 - d^2)` with `d` clamped to the unit disc.
    pub fn hemisphere_point(&self, x: f64, y: f64) -> Vector3f {
        let vx = (2.0 * x as f32 - self.width) / self.width;
        let vy = (self.height - 2.0 * y as f32) / self.height;
        let d = (vx * vx + vy * vy).sqrt().min(1.0);
        Vector3f::new(vx, vy, (RIM_SLACK - d * d).sqrt())
    }

    /// Unit trackball vector for a screen-space cursor position
    pub fn project(&self, x: f64, y: f64) -> Vector3f {
        self.hemisphere_point(x, y).normalize()
    }

    /// Start dragging from the last sampled position
    pub fn press(&mut self) {
        self.dragging = true;
        self.previous = self.current;
    }

    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Sample the cursor. Returns the incremental rotation since the previous
    /// sample while a drag is active.
    pub fn motion(&mut self, x: f64, y: f64) -> Option<Rotation> {
        self.current = self.project(x, y);
        let rotation = if self.dragging {
            Rotation::between(&self.previous, &self.current)
        } else {
            None
        };
        self.previous = self.current;
        rotation
    }
}

impl Default for Trackball {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT.0, DEFAULT_VIEWPORT.1)
    }
}
