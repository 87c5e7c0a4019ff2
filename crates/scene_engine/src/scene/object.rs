//! Default scene payload
//!
//! Local transform, appearance and motion data for one object. The hierarchy
//! store treats this as opaque; consumers (propagation, rendering, simulation)
//! give it meaning.

use crate::foundation::math::{Mat4, Transform, Vec3};

/// RGBA colour with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Color {
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Opaque white
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque blue
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);

    /// Create an opaque colour
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLUE
    }
}

/// Payload stored in each scene node
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Position relative to the parent
    pub local_position: Vec3,
    /// Euler rotation (radians, XYZ) relative to the parent
    pub local_rotation: Vec3,
    /// Scale relative to the parent
    pub local_scale: Vec3,
    /// Cached world matrix, written by whoever propagates transforms
    pub world: Mat4,
    /// Fill colour
    pub color: Color,
    /// Outline colour
    pub border_color: Color,
    /// Whether renderers should draw the object
    pub is_visible: bool,
    /// Linear velocity in local units per second
    pub velocity_per_sec: Vec3,
    /// Angular velocity as Euler radians per second
    pub euler_rot_per_sec: Vec3,
}

impl Default for SceneObject {
    fn default() -> Self {
        Self {
            local_position: Vec3::zeros(),
            local_rotation: Vec3::zeros(),
            local_scale: Vec3::new(1.0, 1.0, 1.0),
            world: Mat4::identity(),
            color: Color::BLUE,
            border_color: Color::BLACK,
            is_visible: true,
            velocity_per_sec: Vec3::zeros(),
            euler_rot_per_sec: Vec3::zeros(),
        }
    }
}

impl SceneObject {
    /// Create an object at the origin with default appearance
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: Set local position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.local_position = position;
        self
    }

    /// Builder pattern: Set local Euler rotation (radians)
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.local_rotation = rotation;
        self
    }

    /// Builder pattern: Set uniform local scale
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.local_scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Builder pattern: Set colour
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Builder pattern: Set linear and angular velocity
    pub fn with_motion(mut self, velocity_per_sec: Vec3, euler_rot_per_sec: Vec3) -> Self {
        self.velocity_per_sec = velocity_per_sec;
        self.euler_rot_per_sec = euler_rot_per_sec;
        self
    }

    /// Local transform as a matrix (translation * rotation * scale)
    pub fn local_matrix(&self) -> Mat4 {
        Transform::from_euler(self.local_position, self.local_rotation, self.local_scale)
            .to_matrix()
    }
}
