use glam::{Mat4, Vec3};

/// Camera matrices the fog pass reconstructs world positions from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FogCamera {
    pub view: Mat4,
    /// Projection already adjusted for the target graphics API.
    pub projection: Mat4,
}

impl FogCamera {
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self { view, projection }
    }

    pub fn perspective(eye: Vec3, target: Vec3, fov_y_rad: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            view: Mat4::look_at_rh(eye, target, Vec3::Y),
            projection: Mat4::perspective_rh(fov_y_rad, aspect, near, far),
        }
    }

    /// Clip space to view space.
    pub fn clip_to_view(&self) -> Mat4 {
        self.projection.inverse()
    }

    /// Clip space to world space.
    pub fn view_proj_inverse(&self) -> Mat4 {
        (self.projection * self.view).inverse()
    }
}
