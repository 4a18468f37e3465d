use bevy::prelude::*;

/// Render surface size and camera transforms captured for unprojection.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Render width in physical pixels.
    pub width: f32,
    /// Render height in physical pixels.
    pub height: f32,
    /// View-from-world.
    pub view: Mat4,
    /// Clip-from-view.
    pub projection: Mat4,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        }
    }
}

/// Map a normalized screen point plus NDC depth into world space.
///
/// `x` and `y` are fractions of the render surface (origin top-left) and are
/// scaled to pixels before unprojecting through an identity model transform.
pub fn screen_to_world(x: f32, y: f32, z: f32, view: &ViewState) -> Vec3 {
    let screen = Vec3::new(x * view.width, y * view.height, z);
    unproject(
        screen,
        view.width,
        view.height,
        Mat4::IDENTITY,
        view.view,
        view.projection,
    )
}

/// Pixel-space point (y down) and NDC depth back to world space.
pub fn unproject(
    screen: Vec3,
    width: f32,
    height: f32,
    world: Mat4,
    view: Mat4,
    projection: Mat4,
) -> Vec3 {
    let ndc = Vec3::new(
        screen.x / width * 2.0 - 1.0,
        1.0 - screen.y / height * 2.0,
        screen.z,
    );
    let clip_from_world = projection * view * world;
    clip_from_world.inverse().project_point3(ndc)
}

/// NDC depth of a point `distance` metres in front of a reverse-Z infinite
/// perspective camera with the given near plane.
pub fn ndc_depth_from_distance(distance: f32, near: f32) -> f32 {
    if distance <= near {
        return 1.0;
    }
    near / distance
}
