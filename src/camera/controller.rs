use glam::{Quat, Vec2, Vec3};

use crate::camera::core::Camera;
use crate::options::CameraOptions;

/// Radians of orbit per pixel of drag at unit rotate speed.
const ROTATE_RADIANS_PER_PIXEL: f32 = 0.01;
/// Fraction of the orbit distance panned per pixel at unit pan speed.
const PAN_FRACTION_PER_PIXEL: f32 = 0.002;
/// Smallest orbit distance.
const MIN_DISTANCE: f32 = 0.01;
/// Smallest distance a fit backs off to.
const MIN_FIT_DISTANCE: f32 = MIN_DISTANCE * 10.0;

/// Largest orbit distance for a far plane at `zfar`.
///
/// Never below [`MIN_FIT_DISTANCE`], so clamping stays well-formed for any
/// far plane an options file sets.
fn max_distance(zfar: f32) -> f32 {
    (zfar * 0.5).max(MIN_FIT_DISTANCE)
}

/// Orbital camera: a focus point, a distance from it and an orientation.
#[derive(Debug, Clone)]
pub struct CameraController {
    orientation: Quat,
    distance: f32,
    focus_point: Vec3,
    options: CameraOptions,

    /// The derived perspective camera.
    pub camera: Camera,
    /// Whether the drag button is held.
    pub mouse_pressed: bool,
    /// Whether drags pan instead of rotate.
    pub shift_pressed: bool,
}

impl CameraController {
    /// Camera looking down -z at the origin from a short distance.
    #[must_use]
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        let focus_point = Vec3::ZERO;
        let distance = 3.0;
        let camera = Camera {
            eye: focus_point + Vec3::new(0.0, 0.0, distance),
            target: focus_point,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };

        Self {
            orientation: Quat::IDENTITY,
            distance,
            focus_point,
            options: options.clone(),
            camera,
            mouse_pressed: false,
            shift_pressed: false,
        }
    }

    /// Apply new projection and sensitivity settings.
    pub fn set_options(&mut self, options: &CameraOptions) {
        self.options = options.clone();
        self.camera.fovy = options.fovy;
        self.camera.znear = options.znear;
        self.camera.zfar = options.zfar;
    }

    fn update_camera_pos(&mut self) {
        let dir = self.orientation * Vec3::Z;

        self.camera.eye = self.focus_point + (dir * self.distance);
        self.camera.target = self.focus_point;
        self.camera.up = self.orientation * Vec3::Y;
    }

    /// Update the aspect ratio. Ignores zero-sized dimensions.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    /// Orbit around the focus point by a drag of `delta` pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        let speed = ROTATE_RADIANS_PER_PIXEL * self.options.rotate_speed;

        let up = self.orientation * Vec3::Y;
        let horizontal = Quat::from_axis_angle(up, -delta.x * speed);
        self.orientation = horizontal * self.orientation;

        let right = self.orientation * Vec3::X;
        let vertical = Quat::from_axis_angle(right, -delta.y * speed);
        self.orientation = (vertical * self.orientation).normalize();

        self.update_camera_pos();
    }

    /// Slide the focus point in the view plane by a drag of `delta` pixels.
    pub fn pan(&mut self, delta: Vec2) {
        let right = self.orientation * Vec3::X;
        let up = self.orientation * Vec3::Y;
        let speed =
            PAN_FRACTION_PER_PIXEL * self.options.pan_speed * self.distance;

        self.focus_point += right * (-delta.x * speed) + up * (delta.y * speed);
        self.update_camera_pos();
    }

    /// Move toward (positive) or away from (negative) the focus point.
    pub fn zoom(&mut self, delta: f32) {
        let factor = (1.0 - delta * self.options.zoom_speed).max(0.05);
        self.distance = (self.distance * factor)
            .clamp(MIN_DISTANCE, max_distance(self.options.zfar));
        self.update_camera_pos();
    }

    /// Center on the positions' centroid and back off until their bounding
    /// sphere fits the field of view.
    pub fn fit_to_positions(&mut self, positions: &[Vec3]) {
        if positions.is_empty() {
            return;
        }

        let centroid: Vec3 =
            positions.iter().copied().sum::<Vec3>() / positions.len() as f32;
        let radius = positions
            .iter()
            .map(|p| (*p - centroid).length())
            .fold(0.0f32, f32::max);

        self.focus_point = centroid;

        let half_fovy = self.camera.fovy.to_radians() / 2.0;
        let fit_distance = radius / half_fovy.tan();
        self.distance = (fit_distance * self.options.fit_padding)
            .clamp(MIN_FIT_DISTANCE, max_distance(self.options.zfar));

        self.update_camera_pos();
    }

    /// Current focus point.
    #[must_use]
    pub fn focus_point(&self) -> Vec3 {
        self.focus_point
    }

    /// Current distance from the focus point.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> CameraController {
        CameraController::new(&CameraOptions::default(), 1.0)
    }

    #[test]
    fn rotation_preserves_distance() {
        let mut c = controller();
        c.rotate(Vec2::new(40.0, -25.0));
        let d = (c.camera.eye - c.camera.target).length();
        assert!((d - c.distance()).abs() < 1e-4);
        assert_ne!(c.camera.eye, Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn zoom_in_moves_closer() {
        let mut c = controller();
        let before = c.distance();
        c.zoom(1.0);
        assert!(c.distance() < before);
        c.zoom(-2.0);
        assert!(c.distance() > before * 0.9);
    }

    #[test]
    fn pan_moves_focus_in_view_plane() {
        let mut c = controller();
        c.pan(Vec2::new(10.0, 0.0));
        let focus = c.focus_point();
        assert!(focus.x < 0.0);
        assert!(focus.z.abs() < 1e-6);
    }

    #[test]
    fn fit_centers_on_centroid() {
        let mut c = controller();
        c.fit_to_positions(&[
            Vec3::new(0.0, -1.0, -1.0),
            Vec3::new(2.0, 1.0, 1.0),
        ]);
        assert_eq!(c.focus_point(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(c.camera.target, c.focus_point());

        let radius = Vec3::new(1.0, 1.0, 1.0).length();
        let expected = radius / 22.5f32.to_radians().tan() * 1.5;
        assert!((c.distance() - expected).abs() < 1e-3);
    }

    #[test]
    fn fit_ignores_empty_input() {
        let mut c = controller();
        let before = c.camera;
        c.fit_to_positions(&[]);
        assert_eq!(c.camera, before);
    }

    #[test]
    fn tiny_far_plane_keeps_distance_bounds_ordered() {
        for zfar in [0.1, 0.01, 0.0, -5.0] {
            let options = CameraOptions {
                zfar,
                ..CameraOptions::default()
            };
            let mut c = CameraController::new(&options, 1.0);
            c.fit_to_positions(&[Vec3::ZERO, Vec3::ONE]);
            assert_eq!(c.distance(), MIN_FIT_DISTANCE);

            c.zoom(1.0);
            c.zoom(-3.0);
            assert!(c.distance() >= MIN_DISTANCE);
            assert!(c.distance() <= MIN_FIT_DISTANCE);
        }
    }

    #[test]
    fn far_plane_caps_distance() {
        assert_eq!(max_distance(1000.0), 500.0);
        assert_eq!(max_distance(0.1), MIN_FIT_DISTANCE);
    }
}
