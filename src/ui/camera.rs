use glam::{Mat3, Mat4, Quat, Vec2, Vec3};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

use crate::config::CameraSettings;
use crate::interaction::picking::Ray;
use crate::scene::traits::CameraRig;

const MIN_DISTANCE: f32 = 0.1;

/// Orbit camera around a target point, with spring-smoothed zoom and rotation.
pub struct OrbitCamera {
    // Core camera state
    pub center: Vec3,
    pub distance: f32,
    pub target_distance: f32,
    pub rotation: Quat,
    pub target_rotation: Quat,
    pub up_direction: Vec3,

    // Projection
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,

    // Mouse state
    is_dragging: bool,
    last_mouse_pos: Option<PhysicalPosition<f64>>,
    accumulated_mouse_delta: Vec2,
    accumulated_scroll: f32,

    // Configuration
    pub orbit_sensitivity: f32,
    pub zoom_speed: f32,
    pub enable_spring: bool,
    pub spring_stiffness: f32,
    pub spring_damping: f32,
}

impl OrbitCamera {
    pub fn new(settings: &CameraSettings) -> Self {
        Self {
            center: Vec3::ZERO,
            distance: 800.0,
            target_distance: 800.0,
            rotation: Quat::IDENTITY,
            target_rotation: Quat::IDENTITY,
            up_direction: Vec3::Y,
            fov_degrees: settings.fov_degrees,
            near: settings.near,
            far: settings.far,
            aspect: 1.0,
            is_dragging: false,
            last_mouse_pos: None,
            accumulated_mouse_delta: Vec2::ZERO,
            accumulated_scroll: 0.0,
            orbit_sensitivity: settings.orbit_sensitivity,
            zoom_speed: settings.zoom_speed,
            enable_spring: settings.enable_spring,
            spring_stiffness: settings.spring_stiffness,
            spring_damping: settings.spring_damping,
        }
    }

    /// Get the current camera position in world space
    pub fn position(&self) -> Vec3 {
        self.center + self.rotation * Vec3::new(0.0, 0.0, self.distance)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.center, self.rotation * Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Orbit drags use the right or middle button; left is reserved for picking.
    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if matches!(button, MouseButton::Right | MouseButton::Middle) {
            self.is_dragging = state == ElementState::Pressed;
            if !self.is_dragging {
                self.last_mouse_pos = None;
            }
        }
    }

    pub fn handle_mouse_move(&mut self, position: PhysicalPosition<f64>) {
        if self.is_dragging {
            if let Some(last_pos) = self.last_mouse_pos {
                self.accumulated_mouse_delta.x += (position.x - last_pos.x) as f32;
                self.accumulated_mouse_delta.y += (position.y - last_pos.y) as f32;
            }
            self.last_mouse_pos = Some(position);
        }
    }

    pub fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        let scroll_amount = match delta {
            MouseScrollDelta::LineDelta(_x, y) => y,
            MouseScrollDelta::PixelDelta(pos) => (pos.y / 100.0) as f32,
        };
        self.accumulated_scroll += scroll_amount;
    }

    /// Update camera state (call once per frame)
    pub fn update(&mut self, dt: f32) {
        // Zoom scales with distance so every level zooms at a usable rate.
        if self.accumulated_scroll.abs() > 0.001 {
            let factor = 1.0 - self.accumulated_scroll * self.zoom_speed * 0.5;
            self.target_distance = (self.target_distance * factor.max(0.1)).max(MIN_DISTANCE);
        }
        self.accumulated_scroll = 0.0;

        if self.accumulated_mouse_delta.length_squared() > 0.0 {
            let delta = self.accumulated_mouse_delta * self.orbit_sensitivity;

            // Yaw around the world up axis.
            let yaw_rotation = Quat::from_axis_angle(self.up_direction, -delta.x);
            self.target_rotation = yaw_rotation * self.target_rotation;

            // Pitch around the camera's right axis, kept perpendicular to up.
            let camera_right = self.target_rotation * Vec3::X;
            let right_axis = (camera_right
                - self.up_direction * camera_right.dot(self.up_direction))
            .normalize_or_zero();
            if right_axis.length_squared() > 0.001 {
                let pitch_rotation = Quat::from_axis_angle(right_axis, -delta.y);
                self.target_rotation = pitch_rotation * self.target_rotation;
            }
            self.target_rotation = self.target_rotation.normalize();
        }
        self.accumulated_mouse_delta = Vec2::ZERO;

        if self.enable_spring {
            let distance_error = self.target_distance - self.distance;
            let velocity = distance_error * self.spring_stiffness * dt;
            self.distance += velocity * (1.0 - self.spring_damping);

            let t = (self.spring_stiffness * dt * (1.0 - self.spring_damping)).clamp(0.0, 1.0);
            self.rotation = self.rotation.slerp(self.target_rotation, t);
        } else {
            self.distance = self.target_distance;
            self.rotation = self.target_rotation;
        }
    }

    /// Orientation whose +Z points from the target towards the eye.
    fn rotation_facing(&self, back: Vec3) -> Quat {
        let up = self.up_direction;
        let right = match up.cross(back).try_normalize() {
            Some(right) => right,
            // Looking straight along the up axis.
            None => Vec3::X,
        };
        let corrected_up = back.cross(right).normalize();
        Quat::from_mat3(&Mat3::from_cols(right, corrected_up, back)).normalize()
    }
}

impl CameraRig for OrbitCamera {
    fn set_target(&mut self, target: Vec3) {
        self.center = target;
    }

    /// Snaps without spring so a level change is immediate.
    fn set_position(&mut self, position: Vec3) {
        let offset = position - self.center;
        let distance = offset.length();
        if let Some(back) = offset.try_normalize() {
            self.rotation = self.rotation_facing(back);
            self.target_rotation = self.rotation;
        }
        self.distance = distance.max(MIN_DISTANCE);
        self.target_distance = self.distance;
    }

    fn ray_through(&self, ndc: Vec2) -> Option<Ray> {
        let inverse = self.view_projection().inverse();
        if !inverse.is_finite() {
            return None;
        }
        let eye = self.position();
        let far = inverse.project_point3(ndc.extend(1.0));
        Ray::new(eye, far - eye)
    }
}
