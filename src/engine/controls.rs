//! Camera control interface.
//!
//! Control schemes are explicit implementations constructed and wired by
//! the orchestrator; they never self-register DOM listeners. The engine
//! forwards raw pointer/key events and calls `update` once per frame.

use glam::Vec3;
use log::warn;

use crate::scene::camera::Camera;

pub trait CameraControls {
    /// Advance the control state and write the resulting pose to `camera`.
    fn update(&mut self, camera: &mut Camera, dt: f32);

    fn on_pointer_down(&mut self, x: f32, y: f32, button: u8);
    fn on_pointer_move(&mut self, x: f32, y: f32);
    fn on_pointer_up(&mut self, button: u8);
    fn on_key_down(&mut self, key: char);
    fn on_key_up(&mut self, key: char);
}

/// Construct the configured control scheme. Unknown kinds fall back to
/// orbit with a warning; the scheme is a preference, not a contract.
pub fn create_controls(kind: &str, camera: &Camera) -> Box<dyn CameraControls> {
    match kind {
        "orbit" => Box::new(OrbitControls::from_camera(camera)),
        other => {
            warn!("unknown controls kind `{other}`, using orbit");
            Box::new(OrbitControls::from_camera(camera))
        }
    }
}

/// Orbit the camera around a fixed target: drag to rotate, keys to zoom.
pub struct OrbitControls {
    target: Vec3,
    distance: f32,
    yaw: f32,
    pitch: f32,
    dragging: bool,
    last: (f32, f32),
    zoom_rate: f32,
    zooming: f32,
}

impl OrbitControls {
    const ROTATE_SPEED: f32 = 0.005;

    pub fn from_camera(camera: &Camera) -> Self {
        let target = camera.lookat.unwrap_or(Vec3::ZERO);
        let offset = camera.position - target;
        let distance = offset.length().max(1.0);
        OrbitControls {
            target,
            distance,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            dragging: false,
            last: (0.0, 0.0),
            zoom_rate: 0.5,
            zooming: 0.0,
        }
    }
}

impl CameraControls for OrbitControls {
    fn update(&mut self, camera: &mut Camera, dt: f32) {
        self.distance = (self.distance * (1.0 + self.zooming * self.zoom_rate * dt)).max(1.0);
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        camera.position = self.target + Vec3::new(sy * cp, sp, cy * cp) * self.distance;
        camera.look_at(self.target);
    }

    fn on_pointer_down(&mut self, x: f32, y: f32, button: u8) {
        if button == 0 {
            self.dragging = true;
            self.last = (x, y);
        }
    }

    fn on_pointer_move(&mut self, x: f32, y: f32) {
        if self.dragging {
            let (lx, ly) = self.last;
            self.yaw -= (x - lx) * Self::ROTATE_SPEED;
            self.pitch = (self.pitch + (y - ly) * Self::ROTATE_SPEED)
                .clamp(-std::f32::consts::FRAC_PI_2 + 0.01, std::f32::consts::FRAC_PI_2 - 0.01);
            self.last = (x, y);
        }
    }

    fn on_pointer_up(&mut self, button: u8) {
        if button == 0 {
            self.dragging = false;
        }
    }

    fn on_key_down(&mut self, key: char) {
        match key {
            'w' => self.zooming = -1.0,
            's' => self.zooming = 1.0,
            _ => {}
        }
    }

    fn on_key_up(&mut self, key: char) {
        if key == 'w' || key == 's' {
            self.zooming = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera {
            fov_deg: 35.0,
            aspect: 1.0,
            near: 1.0,
            far: 2000.0,
            position: Vec3::new(0.0, 0.0, 800.0),
            rotation: Vec3::ZERO,
            lookat: None,
            up: Vec3::Y,
        }
    }

    #[test]
    fn orbit_preserves_distance_while_dragging() {
        let mut cam = camera();
        let mut controls = OrbitControls::from_camera(&cam);
        controls.on_pointer_down(0.0, 0.0, 0);
        controls.on_pointer_move(120.0, 40.0);
        controls.on_pointer_up(0);
        controls.update(&mut cam, 0.016);
        assert!((cam.position.length() - 800.0).abs() < 1e-2);
        assert_eq!(cam.lookat, Some(Vec3::ZERO));
    }

    #[test]
    fn zoom_keys_change_distance() {
        let mut cam = camera();
        let mut controls = OrbitControls::from_camera(&cam);
        controls.on_key_down('w');
        controls.update(&mut cam, 1.0);
        assert!(cam.position.length() < 800.0);
        controls.on_key_up('w');
    }
}
