use bevy_panorbit_camera::PanOrbitCamera;

use crate::camera::CameraConfig;

/// Extension trait for `PanOrbitCamera` providing convenience methods.
pub trait PanOrbitCameraExt {
    /// Zeroes the controller's own smoothing so programmatic values land
    /// exactly where the rig's damping put them.
    fn disable_interpolation(&mut self);

    /// Restores the configured smoothing for hand-driven drags.
    fn enable_interpolation(&mut self, camera_config: &CameraConfig);
}

impl PanOrbitCameraExt for PanOrbitCamera {
    fn disable_interpolation(&mut self) {
        self.orbit_smoothness = 0.0;
        self.pan_smoothness = 0.0;
        self.zoom_smoothness = 0.0;
    }

    fn enable_interpolation(&mut self, camera_config: &CameraConfig) {
        self.orbit_smoothness = camera_config.orbit_smoothness;
        self.pan_smoothness = camera_config.pan_smoothness;
        self.zoom_smoothness = camera_config.zoom_smoothness;
    }
}
