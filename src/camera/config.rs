use bevy::prelude::*;
use bevy_inspector_egui::inspector_options::std_options::NumberDisplay;
use bevy_inspector_egui::prelude::*;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;

use crate::viewer_input::ViewerAction;
use crate::viewer_input::toggle_active;

pub struct CameraConfigPlugin;

impl Plugin for CameraConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            ResourceInspectorPlugin::<CameraConfig>::default()
                .run_if(toggle_active(false, ViewerAction::CameraInspector)),
        )
        .init_resource::<CameraConfig>();
    }
}

/// Tuning for the automatic camera. Damping values are decay rates in
/// 1/seconds - higher settles faster. The defaults are tuned for a lazy,
/// cinematic feel rather than responsiveness.
#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone, Copy)]
#[reflect(Resource, InspectorOptions)]
pub struct CameraConfig {
    // retarget / reposition damping
    #[inspector(min = 0.5, max = 30.0, display = NumberDisplay::Slider)]
    pub follow_target_rate:    f32,
    #[inspector(min = 0.5, max = 30.0, display = NumberDisplay::Slider)]
    pub follow_position_rate:  f32,
    #[inspector(min = 0.5, max = 30.0, display = NumberDisplay::Slider)]
    pub idle_target_rate:      f32,
    #[inspector(min = 0.5, max = 30.0, display = NumberDisplay::Slider)]
    pub idle_position_rate:    f32,

    // orbit around the selected body
    pub follow_spin_speed:     f32,
    pub follow_sway_speed:     f32,
    pub follow_elevation:      f32,
    pub follow_sway_lift:      f32,
    pub follow_distance_min:   f32,
    pub follow_distance_scale: f32,
    pub follow_distance_pad:   f32,

    // whole-scene idle orbit
    pub idle_orbit_radius:     f32,
    pub idle_orbit_height:     f32,
    pub idle_bob_amplitude:    f32,
    pub idle_bob_ratio:        f32,
    pub idle_spin_speed:       f32,

    // how long auto motion stays suspended around user interaction
    #[inspector(min = 0.0, max = 5.0, display = NumberDisplay::Slider)]
    pub drag_grace_seconds:    f64,
    #[inspector(min = 0.0, max = 5.0, display = NumberDisplay::Slider)]
    pub release_grace_seconds: f64,

    // smoothing handed to the pan-orbit controller during manual drags
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub orbit_smoothness:      f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub pan_smoothness:        f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub zoom_smoothness:       f32,

    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub bloom_intensity:       f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow_target_rate:    5.0,
            follow_position_rate:  5.5,
            idle_target_rate:      11.0,
            idle_position_rate:    14.0,

            follow_spin_speed:     0.16,
            follow_sway_speed:     0.85,
            follow_elevation:      0.38,
            follow_sway_lift:      1.1,
            follow_distance_min:   8.0,
            follow_distance_scale: 8.0,
            follow_distance_pad:   6.0,

            idle_orbit_radius:     90.0,
            idle_orbit_height:     28.0,
            idle_bob_amplitude:    6.0,
            idle_bob_ratio:        1.6,
            idle_spin_speed:       0.04,

            drag_grace_seconds:    0.9,
            release_grace_seconds: 1.2,

            orbit_smoothness:      0.08,
            pan_smoothness:        0.06,
            zoom_smoothness:       0.1,

            bloom_intensity:       0.35,
        }
    }
}

impl CameraConfig {
    /// Orbit distance for a followed body, scaled by its visual radius so
    /// moons fill the frame about as much as gas giants do.
    pub fn follow_distance(&self, body_radius: f32) -> f32 {
        (body_radius * self.follow_distance_scale + self.follow_distance_pad)
            .max(self.follow_distance_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_distance_clamps_small_bodies() {
        let config = CameraConfig::default();
        // Moon radius 0.28 -> 8.24, barely above the clamp; Pluto 0.42 clears it
        assert!(config.follow_distance(0.05) >= config.follow_distance_min);
        assert_eq!(config.follow_distance(0.05), config.follow_distance_min);
    }

    #[test]
    fn follow_distance_scales_with_radius() {
        let config = CameraConfig::default();
        assert!(config.follow_distance(2.9) > config.follow_distance(1.0));
        assert_eq!(config.follow_distance(1.0), 14.0);
    }
}
