use bevy::prelude::*;
use bevy_inspector_egui::inspector_options::std_options::NumberDisplay;
use bevy_inspector_egui::prelude::*;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;

use crate::viewer_input::ViewerAction;
use crate::viewer_input::toggle_active;

/// UI bounds for the time-warp slider.
pub const SPEED_MIN: f32 = 0.2;
pub const SPEED_MAX: f32 = 4.2;
pub const SPEED_STEP: f32 = 0.2;

pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ViewerSettings>()
            .init_resource::<ViewerSettings>()
            .init_resource::<QualityLevel>()
            .add_plugins(
                ResourceInspectorPlugin::<ViewerSettings>::default()
                    .run_if(toggle_active(false, ViewerAction::SettingsInspector)),
            );
    }
}

/// Everything the HUD and keyboard can change. The simulation and camera
/// only ever read this - mutation stays on the input side of the frame.
#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone, Copy)]
#[reflect(Resource, InspectorOptions)]
pub struct ViewerSettings {
    pub is_playing:       bool,
    #[inspector(min = 0.2, max = 4.2, display = NumberDisplay::Slider)]
    pub speed:            f32,
    pub show_orbits:      bool,
    pub show_labels:      bool,
    pub follow_selection: bool,
    pub cinematic_camera: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            is_playing:       true,
            speed:            1.4,
            show_orbits:      true,
            show_labels:      true,
            follow_selection: true,
            cinematic_camera: true,
        }
    }
}

impl ViewerSettings {
    pub fn step_speed(&mut self, direction: f32) {
        self.speed = (self.speed + direction * SPEED_STEP).clamp(SPEED_MIN, SPEED_MAX);
    }
}

/// Cosmetic fidelity tier, sampled once per frame by the effect systems.
/// Derived from the frame-rate monitor, never from rendering internals.
#[derive(Resource, Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[reflect(Resource)]
pub enum QualityLevel {
    #[default]
    Full,
    Reduced,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_steps_stay_inside_ui_bounds() {
        let mut settings = ViewerSettings::default();
        for _ in 0..40 {
            settings.step_speed(1.0);
        }
        assert_eq!(settings.speed, SPEED_MAX);
        for _ in 0..40 {
            settings.step_speed(-1.0);
        }
        assert_eq!(settings.speed, SPEED_MIN);
    }
}
