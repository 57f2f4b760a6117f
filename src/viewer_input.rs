use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::catalog::BodyId;
use crate::schedule::FrameSet;
use crate::selection::BodySelected;
use crate::selection::SelectedBody;
use crate::settings::ViewerSettings;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<ViewerAction>::default())
            .init_resource::<ActionState<ViewerAction>>()
            .insert_resource(ViewerAction::default_input_map())
            .add_systems(
                Update,
                (apply_playback_actions, cycle_selection).in_set(FrameSet::UserInput),
            );
    }
}

#[derive(Actionlike, Reflect, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewerAction {
    TogglePlayback,
    SpeedUp,
    SpeedDown,
    ToggleOrbits,
    ToggleLabels,
    ToggleFollow,
    ToggleCinematic,
    NextBody,
    PreviousBody,
    ResetView,
    SettingsInspector,
    CameraInspector,
}

impl ViewerAction {
    fn default_input_map() -> InputMap<Self> {
        InputMap::new([
            (Self::TogglePlayback, KeyCode::Space),
            (Self::SpeedUp, KeyCode::Equal),
            (Self::SpeedDown, KeyCode::Minus),
            (Self::ToggleOrbits, KeyCode::KeyO),
            (Self::ToggleLabels, KeyCode::KeyL),
            (Self::ToggleFollow, KeyCode::KeyF),
            (Self::ToggleCinematic, KeyCode::KeyC),
            (Self::NextBody, KeyCode::BracketRight),
            (Self::PreviousBody, KeyCode::BracketLeft),
            (Self::ResetView, KeyCode::KeyH),
            (Self::SettingsInspector, KeyCode::F1),
            (Self::CameraInspector, KeyCode::F2),
        ])
    }
}

/// Run condition: true on the frame the action was pressed.
pub fn just_pressed(
    action: ViewerAction,
) -> impl FnMut(Res<ActionState<ViewerAction>>) -> bool + Clone {
    move |state: Res<ActionState<ViewerAction>>| state.just_pressed(&action)
}

/// Run condition that flips a latched bool each time the action is pressed.
/// Used to show/hide the inspector panels.
pub fn toggle_active(
    default: bool,
    action: ViewerAction,
) -> impl FnMut(Res<ActionState<ViewerAction>>, Local<Option<bool>>) -> bool + Clone {
    move |state: Res<ActionState<ViewerAction>>, mut active: Local<Option<bool>>| {
        let active = active.get_or_insert(default);
        if state.just_pressed(&action) {
            *active = !*active;
        }
        *active
    }
}

fn apply_playback_actions(
    actions: Res<ActionState<ViewerAction>>,
    mut settings: ResMut<ViewerSettings>,
) {
    if actions.just_pressed(&ViewerAction::TogglePlayback) {
        settings.is_playing = !settings.is_playing;
        debug!("playback {}", if settings.is_playing { "resumed" } else { "paused" });
    }
    if actions.just_pressed(&ViewerAction::SpeedUp) {
        settings.step_speed(1.0);
    }
    if actions.just_pressed(&ViewerAction::SpeedDown) {
        settings.step_speed(-1.0);
    }
    if actions.just_pressed(&ViewerAction::ToggleOrbits) {
        settings.show_orbits = !settings.show_orbits;
    }
    if actions.just_pressed(&ViewerAction::ToggleLabels) {
        settings.show_labels = !settings.show_labels;
    }
    if actions.just_pressed(&ViewerAction::ToggleFollow) {
        settings.follow_selection = !settings.follow_selection;
    }
    if actions.just_pressed(&ViewerAction::ToggleCinematic) {
        settings.cinematic_camera = !settings.cinematic_camera;
    }
}

/// `[` and `]` walk the catalog in its fixed display order.
fn cycle_selection(
    actions: Res<ActionState<ViewerAction>>,
    selected: Res<SelectedBody>,
    mut picks: EventWriter<BodySelected>,
) {
    let step: isize = if actions.just_pressed(&ViewerAction::NextBody) {
        1
    } else if actions.just_pressed(&ViewerAction::PreviousBody) {
        -1
    } else {
        return;
    };

    let count = BodyId::COUNT as isize;
    let current = selected.id.index() as isize;
    let next = (current + step).rem_euclid(count) as usize;
    picks.write(BodySelected(BodyId::ALL[next]));
}
