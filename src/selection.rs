use bevy::prelude::*;

use crate::camera::CameraInteraction;
use crate::catalog::BodyId;
use crate::schedule::FrameSet;

pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BodySelected>()
            .init_resource::<SelectedBody>()
            .add_systems(Update, apply_selection.in_set(FrameSet::UserInput));
    }
}

/// The one body the viewer is focused on. Changed only by explicit user
/// action (clicking a body, a selector pill, or the cycle keys) - never by
/// the camera or the simulation.
#[derive(Resource, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Resource)]
pub struct SelectedBody {
    pub id: BodyId,
}

impl Default for SelectedBody {
    fn default() -> Self { Self { id: BodyId::Earth } }
}

/// Fired with the chosen id whenever the user activates a body, from any of
/// the selection paths. Downstream listeners (HUD, camera) react to this.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodySelected(pub BodyId);

fn apply_selection(
    mut picks: EventReader<BodySelected>,
    mut selected: ResMut<SelectedBody>,
    mut interaction: ResMut<CameraInteraction>,
) {
    let Some(&BodySelected(id)) = picks.read().last() else {
        return;
    };

    if id == selected.id {
        return;
    }

    selected.id = id;
    // new explicit intent beats any sticky manual camera lock
    interaction.clear_override();
    debug!("selected {id:?}");
}
