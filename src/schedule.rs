use bevy::prelude::*;

/// One frame flows strictly forward: input mutates settings and selection,
/// the clock and positions advance, the camera reads both, and only then do
/// entity transforms get written. Nothing downstream writes upstream state.
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum FrameSet {
    UserInput,
    Simulation,
    CameraUpdate,
    EntityUpdates,
}

pub struct SchedulePlugin;

impl Plugin for SchedulePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                FrameSet::UserInput,
                FrameSet::Simulation,
                FrameSet::CameraUpdate,
                FrameSet::EntityUpdates,
            )
                .chain(),
        );
    }
}
