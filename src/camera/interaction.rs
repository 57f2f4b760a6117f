use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::input::mouse::AccumulatedMouseScroll;
use bevy::prelude::*;

use crate::camera::CameraConfig;
use crate::schedule::FrameSet;
use crate::settings::ViewerSettings;

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraInteraction>().add_systems(
            Update,
            (track_pointer_activity, watch_mode_toggles).in_set(FrameSet::UserInput),
        );
    }
}

/// Transient record of what the user's hand is doing to the camera.
///
/// `manual_override` is the sticky lock: set the moment a drag or zoom
/// starts, it suppresses automatic camera motion until either the grace
/// window runs out or the user expresses new intent (picking a body,
/// toggling a camera mode). `resume_auto_at` is compared against the
/// monotonic clock, read once per frame.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CameraInteraction {
    pub is_interacting:  bool,
    pub manual_override: bool,
    pub resume_auto_at:  f64,
}

impl CameraInteraction {
    pub fn begin_drag(&mut self, now: f64, grace: f64) {
        self.is_interacting = true;
        self.manual_override = true;
        self.resume_auto_at = now + grace;
    }

    /// Every interaction tick slides the grace window forward.
    pub fn drag_tick(&mut self, now: f64, grace: f64) {
        if self.is_interacting {
            self.resume_auto_at = now + grace;
        }
    }

    pub fn end_drag(&mut self, now: f64, grace: f64) {
        self.is_interacting = false;
        self.resume_auto_at = now + grace;
    }

    /// Wheel zoom has no press/release pair - it locks and schedules the
    /// release grace in one step.
    pub fn zoom_tick(&mut self, now: f64, grace: f64) {
        self.manual_override = true;
        self.resume_auto_at = now + grace;
    }

    /// New explicit intent (selection change, camera mode toggle).
    pub fn clear_override(&mut self) {
        self.manual_override = false;
    }

    /// The lock persists only through the grace window; once that elapses
    /// with no drag in progress it dissolves on its own.
    pub fn expire(&mut self, now: f64) {
        if self.manual_override && !self.is_interacting && now >= self.resume_auto_at {
            self.manual_override = false;
        }
    }

    pub fn auto_eligible(&self, now: f64) -> bool {
        !self.manual_override && !self.is_interacting && now >= self.resume_auto_at
    }
}

fn track_pointer_activity(
    real_time: Res<Time<Real>>,
    buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    config: Res<CameraConfig>,
    mut interaction: ResMut<CameraInteraction>,
) {
    let now = real_time.elapsed_secs_f64();

    if buttons.just_pressed(MouseButton::Left) {
        interaction.begin_drag(now, config.drag_grace_seconds);
    } else if buttons.just_released(MouseButton::Left) {
        interaction.end_drag(now, config.release_grace_seconds);
    } else if motion.delta != Vec2::ZERO {
        interaction.drag_tick(now, config.drag_grace_seconds);
    }

    if scroll.delta.y != 0.0 {
        interaction.zoom_tick(now, config.release_grace_seconds);
    }

    interaction.expire(now);
}

/// Flipping follow or cinematic is new intent: the sticky lock drops at once.
fn watch_mode_toggles(
    settings: Res<ViewerSettings>,
    mut interaction: ResMut<CameraInteraction>,
    mut previous: Local<Option<(bool, bool)>>,
) {
    let current = (settings.follow_selection, settings.cinematic_camera);
    if let Some(seen) = *previous {
        if seen != current {
            interaction.clear_override();
            debug!("camera mode changed, dropping manual override");
        }
    }
    *previous = Some(current);
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAG_GRACE: f64 = 0.9;
    const RELEASE_GRACE: f64 = 1.2;

    #[test]
    fn drag_start_locks_and_schedules_resume() {
        let mut state = CameraInteraction::default();
        state.begin_drag(10.0, DRAG_GRACE);

        assert!(state.is_interacting);
        assert!(state.manual_override);
        assert!((state.resume_auto_at - 10.9).abs() < 1e-12);
        assert!(!state.auto_eligible(10.0));
    }

    #[test]
    fn interaction_ticks_slide_the_grace_window() {
        let mut state = CameraInteraction::default();
        state.begin_drag(10.0, DRAG_GRACE);
        state.drag_tick(10.5, DRAG_GRACE);
        assert!((state.resume_auto_at - 11.4).abs() < 1e-12);
    }

    #[test]
    fn ticks_without_a_drag_do_nothing() {
        let mut state = CameraInteraction::default();
        state.drag_tick(10.0, DRAG_GRACE);
        assert_eq!(state.resume_auto_at, 0.0);
        assert!(!state.manual_override);
    }

    #[test]
    fn release_keeps_the_lock_through_the_grace_window() {
        let mut state = CameraInteraction::default();
        state.begin_drag(10.0, DRAG_GRACE);
        state.end_drag(11.0, RELEASE_GRACE);

        assert!(!state.is_interacting);
        assert!(state.manual_override, "lock must survive the release itself");
        state.expire(11.5);
        assert!(!state.auto_eligible(11.5), "still inside the grace window");
    }

    #[test]
    fn grace_elapsing_dissolves_the_lock() {
        let mut state = CameraInteraction::default();
        state.begin_drag(10.0, DRAG_GRACE);
        state.end_drag(11.0, RELEASE_GRACE);

        state.expire(12.3);
        assert!(state.auto_eligible(12.3));
    }

    #[test]
    fn selection_change_clears_the_lock_mid_grace() {
        let mut state = CameraInteraction::default();
        state.begin_drag(10.0, DRAG_GRACE);
        state.end_drag(11.0, RELEASE_GRACE);

        state.clear_override();
        assert!(!state.manual_override);
        // the timestamp gate still applies even with the lock gone
        assert!(!state.auto_eligible(11.5));
        assert!(state.auto_eligible(12.3));
    }

    #[test]
    fn lock_never_dissolves_while_dragging() {
        let mut state = CameraInteraction::default();
        state.begin_drag(10.0, DRAG_GRACE);
        state.expire(20.0);
        assert!(state.manual_override, "an active drag holds the lock open");
        assert!(!state.auto_eligible(20.0));
    }

    #[test]
    fn zoom_locks_without_an_active_drag() {
        let mut state = CameraInteraction::default();
        state.zoom_tick(5.0, RELEASE_GRACE);

        assert!(!state.is_interacting);
        assert!(state.manual_override);
        assert!(!state.auto_eligible(6.0));
        state.expire(6.3);
        assert!(state.auto_eligible(6.3));
    }
}
