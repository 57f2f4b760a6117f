use bevy::diagnostic::Diagnostic;
use bevy::diagnostic::DiagnosticsStore;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;

use crate::schedule::FrameSet;
use crate::settings::QualityLevel;

/// Sustained frame rates below this drop the cosmetic tier.
const DROP_BELOW_FPS: f64 = 27.0;
/// Recovery threshold sits well above the drop threshold so the tier never
/// flaps when the frame rate hovers around one value.
const RECOVER_ABOVE_FPS: f64 = 50.0;
/// The drop must hold this long before effects are reduced; one hitch
/// (asset swap, window resize) should not degrade the scene.
const SUSTAIN_SECONDS: f32 = 1.5;

pub struct PerfPlugin;

impl Plugin for PerfPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(FrameTimeDiagnosticsPlugin::default())
            .add_systems(Update, watch_frame_rate.in_set(FrameSet::UserInput));
    }
}

const fn next_quality(current: QualityLevel, fps: f64) -> QualityLevel {
    match current {
        QualityLevel::Full if fps < DROP_BELOW_FPS => QualityLevel::Reduced,
        QualityLevel::Reduced if fps > RECOVER_ABOVE_FPS => QualityLevel::Full,
        _ => current,
    }
}

fn watch_frame_rate(
    time: Res<Time>,
    diagnostics: Res<DiagnosticsStore>,
    mut quality: ResMut<QualityLevel>,
    mut low_for: Local<f32>,
) {
    let Some(fps) = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(Diagnostic::smoothed)
    else {
        return;
    };

    let proposed = next_quality(*quality, fps);
    if proposed == QualityLevel::Reduced && *quality == QualityLevel::Full {
        *low_for += time.delta_secs();
        if *low_for >= SUSTAIN_SECONDS {
            *low_for = 0.0;
            *quality = QualityLevel::Reduced;
            debug!("frame rate {fps:.0} fps, reducing effects");
        }
    } else {
        *low_for = 0.0;
        if proposed != *quality {
            *quality = proposed;
            debug!("frame rate {fps:.0} fps, restoring full effects");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_frame_rate_reduces_effects() {
        assert_eq!(next_quality(QualityLevel::Full, 20.0), QualityLevel::Reduced);
    }

    #[test]
    fn recovery_needs_comfortable_headroom() {
        // 40 fps is above the drop threshold but below recovery: stay reduced
        assert_eq!(next_quality(QualityLevel::Reduced, 40.0), QualityLevel::Reduced);
        assert_eq!(next_quality(QualityLevel::Reduced, 60.0), QualityLevel::Full);
    }

    #[test]
    fn band_between_thresholds_never_flaps() {
        for fps in [28.0, 35.0, 45.0, 49.9] {
            assert_eq!(next_quality(QualityLevel::Full, fps), QualityLevel::Full);
            assert_eq!(next_quality(QualityLevel::Reduced, fps), QualityLevel::Reduced);
        }
    }
}
