use bevy::core_pipeline::bloom::Bloom;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::pbr::DistanceFog;
use bevy::pbr::FogFalloff;
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;
use bevy_panorbit_camera::PanOrbitCameraPlugin;

use crate::camera::CameraConfig;
use crate::camera::CameraInteraction;
use crate::camera::PanOrbitCameraExt;
use crate::catalog::BodyCatalog;
use crate::ease::damp;
use crate::ease::damp3;
use crate::ease::damp_angle;
use crate::schedule::FrameSet;
use crate::selection::SelectedBody;
use crate::settings::ViewerSettings;
use crate::simulation::WorldPositions;
use crate::viewer_input::ViewerAction;
use crate::viewer_input::just_pressed;

/// Initial viewpoint: slightly above the ecliptic, looking at the Sun.
const START_PITCH: f32 = 0.27;
const ZOOM_MIN: f32 = 8.0;
const ZOOM_MAX: f32 = 200.0;

pub struct RigPlugin;

impl Plugin for RigPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PanOrbitCameraPlugin)
            .init_resource::<CameraDirector>()
            .add_systems(Startup, spawn_camera_rig)
            .add_systems(
                Update,
                home_view
                    .run_if(just_pressed(ViewerAction::ResetView))
                    .in_set(FrameSet::CameraUpdate)
                    .before(drive_camera),
            )
            .add_systems(Update, drive_camera.in_set(FrameSet::CameraUpdate))
            .add_systems(Update, update_bloom_settings);
    }
}

/// Phase accumulators for the automatic camera moves. Two independent
/// phases: a slow azimuthal spin and a faster vertical sway, so the follow
/// orbit drifts instead of looping visibly.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct CameraDirector {
    spin: f32,
    sway: f32,
}

fn spawn_camera_rig(mut commands: Commands, config: Res<CameraConfig>) {
    commands.spawn((
        Camera3d::default(),
        Camera {
            hdr: true,
            ..default()
        },
        Tonemapping::TonyMcMapface,
        get_bloom_settings(&config),
        DistanceFog {
            color: Color::srgb_u8(4, 10, 23),
            falloff: FogFalloff::Exponential { density: 0.0055 },
            ..default()
        },
        PanOrbitCamera {
            focus: Vec3::ZERO,
            radius: Some(config.idle_orbit_radius),
            yaw: Some(0.0),
            pitch: Some(START_PITCH),
            zoom_lower_limit: ZOOM_MIN,
            zoom_upper_limit: Some(ZOOM_MAX),
            orbit_smoothness: config.orbit_smoothness,
            pan_smoothness: config.pan_smoothness,
            zoom_smoothness: config.zoom_smoothness,
            ..default()
        },
    ));
}

/// Decide what the camera should be doing this frame and ease it there.
///
/// Three regimes: the user's hand (do nothing), following the selected body
/// (always retarget; orbit it too when cinematic and eligible), or the idle
/// whole-scene orbit. Every applied change goes through damped interpolation
/// - the camera never snaps.
fn drive_camera(
    time: Res<Time>,
    real_time: Res<Time<Real>>,
    settings: Res<ViewerSettings>,
    config: Res<CameraConfig>,
    interaction: Res<CameraInteraction>,
    selected: Res<SelectedBody>,
    catalog: Res<BodyCatalog>,
    positions: Res<WorldPositions>,
    mut director: ResMut<CameraDirector>,
    mut rig: Query<&mut PanOrbitCamera>,
) {
    // first frames before the rig exists: nothing to drive
    let Ok(mut pan_orbit) = rig.single_mut() else {
        return;
    };

    let dt = time.delta_secs();
    let now = real_time.elapsed_secs_f64();

    if interaction.is_interacting {
        // hand the controller back its own smoothing for the drag
        pan_orbit.enable_interpolation(&config);
        return;
    }

    let auto = interaction.auto_eligible(now);

    if settings.follow_selection {
        // continuous retargeting: the look-target eases onto the selection
        // whenever the user is not actively overriding it
        let body_position = positions.get_render(selected.id);
        pan_orbit.target_focus = damp3(
            pan_orbit.target_focus,
            body_position,
            config.follow_target_rate,
            dt,
        );
        pan_orbit.force_update = true;

        if !settings.cinematic_camera || !auto {
            return;
        }

        let body = catalog.get(selected.id);
        let distance = config.follow_distance(body.radius);

        director.spin += dt * config.follow_spin_speed;
        director.sway += dt * config.follow_sway_speed;

        let lift = distance * config.follow_elevation
            + director.sway.sin() * config.follow_sway_lift;

        pan_orbit.disable_interpolation();
        apply_orbit_pose(
            &mut pan_orbit,
            director.spin,
            lift.atan2(distance),
            distance.hypot(lift),
            config.follow_position_rate,
            dt,
        );
        return;
    }

    if settings.cinematic_camera && auto {
        director.spin += dt * config.idle_spin_speed;

        let height = config.idle_orbit_height
            + (director.spin * config.idle_bob_ratio).sin() * config.idle_bob_amplitude;
        let radius = config.idle_orbit_radius;

        pan_orbit.disable_interpolation();
        pan_orbit.target_focus = damp3(
            pan_orbit.target_focus,
            Vec3::ZERO,
            config.idle_target_rate,
            dt,
        );
        apply_orbit_pose(
            &mut pan_orbit,
            director.spin,
            height.atan2(radius),
            radius.hypot(height),
            config.idle_position_rate,
            dt,
        );
    }
}

/// Ease the controller's orbital parameters toward a desired pose. Reads the
/// actual current values (not the targets) so a resumed auto orbit swings in
/// from wherever the user left the camera.
fn apply_orbit_pose(
    pan_orbit: &mut PanOrbitCamera,
    yaw: f32,
    pitch: f32,
    radius: f32,
    rate: f32,
    dt: f32,
) {
    let current_yaw = pan_orbit.yaw.unwrap_or(pan_orbit.target_yaw);
    let current_pitch = pan_orbit.pitch.unwrap_or(pan_orbit.target_pitch);
    let current_radius = pan_orbit.radius.unwrap_or(pan_orbit.target_radius);

    pan_orbit.target_yaw = damp_angle(current_yaw, yaw, rate, dt);
    pan_orbit.target_pitch = damp(current_pitch, pitch, rate, dt);
    pan_orbit.target_radius = damp(current_radius, radius, rate, dt);
    pan_orbit.force_update = true;
}

/// Glide back to the starting viewpoint, letting the controller's own
/// smoothing carry the move.
fn home_view(config: Res<CameraConfig>, mut rig: Query<&mut PanOrbitCamera>) {
    if let Ok(mut pan_orbit) = rig.single_mut() {
        pan_orbit.enable_interpolation(&config);
        pan_orbit.target_focus = Vec3::ZERO;
        pan_orbit.target_yaw = 0.0;
        pan_orbit.target_pitch = START_PITCH;
        pan_orbit.target_radius = config.idle_orbit_radius;
        pan_orbit.force_update = true;
    }
}

// propagate bloom tuning back to the camera when the inspector changes it
fn update_bloom_settings(
    camera_config: Res<CameraConfig>,
    mut bloom: Query<&mut Bloom, With<PanOrbitCamera>>,
) {
    if camera_config.is_changed()
        && let Ok(mut current) = bloom.single_mut()
    {
        *current = get_bloom_settings(&camera_config);
    }
}

fn get_bloom_settings(camera_config: &CameraConfig) -> Bloom {
    let mut bloom = Bloom::NATURAL;
    bloom.intensity = camera_config.bloom_intensity;
    bloom
}
