use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::catalog::BodyCatalog;
use crate::schedule::FrameSet;
use crate::settings::ViewerSettings;

const ORBIT_LINE_WIDTH: f32 = 1.2;
const ORBIT_ALPHA: f32 = 0.34;
const ORBIT_SEGMENTS: u32 = 220;

pub struct OrbitsPlugin;

impl Plugin for OrbitsPlugin {
    fn build(&self, app: &mut App) {
        app.init_gizmo_group::<OrbitPathGizmo>()
            .add_systems(Startup, configure_orbit_gizmos)
            .add_systems(Update, draw_orbit_paths.in_set(FrameSet::EntityUpdates));
    }
}

#[derive(Default, Reflect, GizmoConfigGroup)]
struct OrbitPathGizmo {}

fn configure_orbit_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<OrbitPathGizmo>();
    config.line.width = ORBIT_LINE_WIDTH;
}

/// Immediate-mode circles, one per top-level orbit. Moons skip a path -
/// their track moves with the parent and would read as noise.
fn draw_orbit_paths(
    settings: Res<ViewerSettings>,
    catalog: Res<BodyCatalog>,
    mut gizmos: Gizmos<OrbitPathGizmo>,
) {
    if !settings.show_orbits {
        return;
    }

    let flat = Quat::from_rotation_x(FRAC_PI_2);
    for body in catalog.primary_orbits() {
        #[allow(clippy::cast_possible_truncation, reason = "display-scale distances")]
        let radius = body.distance as f32;
        gizmos
            .circle(flat, radius, body.orbit_color.with_alpha(ORBIT_ALPHA))
            .resolution(ORBIT_SEGMENTS);
    }
}
