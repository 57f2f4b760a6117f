mod config;
mod interaction;
mod pan_orbit_ext;
mod rig;

use bevy::prelude::*;

pub use config::CameraConfig;
pub use interaction::CameraInteraction;
pub use pan_orbit_ext::PanOrbitCameraExt;

use config::CameraConfigPlugin;
use interaction::InteractionPlugin;
use rig::RigPlugin;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(CameraConfigPlugin)
            .add_plugins(InteractionPlugin)
            .add_plugins(RigPlugin);
    }
}
