mod belt;
mod bodies;
mod labels;
mod orbits;
mod starfield;

use bevy::prelude::*;

pub use bodies::BodyMaterials;

use belt::BeltPlugin;
use bodies::BodiesPlugin;
use labels::LabelsPlugin;
use orbits::OrbitsPlugin;
use starfield::StarfieldPlugin;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(AmbientLight {
            color: Color::srgb_u8(136, 163, 255),
            brightness: 80.0,
            ..default()
        })
        .add_plugins(BodiesPlugin)
        .add_plugins(OrbitsPlugin)
        .add_plugins(StarfieldPlugin)
        .add_plugins(BeltPlugin)
        .add_plugins(LabelsPlugin);
    }
}
