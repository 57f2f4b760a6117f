//! Solara - a stylized interactive solar system built with Bevy
//!
//! A presentation piece, not an engineering tool:
//! - Circular, coplanar orbits driven by a smoothed simulation clock
//! - A cinematic camera that follows the selected body and idles gracefully
//! - Click-to-select bodies with a HUD for playback and display toggles

mod asset_loader;
mod camera;
mod catalog;
mod ease;
mod perf;
mod schedule;
mod scene;
mod selection;
mod settings;
mod simulation;
mod ui;
mod viewer_input;

use bevy::picking::mesh_picking::MeshPickingPlugin;
use bevy::prelude::*;
use bevy_inspector_egui::bevy_egui::EguiPlugin;

use crate::asset_loader::AssetLoaderPlugin;
use crate::camera::CameraPlugin;
use crate::catalog::BodyCatalog;
use crate::perf::PerfPlugin;
use crate::schedule::SchedulePlugin;
use crate::scene::ScenePlugin;
use crate::selection::SelectionPlugin;
use crate::settings::SettingsPlugin;
use crate::simulation::SimulationPlugin;
use crate::ui::UiPlugin;
use crate::viewer_input::InputPlugin;

fn main() {
    // bad body data is unrecoverable - refuse to start rather than render garbage
    let catalog = match BodyCatalog::new() {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("invalid body catalog: {err}");
            std::process::exit(1);
        },
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "solara".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(MeshPickingPlugin)
        .add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: true,
        })
        .insert_resource(catalog)
        .insert_resource(ClearColor(Color::srgb_u8(2, 6, 17)))
        .add_plugins((
            SchedulePlugin,
            InputPlugin,
            SettingsPlugin,
            SelectionPlugin,
            SimulationPlugin,
            PerfPlugin,
            CameraPlugin,
            ScenePlugin,
            AssetLoaderPlugin,
            UiPlugin,
        ))
        .run();
}
