use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::catalog::BodyCatalog;
use crate::catalog::BodyId;
use crate::scene::BodyMaterials;

pub struct AssetLoaderPlugin;

impl Plugin for AssetLoaderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SurfaceTextures>()
            // PostStartup: the scene must have created its materials first
            .add_systems(PostStartup, request_surface_textures)
            .add_systems(
                Update,
                apply_loaded_textures.run_if(any_texture_pending),
            );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Pending,
    Applied,
    /// Load failed: the flat presentation color stays, permanently. No retry.
    Fallback,
}

#[derive(Debug)]
struct TextureSlot {
    body:     Option<BodyId>,
    image:    Handle<Image>,
    material: Handle<StandardMaterial>,
    state:    SlotState,
}

/// In-flight and settled texture requests. Loads are fire-and-forget: the
/// render loop never waits on one, and a finished load just swaps a handle
/// into the already-visible material.
#[derive(Resource, Debug, Default)]
pub struct SurfaceTextures {
    slots: Vec<TextureSlot>,
}

fn texture_path(name: &str) -> String {
    format!("textures/{}.png", name.to_lowercase())
}

fn request_surface_textures(
    asset_server: Res<AssetServer>,
    catalog: Res<BodyCatalog>,
    body_materials: Res<BodyMaterials>,
    mut textures: ResMut<SurfaceTextures>,
) {
    for body in catalog.bodies() {
        let Some(material) = body_materials.surfaces.get(&body.id) else {
            continue;
        };
        textures.slots.push(TextureSlot {
            body:     Some(body.id),
            image:    asset_server.load(texture_path(body.name)),
            material: material.clone(),
            state:    SlotState::Pending,
        });
    }

    if let Some(ring_material) = &body_materials.saturn_ring {
        textures.slots.push(TextureSlot {
            body:     None,
            image:    asset_server.load(texture_path("saturn_ring")),
            material: ring_material.clone(),
            state:    SlotState::Pending,
        });
    }

    info!("requested {} surface textures", textures.slots.len());
}

fn any_texture_pending(textures: Res<SurfaceTextures>) -> bool {
    textures
        .slots
        .iter()
        .any(|slot| slot.state == SlotState::Pending)
}

fn apply_loaded_textures(
    asset_server: Res<AssetServer>,
    mut textures: ResMut<SurfaceTextures>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for slot in &mut textures.slots {
        if slot.state != SlotState::Pending {
            continue;
        }

        match asset_server.get_load_state(slot.image.id()) {
            Some(LoadState::Loaded) => {
                if let Some(material) = materials.get_mut(&slot.material) {
                    // the flat color stays as a tint under the map
                    material.base_color_texture = Some(slot.image.clone());
                }
                slot.state = SlotState::Applied;
                debug!("applied texture for {:?}", slot.body);
            },
            Some(LoadState::Failed(_)) => {
                slot.state = SlotState::Fallback;
                warn!("texture missing for {:?}, keeping flat color", slot.body);
            },
            _ => {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_paths_are_lowercased_pngs() {
        assert_eq!(texture_path("Earth"), "textures/earth.png");
        assert_eq!(texture_path("saturn_ring"), "textures/saturn_ring.png");
    }
}
