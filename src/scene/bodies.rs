use std::collections::HashMap;
use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use bevy::render::render_resource::Face;

use crate::catalog::BodyCatalog;
use crate::catalog::BodyId;
use crate::catalog::BodyKind;
use crate::ease::damp;
use crate::schedule::FrameSet;
use crate::selection::BodySelected;
use crate::selection::SelectedBody;
use crate::simulation::SimulationClock;
use crate::simulation::WorldPositions;
use crate::simulation::spin_angle;

/// How much a selected body swells to acknowledge the pick.
const SELECTED_SCALE: f32 = 1.09;
const SCALE_EASE_RATE: f32 = 8.0;

pub struct BodiesPlugin;

impl Plugin for BodiesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BodyMaterials>()
            .add_systems(Startup, spawn_bodies)
            .add_systems(
                Update,
                (update_body_transforms, spin_surfaces, sync_selection_rings)
                    .in_set(FrameSet::EntityUpdates),
            );
    }
}

/// Positioning group for one body; children carry the visuals.
#[derive(Component, Debug)]
pub struct BodyRoot {
    pub id: BodyId,
}

/// The textured sphere itself. Tilt and spin live here so they never
/// disturb the orbital translation on the root.
#[derive(Component, Debug)]
pub struct BodySurface {
    pub id: BodyId,
}

/// Flat glowing annulus shown around whichever body is selected.
#[derive(Component, Debug)]
struct SelectionRing {
    id: BodyId,
}

/// Surface (and ring) material handles by body, so the texture loader can
/// swap maps in after the fact without touching the scene graph.
#[derive(Resource, Debug, Default)]
pub struct BodyMaterials {
    pub surfaces:    HashMap<BodyId, Handle<StandardMaterial>>,
    pub saturn_ring: Option<Handle<StandardMaterial>>,
}

fn spawn_bodies(
    mut commands: Commands,
    catalog: Res<BodyCatalog>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut body_materials: ResMut<BodyMaterials>,
) {
    let unit_sphere = meshes.add(Sphere::new(1.0));

    // the anchor body carries the scene's key light from its own center
    commands.spawn((
        PointLight {
            color: Color::srgb_u8(255, 210, 168),
            intensity: 2_500_000.0,
            range: 260.0,
            radius: catalog.anchor().radius,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::ZERO),
    ));
    commands.spawn((
        PointLight {
            color: Color::srgb_u8(116, 168, 255),
            intensity: 180_000.0,
            range: 160.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::new(0.0, 22.0, 0.0)),
    ));

    for body in catalog.bodies() {
        let surface = materials.add(surface_material(body.kind, body.surface_color, body.emissive_color));
        body_materials.surfaces.insert(body.id, surface.clone());

        let mut root = commands.spawn((
            BodyRoot { id: body.id },
            Transform::default(),
            Visibility::default(),
        ));

        root.observe(select_on_click);

        root.with_children(|parent| {
            parent.spawn((
                BodySurface { id: body.id },
                Mesh3d(unit_sphere.clone()),
                MeshMaterial3d(surface),
                Transform::from_scale(Vec3::splat(body.radius)),
            ));

            if let Some(tint) = body.atmosphere_color {
                parent.spawn((
                    Mesh3d(unit_sphere.clone()),
                    MeshMaterial3d(materials.add(shell_material(tint, 0.22))),
                    Transform::from_scale(Vec3::splat(body.radius * 1.12)),
                ));
            }

            if body.kind == BodyKind::Star {
                // two additive halos sell the corona without a shader
                parent.spawn((
                    Mesh3d(unit_sphere.clone()),
                    MeshMaterial3d(materials.add(shell_material(Color::srgb_u8(255, 200, 122), 0.24))),
                    Transform::from_scale(Vec3::splat(body.radius * 1.18)),
                ));
                parent.spawn((
                    Mesh3d(unit_sphere.clone()),
                    MeshMaterial3d(materials.add(shell_material(Color::srgb_u8(255, 143, 58), 0.12))),
                    Transform::from_scale(Vec3::splat(body.radius * 1.38)),
                ));
            }

            if let Some(ring) = body.ring {
                let ring_material = materials.add(StandardMaterial {
                    base_color: ring.color.with_alpha(ring.opacity),
                    alpha_mode: AlphaMode::Blend,
                    perceptual_roughness: 0.88,
                    metallic: 0.05,
                    double_sided: true,
                    cull_mode: None,
                    ..default()
                });
                body_materials.saturn_ring = Some(ring_material.clone());
                parent.spawn((
                    Mesh3d(meshes.add(Annulus::new(ring.inner_radius, ring.outer_radius))),
                    MeshMaterial3d(ring_material),
                    Transform::from_rotation(Quat::from_rotation_x(FRAC_PI_2 + ring.tilt)),
                ));
            }

            parent.spawn((
                SelectionRing { id: body.id },
                Mesh3d(meshes.add(Annulus::new(body.radius * 1.32, body.radius * 1.45))),
                MeshMaterial3d(materials.add(shell_material(Color::srgb_u8(255, 225, 171), 0.55))),
                Transform::from_rotation(Quat::from_rotation_x(FRAC_PI_2)),
                Visibility::Hidden,
            ));
        });
    }

    info!("spawned {} bodies", catalog.bodies().len());
}

fn surface_material(
    kind: BodyKind,
    base: Color,
    emissive: Option<Color>,
) -> StandardMaterial {
    let is_star = kind == BodyKind::Star;
    StandardMaterial {
        base_color: base,
        emissive: emissive.map_or(LinearRgba::BLACK, |color| color.to_linear() * 2.8),
        perceptual_roughness: if is_star { 0.62 } else { 0.92 },
        metallic: if is_star { 0.12 } else { 0.04 },
        ..default()
    }
}

/// Additive, unlit, inside-out shell - atmospheres, halos, selection rings.
fn shell_material(color: Color, opacity: f32) -> StandardMaterial {
    StandardMaterial {
        base_color: color.with_alpha(opacity),
        alpha_mode: AlphaMode::Add,
        unlit: true,
        cull_mode: Some(Face::Front),
        ..default()
    }
}

/// Clicks on any child mesh bubble up to the body root.
fn select_on_click(
    trigger: Trigger<Pointer<Click>>,
    roots: Query<&BodyRoot>,
    mut picks: EventWriter<BodySelected>,
) {
    if let Ok(root) = roots.get(trigger.target()) {
        picks.write(BodySelected(root.id));
    }
}

fn update_body_transforms(
    time: Res<Time>,
    positions: Res<WorldPositions>,
    selected: Res<SelectedBody>,
    mut bodies: Query<(&BodyRoot, &mut Transform)>,
) {
    for (root, mut transform) in &mut bodies {
        transform.translation = positions.get_render(root.id);

        let target = if selected.id == root.id { SELECTED_SCALE } else { 1.0 };
        let eased = damp(transform.scale.x, target, SCALE_EASE_RATE, time.delta_secs());
        transform.scale = Vec3::splat(eased);
    }
}

fn spin_surfaces(
    clock: Res<SimulationClock>,
    catalog: Res<BodyCatalog>,
    mut surfaces: Query<(&BodySurface, &mut Transform)>,
) {
    for (surface, mut transform) in &mut surfaces {
        let body = catalog.get(surface.id);
        // wrap in f64 before narrowing so long sessions keep full precision
        #[allow(clippy::cast_possible_truncation, reason = "angle wrapped to one turn first")]
        let spin = spin_angle(body, clock.elapsed).rem_euclid(std::f64::consts::TAU) as f32;
        transform.rotation = Quat::from_rotation_z(body.axial_tilt) * Quat::from_rotation_y(spin);
    }
}

fn sync_selection_rings(
    selected: Res<SelectedBody>,
    mut rings: Query<(&SelectionRing, &mut Visibility)>,
) {
    if !selected.is_changed() {
        return;
    }
    for (ring, mut visibility) in &mut rings {
        *visibility = if ring.id == selected.id {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}
