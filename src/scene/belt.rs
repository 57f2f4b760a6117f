use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::schedule::FrameSet;
use crate::settings::QualityLevel;
use crate::simulation::SimulationClock;

/// Belt occupies the gap between Mars (21) and Jupiter (30).
const BELT_INNER_RADIUS: f32 = 24.0;
const BELT_RADIAL_SPREAD: f32 = 5.2;
const BELT_ELEVATION: f32 = 0.85;
const BELT_JITTER: f32 = 1.2;
const BELT_SPIN_SPEED: f32 = 0.08;

const ROCK_COUNT_FULL: usize = 1600;
const ROCK_COUNT_REDUCED: usize = 600;
const ROCK_RADIUS: f32 = 0.06;

pub struct BeltPlugin;

impl Plugin for BeltPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_belt)
            .add_systems(Update, respawn_belt_on_quality_change)
            .add_systems(Update, rotate_belt.in_set(FrameSet::EntityUpdates));
    }
}

/// Root of the rock ring; rotating this one transform moves the whole belt.
#[derive(Component, Debug)]
struct BeltRoot;

/// Integer hash, so the belt lays out identically on every run.
fn rock_hash(seed: u32) -> u32 {
    let mut n = seed;
    n = n.wrapping_mul(2_654_435_761);
    n ^= n >> 16;
    n = n.wrapping_mul(2_246_822_519);
    n ^= n >> 13;
    n
}

#[allow(clippy::cast_possible_truncation, reason = "value is in [0, 1]")]
fn unit(hash: u32) -> f32 {
    (f64::from(hash) / f64::from(u32::MAX)) as f32
}

/// Deterministic placement and scale for rock `index`.
fn rock_placement(index: u32) -> (Vec3, f32) {
    let angle = unit(rock_hash(index * 7 + 31)) * TAU;
    let orbit_radius = BELT_INNER_RADIUS + unit(rock_hash(index * 13 + 97)) * BELT_RADIAL_SPREAD;
    let elevation = (unit(rock_hash(index * 19 + 151)) - 0.5) * BELT_ELEVATION;
    let jitter_x = (unit(rock_hash(index * 23 + 211)) - 0.5) * BELT_JITTER;
    let jitter_z = (unit(rock_hash(index * 29 + 277)) - 0.5) * BELT_JITTER;

    let position = Vec3::new(
        angle.cos() * orbit_radius + jitter_x,
        elevation,
        angle.sin() * orbit_radius + jitter_z,
    );
    let scale = 0.6 + unit(rock_hash(index * 37 + 331)) * 1.6;
    (position, scale)
}

fn spawn_belt(
    mut commands: Commands,
    quality: Res<QualityLevel>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    spawn_belt_rocks(&mut commands, *quality, &mut meshes, &mut materials);
}

fn respawn_belt_on_quality_change(
    mut commands: Commands,
    quality: Res<QualityLevel>,
    roots: Query<Entity, With<BeltRoot>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !quality.is_changed() || quality.is_added() {
        return;
    }
    for entity in roots.iter() {
        commands.entity(entity).despawn();
    }
    spawn_belt_rocks(&mut commands, *quality, &mut meshes, &mut materials);
}

fn spawn_belt_rocks(
    commands: &mut Commands,
    quality: QualityLevel,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let count = match quality {
        QualityLevel::Full => ROCK_COUNT_FULL,
        QualityLevel::Reduced => ROCK_COUNT_REDUCED,
    };

    let mesh = meshes.add(Sphere::new(ROCK_RADIUS));
    // a few shared dusty tints instead of a material per rock
    let tints: Vec<Handle<StandardMaterial>> = [
        Color::srgb(0.55, 0.47, 0.38),
        Color::srgb(0.62, 0.54, 0.44),
        Color::srgb(0.48, 0.42, 0.36),
        Color::srgb(0.68, 0.61, 0.52),
    ]
    .into_iter()
    .map(|color| {
        materials.add(StandardMaterial {
            base_color: color,
            perceptual_roughness: 0.95,
            ..default()
        })
    })
    .collect();

    commands
        .spawn((BeltRoot, Transform::default(), Visibility::default()))
        .with_children(|parent| {
            for index in 0..count {
                #[allow(clippy::cast_possible_truncation, reason = "rock count fits u32")]
                let seed = index as u32;
                let (position, scale) = rock_placement(seed);
                let tint = &tints[rock_hash(seed * 41 + 389) as usize % tints.len()];

                parent.spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(tint.clone()),
                    Transform::from_translation(position).with_scale(Vec3::splat(scale)),
                ));
            }
        });

    debug!("spawned belt with {count} rocks");
}

/// The whole ring drifts at a rate tied to the smoothed simulation speed,
/// so pausing eases the belt to a stop along with the planets.
fn rotate_belt(
    time: Res<Time>,
    clock: Res<SimulationClock>,
    mut roots: Query<&mut Transform, With<BeltRoot>>,
) {
    #[allow(clippy::cast_possible_truncation, reason = "speed is a small scalar")]
    let speed = clock.effective_speed as f32;
    for mut transform in &mut roots {
        transform.rotate_y(time.delta_secs() * BELT_SPIN_SPEED * speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(rock_hash(42), rock_hash(42));
        assert_ne!(rock_hash(0), rock_hash(1));
    }

    #[test]
    fn placement_is_deterministic() {
        assert_eq!(rock_placement(7), rock_placement(7));
    }

    #[test]
    fn rocks_stay_inside_the_band() {
        for index in 0..512 {
            let (position, scale) = rock_placement(index);
            let planar = position.x.hypot(position.z);
            assert!(planar > BELT_INNER_RADIUS - BELT_JITTER, "rock {index} too close: {planar}");
            assert!(
                planar < BELT_INNER_RADIUS + BELT_RADIAL_SPREAD + BELT_JITTER,
                "rock {index} too far: {planar}"
            );
            assert!(position.y.abs() <= BELT_ELEVATION / 2.0 + f32::EPSILON);
            assert!(scale > 0.0);
        }
    }
}
