use std::f32::consts::PI;

use bevy::prelude::*;
use bevy::render::render_resource::Face;
use rand::Rng;
use rand::prelude::ThreadRng;

use crate::settings::QualityLevel;

pub struct StarfieldPlugin;

impl Plugin for StarfieldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StarfieldConfig>()
            .add_systems(Startup, (spawn_nebula_tints, spawn_stars))
            .add_systems(Update, respawn_stars_on_quality_change);
    }
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct StarfieldConfig {
    pub count_full:      usize,
    pub count_reduced:   usize,
    /// Shell sits past the camera's zoom ceiling so stars never parallax
    /// against the planets.
    pub shell_inner:     f32,
    pub shell_outer:     f32,
    pub star_radius_min: f32,
    pub star_radius_max: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count_full:      1400,
            count_reduced:   900,
            shell_inner:     210.0,
            shell_outer:     300.0,
            star_radius_min: 0.14,
            star_radius_max: 0.46,
        }
    }
}

#[derive(Component, Debug)]
struct Star;

fn spawn_stars(
    mut commands: Commands,
    config: Res<StarfieldConfig>,
    quality: Res<QualityLevel>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    spawn_star_batch(&mut commands, &config, *quality, &mut meshes, &mut materials);
}

fn respawn_stars_on_quality_change(
    mut commands: Commands,
    quality: Res<QualityLevel>,
    config: Res<StarfieldConfig>,
    stars: Query<Entity, With<Star>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !quality.is_changed() || quality.is_added() {
        return;
    }
    for entity in stars.iter() {
        commands.entity(entity).despawn();
    }
    spawn_star_batch(&mut commands, &config, *quality, &mut meshes, &mut materials);
}

fn spawn_star_batch(
    commands: &mut Commands,
    config: &StarfieldConfig,
    quality: QualityLevel,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let count = match quality {
        QualityLevel::Full => config.count_full,
        QualityLevel::Reduced => config.count_reduced,
    };

    let mesh = meshes.add(Sphere::new(1.0));
    let mut rng = rand::rng();

    for _ in 0..count {
        let position = star_position(config.shell_inner, config.shell_outer, &mut rng);
        let radius = rng.random_range(config.star_radius_min..config.star_radius_max);
        let emissive = star_color(&mut rng);

        let material = materials.add(StandardMaterial {
            emissive,
            unlit: true,
            ..default()
        });

        commands.spawn((
            Star,
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(position).with_scale(Vec3::splat(radius)),
        ));
    }

    debug!("spawned {count} stars");
}

fn star_position(inner_radius: f32, outer_radius: f32, rng: &mut ThreadRng) -> Vec3 {
    // uniform over the shell via normalized spherical coordinates
    let azimuth_norm: f32 = rng.random_range(0.0..1.0);
    let polar_norm: f32 = rng.random_range(0.0..1.0);

    let theta = azimuth_norm * PI * 2.0;
    let phi = 2.0f32.mul_add(polar_norm, -1.0).acos();
    let radius = rng.random_range(inner_radius..outer_radius);

    Vec3::new(
        radius * theta.cos() * phi.sin(),
        radius * theta.sin() * phi.sin(),
        radius * phi.cos(),
    )
}

fn star_color(rng: &mut impl Rng) -> LinearRgba {
    // mostly white points with the occasional warm or cool cast
    let intensity = rng.random_range(1.2..4.2);
    let cast: f32 = rng.random_range(0.0..1.0);
    let (r, g, b) = if cast < 0.12 {
        (1.0, 0.82, 0.62)
    } else if cast < 0.24 {
        (0.66, 0.78, 1.0)
    } else {
        (1.0, 1.0, 1.0)
    };
    LinearRgba::rgb(r * intensity, g * intensity, b * intensity)
}

/// Two faint additive blobs suggest distant nebulae behind the system.
fn spawn_nebula_tints(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(Sphere::new(30.0));

    let mut tint = |color: Color, opacity: f32| {
        materials.add(StandardMaterial {
            base_color: color.with_alpha(opacity),
            alpha_mode: AlphaMode::Add,
            unlit: true,
            cull_mode: Some(Face::Front),
            ..default()
        })
    };

    commands.spawn((
        Mesh3d(mesh.clone()),
        MeshMaterial3d(tint(Color::srgb_u8(47, 85, 143), 0.1)),
        Transform::from_translation(Vec3::new(-64.0, 18.0, -118.0))
            .with_rotation(Quat::from_euler(EulerRot::XYZ, 0.18, 0.42, 0.0))
            .with_scale(Vec3::new(1.7, 0.8, 1.25)),
    ));
    commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(tint(Color::srgb_u8(169, 77, 34), 0.085)),
        Transform::from_translation(Vec3::new(66.0, -6.0, -112.0))
            .with_rotation(Quat::from_euler(EulerRot::XYZ, -0.14, -0.36, 0.0))
            .with_scale(Vec3::new(1.55, 0.75, 1.2)),
    ));
}
