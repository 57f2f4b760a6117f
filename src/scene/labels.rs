use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

use crate::catalog::BodyCatalog;
use crate::catalog::BodyId;
use crate::schedule::FrameSet;
use crate::selection::SelectedBody;
use crate::settings::ViewerSettings;
use crate::simulation::WorldPositions;

/// Labels float a little above the body's north pole.
const LABEL_LIFT: f32 = 1.15;
const LABEL_COLOR: Color = Color::srgba(0.85, 0.89, 1.0, 0.85);
const LABEL_COLOR_SELECTED: Color = Color::srgba(1.0, 0.88, 0.67, 1.0);

pub struct LabelsPlugin;

impl Plugin for LabelsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_labels)
            .add_systems(Update, place_labels.in_set(FrameSet::EntityUpdates));
    }
}

#[derive(Component, Debug)]
struct BodyLabel {
    id: BodyId,
}

fn spawn_labels(mut commands: Commands, catalog: Res<BodyCatalog>) {
    for body in catalog.bodies() {
        commands.spawn((
            BodyLabel { id: body.id },
            Text::new(body.name),
            TextFont {
                font_size: 12.0,
                ..default()
            },
            TextColor(LABEL_COLOR),
            Node {
                position_type: PositionType::Absolute,
                ..default()
            },
        ));
    }
}

/// Project each label onto the viewport. A projection error means the body
/// is behind the camera this frame - hide the label rather than erroring.
fn place_labels(
    settings: Res<ViewerSettings>,
    selected: Res<SelectedBody>,
    positions: Res<WorldPositions>,
    catalog: Res<BodyCatalog>,
    camera: Query<(&Camera, &GlobalTransform), With<PanOrbitCamera>>,
    mut labels: Query<(&BodyLabel, &mut Node, &mut Visibility, &mut TextColor)>,
) {
    let Ok((camera, camera_transform)) = camera.single() else {
        return;
    };

    for (label, mut node, mut visibility, mut color) in &mut labels {
        if !settings.show_labels {
            *visibility = Visibility::Hidden;
            continue;
        }

        let body = catalog.get(label.id);
        let anchor = positions.get_render(label.id) + Vec3::Y * (body.radius + LABEL_LIFT);

        if let Ok(screen) = camera.world_to_viewport(camera_transform, anchor) {
            *visibility = Visibility::Visible;
            node.left = Val::Px(screen.x - 16.0);
            node.top = Val::Px(screen.y - 9.0);
            color.0 = if selected.id == label.id {
                LABEL_COLOR_SELECTED
            } else {
                LABEL_COLOR
            };
        } else {
            *visibility = Visibility::Hidden;
        }
    }
}
