use bevy::picking::Pickable;
use bevy::prelude::*;

use crate::catalog::BodyCatalog;
use crate::catalog::BodyId;
use crate::schedule::FrameSet;
use crate::selection::BodySelected;
use crate::selection::SelectedBody;
use crate::settings::ViewerSettings;

const PANEL_BG: Color = Color::srgba(0.016, 0.03, 0.08, 0.82);
const BUTTON_BG: Color = Color::srgba(0.08, 0.12, 0.22, 0.9);
const BUTTON_BG_HOVER: Color = Color::srgba(0.13, 0.18, 0.3, 0.95);
const BUTTON_BG_ACTIVE: Color = Color::srgba(0.45, 0.36, 0.18, 0.95);
const TEXT_DIM: Color = Color::srgba(0.62, 0.68, 0.8, 1.0);
const TEXT_BRIGHT: Color = Color::srgba(0.92, 0.95, 1.0, 1.0);
const ACCENT: Color = Color::srgb(1.0, 0.88, 0.67);

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud)
            .add_systems(
                Update,
                (handle_pill_buttons, handle_control_buttons).in_set(FrameSet::UserInput),
            )
            .add_systems(
                Update,
                (style_pills, style_controls, refresh_info_panel, refresh_speed_readout)
                    .in_set(FrameSet::EntityUpdates),
            );
    }
}

/// Selector entry for one body.
#[derive(Component, Debug, Clone, Copy)]
struct BodyPill(BodyId);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
enum ControlButton {
    PlayPause,
    Follow,
    Cinematic,
    Orbits,
    Labels,
    SlowDown,
    SpeedUp,
}

/// Marks a control button's caption so state changes can rewrite it.
#[derive(Component, Debug, Clone, Copy)]
struct ControlLabel(ControlButton);

#[derive(Component)]
struct InfoKindText;
#[derive(Component)]
struct InfoNameText;
#[derive(Component)]
struct InfoBodyText;
#[derive(Component)]
struct SpeedReadout;

fn spawn_hud(mut commands: Commands, catalog: Res<BodyCatalog>) {
    spawn_title_panel(&mut commands);
    spawn_info_panel(&mut commands);
    spawn_selector_row(&mut commands, &catalog);
    spawn_control_panel(&mut commands);
}

fn panel_chrome() -> (BackgroundColor, BorderRadius, Pickable) {
    (
        BackgroundColor(PANEL_BG),
        BorderRadius::all(Val::Px(10.0)),
        Pickable::IGNORE,
    )
}

fn spawn_title_panel(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(18.0),
                top: Val::Px(14.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(2.0),
                padding: UiRect::all(Val::Px(12.0)),
                ..default()
            },
            panel_chrome(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("STYLIZED INTERACTIVE OBSERVATORY"),
                TextFont { font_size: 10.0, ..default() },
                TextColor(ACCENT),
                Pickable::IGNORE,
            ));
            parent.spawn((
                Text::new("Solar System Spectacle"),
                TextFont { font_size: 22.0, ..default() },
                TextColor(TEXT_BRIGHT),
                Pickable::IGNORE,
            ));
            parent.spawn((
                Text::new("Drag to orbit, scroll to zoom, click any world to lock focus."),
                TextFont { font_size: 12.0, ..default() },
                TextColor(TEXT_DIM),
                Pickable::IGNORE,
            ));
        });
}

fn spawn_info_panel(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(18.0),
                top: Val::Px(14.0),
                width: Val::Px(300.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                padding: UiRect::all(Val::Px(14.0)),
                ..default()
            },
            panel_chrome(),
        ))
        .with_children(|parent| {
            parent.spawn((
                InfoKindText,
                Text::new(""),
                TextFont { font_size: 10.0, ..default() },
                TextColor(ACCENT),
                Pickable::IGNORE,
            ));
            parent.spawn((
                InfoNameText,
                Text::new(""),
                TextFont { font_size: 20.0, ..default() },
                TextColor(TEXT_BRIGHT),
                Pickable::IGNORE,
            ));
            parent.spawn((
                InfoBodyText,
                Text::new(""),
                TextFont { font_size: 12.0, ..default() },
                TextColor(TEXT_DIM),
                Pickable::IGNORE,
            ));
        });
}

fn spawn_selector_row(commands: &mut Commands, catalog: &BodyCatalog) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(16.0),
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                flex_direction: FlexDirection::Row,
                column_gap: Val::Px(6.0),
                ..default()
            },
            Pickable::IGNORE,
        ))
        .with_children(|parent| {
            for body in catalog.bodies() {
                parent
                    .spawn((
                        Button,
                        BodyPill(body.id),
                        Node {
                            padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                            ..default()
                        },
                        BackgroundColor(BUTTON_BG),
                        BorderRadius::all(Val::Px(14.0)),
                    ))
                    .with_children(|pill| {
                        pill.spawn((
                            Text::new(body.name),
                            TextFont { font_size: 12.0, ..default() },
                            TextColor(TEXT_BRIGHT),
                            Pickable::IGNORE,
                        ));
                    });
            }
        });
}

fn control_button(parent: &mut ChildSpawnerCommands, kind: ControlButton, label: &str) {
    parent
        .spawn((
            Button,
            kind,
            Node {
                padding: UiRect::axes(Val::Px(10.0), Val::Px(5.0)),
                ..default()
            },
            BackgroundColor(BUTTON_BG),
            BorderRadius::all(Val::Px(8.0)),
        ))
        .with_children(|button| {
            button.spawn((
                ControlLabel(kind),
                Text::new(label),
                TextFont { font_size: 12.0, ..default() },
                TextColor(TEXT_BRIGHT),
                Pickable::IGNORE,
            ));
        });
}

fn spawn_control_panel(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(18.0),
                bottom: Val::Px(16.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                padding: UiRect::all(Val::Px(12.0)),
                ..default()
            },
            panel_chrome(),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Row,
                        column_gap: Val::Px(6.0),
                        ..default()
                    },
                    Pickable::IGNORE,
                ))
                .with_children(|row| {
                    control_button(row, ControlButton::PlayPause, "Pause");
                    control_button(row, ControlButton::Follow, "Follow");
                    control_button(row, ControlButton::Cinematic, "Cinematic");
                });
            parent
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Row,
                        column_gap: Val::Px(6.0),
                        ..default()
                    },
                    Pickable::IGNORE,
                ))
                .with_children(|row| {
                    control_button(row, ControlButton::Orbits, "Orbits");
                    control_button(row, ControlButton::Labels, "Labels");
                });
            parent
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Row,
                        column_gap: Val::Px(6.0),
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    Pickable::IGNORE,
                ))
                .with_children(|row| {
                    row.spawn((
                        Text::new("Time Warp"),
                        TextFont { font_size: 11.0, ..default() },
                        TextColor(TEXT_DIM),
                        Pickable::IGNORE,
                    ));
                    control_button(row, ControlButton::SlowDown, "-");
                    row.spawn((
                        SpeedReadout,
                        Text::new("1.40x"),
                        TextFont { font_size: 13.0, ..default() },
                        TextColor(ACCENT),
                        Pickable::IGNORE,
                    ));
                    control_button(row, ControlButton::SpeedUp, "+");
                });
        });
}

fn handle_pill_buttons(
    pills: Query<(&Interaction, &BodyPill), (Changed<Interaction>, With<Button>)>,
    mut picks: EventWriter<BodySelected>,
) {
    for (interaction, pill) in &pills {
        if *interaction == Interaction::Pressed {
            picks.write(BodySelected(pill.0));
        }
    }
}

fn handle_control_buttons(
    buttons: Query<(&Interaction, &ControlButton), (Changed<Interaction>, With<Button>)>,
    mut settings: ResMut<ViewerSettings>,
) {
    for (interaction, control) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match control {
            ControlButton::PlayPause => settings.is_playing = !settings.is_playing,
            ControlButton::Follow => settings.follow_selection = !settings.follow_selection,
            ControlButton::Cinematic => settings.cinematic_camera = !settings.cinematic_camera,
            ControlButton::Orbits => settings.show_orbits = !settings.show_orbits,
            ControlButton::Labels => settings.show_labels = !settings.show_labels,
            ControlButton::SlowDown => settings.step_speed(-1.0),
            ControlButton::SpeedUp => settings.step_speed(1.0),
        }
    }
}

fn style_pills(
    selected: Res<SelectedBody>,
    mut pills: Query<(&BodyPill, &Interaction, &mut BackgroundColor), With<Button>>,
) {
    for (pill, interaction, mut background) in &mut pills {
        background.0 = if pill.0 == selected.id {
            BUTTON_BG_ACTIVE
        } else if *interaction == Interaction::Hovered {
            BUTTON_BG_HOVER
        } else {
            BUTTON_BG
        };
    }
}

fn style_controls(
    settings: Res<ViewerSettings>,
    mut buttons: Query<(&ControlButton, &Interaction, &mut BackgroundColor), With<Button>>,
    mut labels: Query<(&ControlLabel, &mut Text)>,
) {
    for (control, interaction, mut background) in &mut buttons {
        let active = match control {
            ControlButton::PlayPause => settings.is_playing,
            ControlButton::Follow => settings.follow_selection,
            ControlButton::Cinematic => settings.cinematic_camera,
            ControlButton::Orbits => settings.show_orbits,
            ControlButton::Labels => settings.show_labels,
            ControlButton::SlowDown | ControlButton::SpeedUp => false,
        };
        background.0 = if active {
            BUTTON_BG_ACTIVE
        } else if *interaction == Interaction::Hovered {
            BUTTON_BG_HOVER
        } else {
            BUTTON_BG
        };
    }

    if settings.is_changed() {
        for (label, mut text) in &mut labels {
            if label.0 == ControlButton::PlayPause {
                text.0 = if settings.is_playing { "Pause" } else { "Play" }.into();
            }
        }
    }
}

fn refresh_info_panel(
    selected: Res<SelectedBody>,
    catalog: Res<BodyCatalog>,
    mut kind_text: Query<&mut Text, (With<InfoKindText>, Without<InfoNameText>, Without<InfoBodyText>)>,
    mut name_text: Query<&mut Text, (With<InfoNameText>, Without<InfoKindText>, Without<InfoBodyText>)>,
    mut body_text: Query<&mut Text, (With<InfoBodyText>, Without<InfoKindText>, Without<InfoNameText>)>,
) {
    if !selected.is_changed() {
        return;
    }
    let body = catalog.get(selected.id);

    if let Ok(mut text) = kind_text.single_mut() {
        text.0 = body.kind.label().to_uppercase();
    }
    if let Ok(mut text) = name_text.single_mut() {
        text.0 = body.name.into();
    }
    if let Ok(mut text) = body_text.single_mut() {
        let mut block = body.description.to_string();
        for fact in body.facts {
            block.push_str("\n- ");
            block.push_str(fact);
        }
        text.0 = block;
    }
}

fn refresh_speed_readout(
    settings: Res<ViewerSettings>,
    mut readout: Query<&mut Text, With<SpeedReadout>>,
) {
    if !settings.is_changed() {
        return;
    }
    if let Ok(mut text) = readout.single_mut() {
        text.0 = format!("{:.2}x", settings.speed);
    }
}
