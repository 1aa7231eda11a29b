//! Render shell: body meshes, tint, chase camera and text overlays.
//!
//! ## Layer Model
//!
//! | Layer          | Technology                  | Shown in           |
//! |----------------|-----------------------------|--------------------|
//! | Body meshes    | `Mesh3d` + `StandardMaterial` | every state      |
//! | Damage/glow    | material `emissive` ← `Tint` | every state       |
//! | HUD            | Bevy UI text                | `Running`          |
//! | Screen overlay | Bevy UI text                | every other state  |
//!
//! ## System Responsibilities
//!
//! | System                          | Schedule   | Purpose                                  |
//! |---------------------------------|------------|------------------------------------------|
//! | `build_model_meshes`            | Startup    | One mesh per catalog part                |
//! | `setup_hud`                     | Startup    | Spawn HUD and screen text nodes          |
//! | `attach_body_mesh_system`       | PostUpdate | Give every new body its part meshes      |
//! | `sync_body_transform_system`    | PostUpdate | `Body` pose → `Transform`                |
//! | `sync_tint_system`              | PostUpdate | `Tint` → material emissive               |
//! | `apply_chase_camera_system`     | PostUpdate | `ChaseCamera` → `Camera3d`               |
//! | `hud_display_system`            | PostUpdate | Refresh HUD text                         |
//! | `screen_display_system`         | PostUpdate | Refresh the current screen's overlay     |
//!
//! Nothing here feeds back into the simulation.

use crate::body::{Body, Tint};
use crate::camera::ChaseCamera;
use crate::catalog::{dart_vertices, ModelCatalog, ModelKind, PartShape};
use crate::constants::CONTROL_PAGES;
use crate::craft::Craft;
use crate::menu::{GameState, MenuState, SplashOption, UpgradeCursor};
use crate::session::{apply_game_config, Difficulty, Session};
use crate::stats::PlayerStats;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};
use std::collections::HashMap;
use std::fmt::Write;

// ── Resources and markers ─────────────────────────────────────────────────────

/// Mesh handles for every part of every model, with each part's offset.
#[derive(Resource, Default)]
pub struct ModelMeshes(HashMap<ModelKind, Vec<(Handle<Mesh>, Vec3)>>);

/// The per-entity material whose emissive colour follows the body's [`Tint`].
#[derive(Component)]
pub struct BodyMaterial(pub Handle<StandardMaterial>);

/// Marker for the running HUD text.
#[derive(Component)]
pub struct HudText;

/// Marker for the full-screen menu overlay text.
#[derive(Component)]
pub struct ScreenText;

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ModelMeshes>()
            .add_systems(
                Startup,
                (build_model_meshes.after(apply_game_config), setup_hud),
            )
            .add_systems(
                PostUpdate,
                (
                    attach_body_mesh_system,
                    sync_body_transform_system,
                    sync_tint_system,
                    apply_chase_camera_system,
                    hud_display_system,
                    screen_display_system,
                )
                    .chain()
                    .before(TransformSystems::Propagate),
            );
    }
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Build a flat-shaded dart hull pointing along −Z.
///
/// Three upper faces meet at the dorsal fin, three lower faces at the keel.
pub fn dart_mesh(length: f32, span: f32, height: f32) -> Mesh {
    let [nose, left, right, fin, keel] = dart_vertices(length, span, height);
    let positions: Vec<[f32; 3]> = [nose, left, right, fin, keel]
        .iter()
        .map(|v| v.to_array())
        .collect();
    let uvs: Vec<[f32; 2]> = [nose, left, right, fin, keel]
        .iter()
        .map(|v| [v.x / span + 0.5, v.z / length + 0.5])
        .collect();

    // Counter-clockwise seen from outside.
    let indices: Vec<u32> = vec![
        0, 3, 1, // upper left
        0, 2, 3, // upper right
        1, 3, 2, // upper rear
        0, 1, 4, // lower left
        0, 4, 2, // lower right
        1, 2, 4, // lower rear
    ];

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh.duplicate_vertices();
    mesh.compute_flat_normals();
    mesh
}

fn part_mesh(shape: PartShape) -> Mesh {
    match shape {
        PartShape::Box { half_extents } => Mesh::from(Cuboid {
            half_size: half_extents,
        }),
        PartShape::Sphere { radius } => Mesh::from(Sphere { radius }),
        PartShape::Ring {
            minor_radius,
            major_radius,
        } => Mesh::from(Torus {
            minor_radius,
            major_radius,
        }),
        PartShape::Dart {
            length,
            span,
            height,
        } => dart_mesh(length, span, height),
    }
}

/// Base colour for each kind; damage and glow are added on top as emissive.
fn base_color(kind: ModelKind) -> Color {
    match kind {
        ModelKind::Craft => Color::srgb(0.55, 0.6, 0.7),
        ModelKind::Mine => Color::srgb(0.45, 0.1, 0.1),
        ModelKind::Orbiter => Color::srgb(0.35, 0.35, 0.45),
        ModelKind::Bullet => Color::srgb(1.0, 0.95, 0.6),
        ModelKind::Terrain => Color::srgb(0.12, 0.22, 0.12),
    }
}

/// Startup system: upload one mesh per catalog part.
pub fn build_model_meshes(
    catalog: Res<ModelCatalog>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut model_meshes: ResMut<ModelMeshes>,
) {
    for kind in [
        ModelKind::Craft,
        ModelKind::Mine,
        ModelKind::Orbiter,
        ModelKind::Bullet,
        ModelKind::Terrain,
    ] {
        let parts = catalog
            .parts(kind)
            .iter()
            .map(|part| (meshes.add(part_mesh(part.shape)), part.offset))
            .collect();
        model_meshes.0.insert(kind, parts);
    }
}

// ── Per-body visuals ──────────────────────────────────────────────────────────

/// Attach part meshes and a private material to every body spawned since last frame.
pub fn attach_body_mesh_system(
    mut commands: Commands,
    query: Query<(Entity, &Body), Added<Body>>,
    model_meshes: Res<ModelMeshes>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, body) in query.iter() {
        if !body.is_active() {
            continue;
        }
        let Some(parts) = model_meshes.0.get(&body.model) else {
            continue;
        };
        let material = materials.add(StandardMaterial {
            base_color: base_color(body.model),
            perceptual_roughness: 0.6,
            ..default()
        });

        commands
            .entity(entity)
            .insert((
                body.world_transform(),
                Visibility::Visible,
                BodyMaterial(material.clone()),
            ))
            .with_children(|parent| {
                for (mesh, offset) in parts {
                    parent.spawn((
                        Mesh3d(mesh.clone()),
                        MeshMaterial3d(material.clone()),
                        Transform::from_translation(*offset),
                    ));
                }
            });
    }
}

/// Copy each body's pose to its `Transform`; destroyed bodies are hidden.
pub fn sync_body_transform_system(mut query: Query<(&Body, &mut Transform, &mut Visibility)>) {
    for (body, mut transform, mut visibility) in query.iter_mut() {
        if body.is_active() {
            *transform = body.world_transform();
        } else {
            *visibility = Visibility::Hidden;
        }
    }
}

pub fn sync_tint_system(
    query: Query<(&Tint, &BodyMaterial), Changed<Tint>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (tint, material) in query.iter() {
        if let Some(material) = materials.get_mut(&material.0) {
            material.emissive = LinearRgba::rgb(tint.0.x, tint.0.y, tint.0.z);
        }
    }
}

/// Drive the 3D camera from the chase-camera pose, keeping its aspect in step
/// with the window.
pub fn apply_chase_camera_system(
    mut chase: ResMut<ChaseCamera>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<(&mut Transform, &mut Projection), With<Camera3d>>,
) {
    if let Ok(window) = windows.single() {
        if window.height() > 0.0 {
            chase.aspect_ratio = window.width() / window.height();
        }
    }
    for (mut transform, mut projection) in cameras.iter_mut() {
        *transform = chase.transform();
        *projection = Projection::Perspective(PerspectiveProjection {
            fov: chase.fov,
            aspect_ratio: chase.aspect_ratio,
            near: chase.near,
            far: chase.far,
            ..default()
        });
    }
}

// ── Text overlays ─────────────────────────────────────────────────────────────

/// Startup system: spawn the HUD (top left) and the screen overlay (centred).
pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.88, 0.45)),
                HudText,
            ));
        });

    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.88)),
                TextLayout::new_with_justify(Justify::Center),
                ScreenText,
            ));
        });
}

/// HUD read-out: score, multiplier, integer hull and shield.
pub fn hud_text(session: &Session, craft: Option<&Craft>) -> String {
    let (hull, shield) = craft.map_or((0, 0), |c| (c.hull as i32, c.shield as i32));
    format!(
        "Score: {:.0}   x{:.1}\nHull: {hull}   Shield: {shield}",
        session.score, session.multiplier
    )
}

const CONTROL_TEXT: [&str; CONTROL_PAGES] = [
    "FLIGHT\n\n←/→  turn\n↑/↓  pitch\nLeft Shift  thrust\nLeft Ctrl  reverse",
    "MANOEUVRE\n\nA/D  strafe\nW/S  climb and dive",
    "COMBAT\n\nSpace  fire (hold to repeat)\nShield recharges after a short break from damage",
    "GAME\n\nEsc  upgrade menu\nM  toggle sound\nSpend score on upgrades; they last until the run ends",
];

/// Overlay text for every screen except `Running`, which shows the HUD only.
pub fn screen_text(
    state: GameState,
    menu: &MenuState,
    session: &Session,
    stats: &PlayerStats,
    cursor: &UpgradeCursor,
) -> String {
    let mut text = String::new();
    match state {
        GameState::Running => {}
        GameState::Splash => {
            text.push_str("STRIKECRAFT\n\n");
            for option in SplashOption::ALL {
                let marker = if option == menu.splash_selection { ">" } else { " " };
                let _ = writeln!(text, "{marker} {}", option.label());
            }
        }
        GameState::Controls => {
            let page = menu.controls_page.min(CONTROL_PAGES - 1);
            let _ = write!(
                text,
                "{}\n\n< page {} of {CONTROL_PAGES} >\nEnter to return",
                CONTROL_TEXT[page],
                page + 1
            );
        }
        GameState::DifficultySelect => {
            text.push_str("DIFFICULTY\n\n");
            for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
                let marker = if difficulty == session.difficulty { ">" } else { " " };
                let _ = writeln!(text, "{marker} {}", difficulty.label());
            }
        }
        GameState::UpgradeMenu => {
            let _ = writeln!(text, "UPGRADES    score {:.0}\n", session.score);
            for (index, selected) in cursor.visible(stats.len()) {
                let Some(stat) = stats.at(index) else {
                    continue;
                };
                let marker = if selected { ">" } else { " " };
                let cost = if stat.is_maxed() {
                    "max".to_string()
                } else {
                    format!("{:.0}", stat.next_level_cost())
                };
                let _ = writeln!(
                    text,
                    "{marker} {:<20} {}/{}  {:>7.1}  {cost}",
                    stat.name(),
                    stat.level(),
                    stat.max_level(),
                    stat.value()
                );
            }
            text.push_str("\nEnter buy   Esc resume   Q end run");
        }
        GameState::WinLoss => {
            let _ = write!(
                text,
                "GAME OVER\n\nScore {:.0}\n\nEnter to play again   Esc to quit",
                session.score
            );
        }
    }
    text
}

pub fn hud_display_system(
    state: Res<State<GameState>>,
    session: Res<Session>,
    craft: Query<&Craft>,
    mut hud: Query<(&mut Text, &mut Visibility), With<HudText>>,
) {
    let running = *state.get() == GameState::Running;
    for (mut text, mut visibility) in hud.iter_mut() {
        *visibility = if running {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if running {
            *text = Text::new(hud_text(&session, craft.iter().next()));
        }
    }
}

pub fn screen_display_system(
    state: Res<State<GameState>>,
    menu: Res<MenuState>,
    session: Res<Session>,
    stats: Res<PlayerStats>,
    cursor: Res<UpgradeCursor>,
    mut overlay: Query<&mut Text, With<ScreenText>>,
) {
    let content = screen_text(*state.get(), &menu, &session, &stats, &cursor);
    for mut text in overlay.iter_mut() {
        if text.0 != content {
            text.0.clone_from(&content);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dart_mesh_has_flat_faces() {
        let mesh = dart_mesh(24.0, 22.0, 4.0);
        assert_eq!(mesh.count_vertices(), 18);
        assert!(mesh.attribute(Mesh::ATTRIBUTE_NORMAL).is_some());
    }

    #[test]
    fn hud_truncates_hull_and_shield() {
        let stats = PlayerStats::default();
        let mut craft = Craft::new(&stats);
        craft.hull = 37.9;
        craft.shield = 12.2;
        let session = Session::default();
        let text = hud_text(&session, Some(&craft));
        assert!(text.contains("Hull: 37"), "{text}");
        assert!(text.contains("Shield: 12"), "{text}");
        assert!(text.contains("x1.0"), "{text}");
    }

    #[test]
    fn splash_marks_selection() {
        let menu = MenuState {
            splash_selection: SplashOption::Difficulty,
            controls_page: 0,
        };
        let text = screen_text(
            GameState::Splash,
            &menu,
            &Session::default(),
            &PlayerStats::default(),
            &UpgradeCursor::default(),
        );
        assert!(text.contains("> Difficulty"), "{text}");
        assert!(text.contains("  Play"), "{text}");
    }

    #[test]
    fn upgrade_screen_shows_six_rows() {
        let text = screen_text(
            GameState::UpgradeMenu,
            &MenuState::default(),
            &Session::default(),
            &PlayerStats::default(),
            &UpgradeCursor::default(),
        );
        let rows = text
            .lines()
            .filter(|line| line.starts_with('>') || line.starts_with("  "))
            .count();
        assert_eq!(rows, 6, "{text}");
        assert!(text.contains("> Turning Rate"), "{text}");
        assert!(!text.contains("Shield Capacity"), "{text}");
    }

    #[test]
    fn running_has_no_overlay() {
        let text = screen_text(
            GameState::Running,
            &MenuState::default(),
            &Session::default(),
            &PlayerStats::default(),
            &UpgradeCursor::default(),
        );
        assert!(text.is_empty());
    }
}
