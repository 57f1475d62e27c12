use bevy::log::LogPlugin;
use bevy::math::primitives::{Circle, Rectangle};
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::{PrimaryWindow, WindowResolution};
use tracing::info;

use crate::simulation::engine::Canvas;
use crate::simulation::forces::Overlay;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{NVec2, PointerButton, Region};

#[derive(Component)]
struct BodyIndex(pub usize);

/// Smallest radius drawn, so massless-looking bodies stay visible
const MIN_RADIUS: f32 = 2.0;
/// Half length of a rotor baton
const BATON: f64 = 50.0;

pub fn run_2d(scenario: Scenario) {
    info!(
        bodies = scenario.system.bodies.len(),
        walkers = scenario.walkers.len(),
        "starting Bevy 2D viewer"
    );
    let canvas = scenario.engine.canvas;

    App::new()
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(scenario)
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "sketchsim".into(),
                        resolution: WindowResolution::new(canvas.width as f32, canvas.height as f32),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                // main installs the tracing subscriber
                .disable::<LogPlugin>(),
        )
        .add_systems(Startup, setup_bodies_system)
        .add_systems(
            Update,
            (pointer_input_system, physics_step_system, sync_transforms_system, draw_overlays_system).chain(),
        )
        .run();
}

/// Canvas coordinates (origin top-left, y down) to world space (origin center, y up)
fn to_world(p: &NVec2, canvas: &Canvas) -> Vec2 {
    Vec2::new((p.x - 0.5 * canvas.width) as f32, (0.5 * canvas.height - p.y) as f32)
}

fn region_rect(r: &Region, canvas: &Canvas) -> (Vec2, Vec2) {
    (to_world(&r.center(), canvas), Vec2::new(r.w as f32, r.h as f32))
}

fn setup_bodies_system(mut commands: Commands, scenario: Res<Scenario>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());

    let canvas = scenario.engine.canvas;
    let material = materials.add(ColorMaterial::from(Color::srgba(1.0, 1.0, 1.0, 0.4)));

    for (i, body) in scenario.system.bodies.iter().enumerate() {
        let r = (body.radius as f32).max(MIN_RADIUS);
        // rotating bodies are squares so the rotation shows
        let mesh = if body.orientation().is_some() {
            Mesh2dHandle(meshes.add(Rectangle::new(2.0 * r, 2.0 * r)))
        } else {
            Mesh2dHandle(meshes.add(Circle::new(r)))
        };
        let p = to_world(&body.x, &canvas);

        commands.spawn((
            MaterialMesh2dBundle {
                mesh,
                material: material.clone(),
                transform: Transform::from_xyz(p.x, p.y, 0.0),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }
}

/// Copy cursor, buttons and arrow keys into the scenario's pointer
fn pointer_input_system(
    mut scenario: ResMut<Scenario>,
    windows: Query<&Window, With<PrimaryWindow>>,
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
) {
    let scenario = &mut *scenario;

    // window size equals canvas size, so logical cursor pixels are canvas coordinates
    let position = windows
        .get_single()
        .ok()
        .and_then(Window::cursor_position)
        .map(|p| NVec2::new(p.x as f64, p.y as f64));

    let pointer = &mut scenario.system.pointer;
    pointer.position = position;
    pointer.pressed = if buttons.pressed(MouseButton::Left) {
        Some(PointerButton::Primary)
    } else if buttons.pressed(MouseButton::Right) {
        Some(PointerButton::Secondary)
    } else {
        None
    };

    if keys.just_pressed(KeyCode::ArrowUp) {
        pointer.thrust_increase();
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        pointer.thrust_reduce();
    }
    if keys.just_pressed(KeyCode::ArrowLeft) {
        pointer.thrust_left();
    }
    if keys.just_pressed(KeyCode::ArrowRight) {
        pointer.thrust_right();
    }

    if buttons.just_pressed(MouseButton::Left) {
        if let Some(p) = position {
            scenario.spawn_star(p);
        }
    }
}

fn physics_step_system(mut scenario: ResMut<Scenario>) {
    scenario.step();
}

fn sync_transforms_system(scenario: Res<Scenario>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    let canvas = scenario.engine.canvas;
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(b) = scenario.system.bodies.get(*i) {
            let p = to_world(&b.x, &canvas);
            transform.translation.x = p.x;
            transform.translation.y = p.y;
            if let Some(angle) = b.orientation() {
                // y is flipped, so a clockwise canvas angle is negative in world space
                transform.rotation = Quat::from_rotation_z(-(angle as f32));
            }
        }
    }
}

fn draw_overlays_system(scenario: Res<Scenario>, mut gizmos: Gizmos) {
    let canvas = scenario.engine.canvas;
    let center = NVec2::new(0.5 * canvas.width, 0.5 * canvas.height);

    for overlay in scenario.forces.overlays(&scenario.system) {
        match overlay {
            Overlay::Liquid(r) => {
                let (p, size) = region_rect(&r, &canvas);
                gizmos.rect_2d(p, 0.0, size, Color::srgba(0.6, 0.6, 0.6, 0.8));
            }
            Overlay::Pocket { region, boost } => {
                let (p, size) = region_rect(&region, &canvas);
                let color = if boost { Color::srgb(0.0, 1.0, 0.0) } else { Color::srgb(1.0, 0.0, 0.0) };
                gizmos.rect_2d(p, 0.0, size, color);
            }
            Overlay::Attractor { x, m } => {
                // diameter grows with m^2
                gizmos.circle_2d(to_world(&x, &canvas), (0.5 * m * m) as f32, Color::srgba(0.7, 0.7, 0.7, 0.8));
            }
        }
    }

    for w in &scenario.walkers {
        gizmos.linestrip_2d(w.trail.iter().map(|p| to_world(p, &canvas)), Color::WHITE);
    }

    for o in &scenario.oscillators {
        let tip = to_world(&(center + o.offset(scenario.system.frame)), &canvas);
        gizmos.line_2d(to_world(&center, &canvas), tip, Color::WHITE);
        gizmos.circle_2d(tip, 10.0, Color::WHITE);
    }

    for path in &scenario.paths {
        gizmos.circle_2d(to_world(&(center + path.position()), &canvas), 4.0, Color::WHITE);
    }

    for rotor in &scenario.rotors {
        let arm = NVec2::new(rotor.angle.cos(), rotor.angle.sin()) * BATON;
        let (a, b) = (to_world(&(center - arm), &canvas), to_world(&(center + arm), &canvas));
        gizmos.line_2d(a, b, Color::WHITE);
        gizmos.circle_2d(a, 4.0, Color::WHITE);
        gizmos.circle_2d(b, 4.0, Color::WHITE);
    }

    if let Some(stars) = &scenario.stars {
        for star in &stars.stars {
            let from = to_world(&star.x, &canvas);
            for ray in &star.rays {
                gizmos.line_2d(from, to_world(ray, &canvas), Color::srgba(1.0, 1.0, 1.0, 0.2));
            }
        }
    }
}
