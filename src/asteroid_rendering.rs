//! Mesh2d-based filled polygon rendering for asteroids.
//!
//! The simulation owns asteroids as plain values, so the renderer mirrors
//! them into ECS entities keyed by mission serial and [`Asteroid::id`]:
//!
//! | Situation                          | Action                                 |
//! |------------------------------------|----------------------------------------|
//! | id live, no entity yet             | spawn fill mesh + `Text2d` number label |
//! | id live, entity exists             | move it, recolour by [`AsteroidTint`]   |
//! | entity whose id is gone            | despawn (label goes with it)           |
//!
//! Mesh geometry is uploaded once per asteroid; only the transform and the
//! material colour change afterwards.  Outlines are drawn with gizmos on top.

use crate::asteroid::{Asteroid, AsteroidTint};
use crate::graphics::to_world;
use crate::session::GameSession;
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};
use std::collections::{HashMap, HashSet};

/// Links a rendered entity to the simulation asteroid it shows.
#[derive(Component, Debug, Clone, Copy)]
pub struct AsteroidVisual {
    pub mission: u64,
    pub id: u64,
}

// ── Palette ───────────────────────────────────────────────────────────────────

fn fill_color(tint: AsteroidTint) -> Color {
    match tint {
        AsteroidTint::Flash => Color::srgb(1.0, 1.0, 1.0),
        AsteroidTint::Prime => Color::srgb(0.23, 0.51, 0.96),
        AsteroidTint::Composite => Color::srgb(0.94, 0.27, 0.27),
        AsteroidTint::Neutral => Color::srgb(0.42, 0.45, 0.50),
    }
}

fn stroke_color(tint: AsteroidTint) -> Color {
    match tint {
        AsteroidTint::Flash => Color::WHITE,
        AsteroidTint::Prime => Color::srgb(0.38, 0.65, 0.98),
        AsteroidTint::Composite => Color::srgb(0.97, 0.44, 0.44),
        AsteroidTint::Neutral => Color::srgb(0.61, 0.64, 0.69),
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Spawn, move, recolour and despawn asteroid visuals to match the session.
pub fn sync_asteroid_visuals_system(
    mut commands: Commands,
    session: Res<GameSession>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(
        Entity,
        &AsteroidVisual,
        &mut Transform,
        &MeshMaterial2d<ColorMaterial>,
    )>,
) {
    let bounds = session.bounds();
    let serial = session.mission_serial();
    let (live, scanner): (HashMap<u64, &Asteroid>, bool) = match session.mission() {
        Some(mission) => (
            mission.asteroids().iter().map(|a| (a.id(), a)).collect(),
            mission.loadout().scanner,
        ),
        None => (HashMap::new(), false),
    };

    let mut drawn = HashSet::with_capacity(live.len());
    for (entity, visual, mut transform, material) in query.iter_mut() {
        let current = visual.mission == serial;
        let Some(asteroid) = live.get(&visual.id).filter(|_| current) else {
            commands.entity(entity).despawn();
            continue;
        };
        drawn.insert(visual.id);
        let world = to_world(asteroid.position, bounds);
        transform.translation.x = world.x;
        transform.translation.y = world.y;
        if let Some(mat) = materials.get_mut(&material.0) {
            mat.color = fill_color(asteroid.tint(scanner));
        }
    }

    for (id, asteroid) in &live {
        if drawn.contains(id) || asteroid.points().len() < 3 {
            continue;
        }
        let outline: Vec<Vec2> = asteroid.points().iter().map(|p| Vec2::new(p.x, -p.y)).collect();
        let mesh_handle = meshes.add(filled_polygon_mesh(&outline));
        let material_handle =
            materials.add(ColorMaterial::from_color(fill_color(asteroid.tint(scanner))));
        let world = to_world(asteroid.position, bounds);

        commands
            .spawn((
                AsteroidVisual {
                    mission: serial,
                    id: *id,
                },
                Mesh2d(mesh_handle),
                MeshMaterial2d(material_handle),
                Transform::from_translation(world.extend(0.0)),
                Visibility::default(),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text2d::new(asteroid.number().to_string()),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                    Transform::from_xyz(0.0, 0.0, 1.0),
                ));
            });
    }
}

/// Stroke every asteroid outline on top of its fill.
pub fn asteroid_outline_gizmo_system(mut gizmos: Gizmos, session: Res<GameSession>) {
    let Some(mission) = session.mission() else {
        return;
    };
    let bounds = session.bounds();
    let scanner = mission.loadout().scanner;
    for asteroid in mission.asteroids() {
        let color = stroke_color(asteroid.tint(scanner));
        let points = asteroid.points();
        for i in 0..points.len() {
            let a = to_world(asteroid.position + points[i], bounds);
            let b = to_world(asteroid.position + points[(i + 1) % points.len()], bounds);
            gizmos.line_2d(a, b, color);
        }
    }
}

// ── Geometry helpers ──────────────────────────────────────────────────────────

/// Triangulate a star-shaped polygon around the local origin into a [`Mesh`].
///
/// Asteroid outlines are jittered per vertex, so they are not convex; a fan
/// from vertex 0 could fold over itself.  Instead the fan is rooted at an
/// extra centre vertex: triangles `(c, i, i+1)` for every edge, wrapping at
/// the end.  Any outline whose vertices are sorted by angle around the origin
/// renders correctly.
pub fn filled_polygon_mesh(vertices: &[Vec2]) -> Mesh {
    let n = vertices.len();
    debug_assert!(n >= 3, "polygon must have ≥ 3 vertices");

    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(n + 1);
    positions.push([0.0, 0.0, 0.0]);
    positions.extend(vertices.iter().map(|v| [v.x, v.y, 0.0]));
    let normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 1.0]; n + 1];
    // Map ±50 px local coords to roughly the 0–1 UV range.
    let uvs: Vec<[f32; 2]> = positions
        .iter()
        .map(|p| [(p[0] / 100.0) + 0.5, (p[1] / 100.0) + 0.5])
        .collect();

    let mut indices: Vec<u32> = Vec::with_capacity(n * 3);
    for i in 0..n as u32 {
        let next = (i + 1) % n as u32;
        indices.extend_from_slice(&[0, i + 1, next + 1]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Vec2> {
        vec![
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(-10.0, 0.0),
            Vec2::new(0.0, -10.0),
        ]
    }

    #[test]
    fn fan_has_one_triangle_per_edge() {
        let mesh = filled_polygon_mesh(&square());
        assert_eq!(mesh.count_vertices(), 5);
        match mesh.indices() {
            Some(Indices::U32(indices)) => {
                assert_eq!(indices.len(), 12);
                assert!(indices.chunks(3).all(|t| t[0] == 0));
                // Last triangle wraps back to the first outline vertex.
                assert_eq!(&indices[9..12], &[0, 4, 1]);
            }
            other => panic!("unexpected index buffer: {other:?}"),
        }
    }

    #[test]
    fn flash_overrides_palette() {
        assert_eq!(fill_color(AsteroidTint::Flash), Color::srgb(1.0, 1.0, 1.0));
        assert_ne!(fill_color(AsteroidTint::Prime), fill_color(AsteroidTint::Composite));
    }
}
