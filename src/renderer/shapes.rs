//! Shape generation for 2D primitives
//!
//! Turns a world snapshot into a flat draw list, back to front. The list is
//! backend-agnostic so it can be inspected without a browser.

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::{GameState, Material, Tint};

/// RGBA, each channel in 0..1
pub type Color = [f32; 4];

/// Background grid spacing
pub const GRID_SPACING: f32 = 40.0;
/// Side of a particle square
pub const PARTICLE_PIXELS: f32 = 4.0;

/// A single draw command
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        min: Vec2,
        size: Vec2,
        color: Color,
    },
    Outline {
        min: Vec2,
        size: Vec2,
        color: Color,
        width: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    Text {
        pos: Vec2,
        text: String,
        color: Color,
        px: f32,
    },
}

const GROUND: Color = [0.29, 0.22, 0.15, 1.0];
const GRID: Color = [1.0, 1.0, 1.0, 0.05];
const OBSTACLE_EDGE: Color = [1.0, 1.0, 1.0, 0.2];
const PLAYER: Color = [0.0, 0.8, 0.2, 1.0];
const PICKUP: Color = [0.75, 0.75, 0.8, 1.0];
const PANEL: Color = [0.0, 0.0, 0.0, 0.7];
const WHITE: Color = [1.0, 1.0, 1.0, 1.0];

/// Solid color for an obstacle surface
pub fn material_color(material: Material) -> Color {
    match material {
        Material::Brick => [0.61, 0.24, 0.18, 1.0],
        Material::Wood => [0.55, 0.38, 0.2, 1.0],
        Material::Earth => [0.42, 0.31, 0.2, 1.0],
    }
}

/// Color for a tinted entity with the given opacity
pub fn tint_color(tint: Tint, alpha: f32) -> Color {
    let [r, g, b] = match tint {
        Tint::Red => [1.0, 0.0, 0.0],
        Tint::Yellow => [1.0, 1.0, 0.0],
        Tint::Green => [0.0, 1.0, 0.0],
    };
    [r, g, b, alpha.clamp(0.0, 1.0)]
}

/// CSS `rgba()` string for a color
pub fn css(color: Color) -> String {
    let [r, g, b, a] = color;
    format!(
        "rgba({},{},{},{:.3})",
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
        a
    )
}

/// Everything visible this frame, in paint order
pub fn build_frame(state: &GameState, settings: &Settings) -> Vec<Shape> {
    let arena = state.arena;
    let mut shapes = Vec::with_capacity(
        64 + state.enemies.len() + state.projectiles.len() + state.particles.len(),
    );

    shapes.push(Shape::Rect {
        min: Vec2::ZERO,
        size: arena,
        color: GROUND,
    });
    if settings.quality.grid_enabled() {
        grid(&mut shapes, arena);
    }

    for obstacle in &state.obstacles {
        shapes.push(Shape::Rect {
            min: obstacle.pos,
            size: obstacle.size,
            color: material_color(obstacle.material),
        });
        shapes.push(Shape::Outline {
            min: obstacle.pos,
            size: obstacle.size,
            color: OBSTACLE_EDGE,
            width: 2.0,
        });
    }

    for pickup in &state.pickups {
        shapes.push(Shape::Rect {
            min: pickup.pos - Vec2::splat(pickup.size),
            size: Vec2::splat(pickup.size * 2.0),
            color: PICKUP,
        });
    }

    shapes.push(Shape::Circle {
        center: state.player.pos,
        radius: state.player.size,
        color: PLAYER,
    });

    for enemy in &state.enemies {
        shapes.push(Shape::Circle {
            center: enemy.pos,
            radius: enemy.size,
            color: tint_color(enemy.tint, 0.85),
        });
    }

    for projectile in &state.projectiles {
        shapes.push(Shape::Rect {
            min: projectile.pos - Vec2::splat(projectile.size),
            size: Vec2::splat(projectile.size * 2.0),
            color: tint_color(Tint::Yellow, 1.0),
        });
    }

    for particle in &state.particles {
        shapes.push(Shape::Rect {
            min: particle.pos - Vec2::splat(PARTICLE_PIXELS / 2.0),
            size: Vec2::splat(PARTICLE_PIXELS),
            color: tint_color(particle.tint, particle.life),
        });
    }

    ammo_panel(&mut shapes, state);
    shapes
}

fn grid(shapes: &mut Vec<Shape>, arena: Vec2) {
    let mut x = 0.0;
    while x < arena.x {
        shapes.push(Shape::Line {
            from: Vec2::new(x, 0.0),
            to: Vec2::new(x, arena.y),
            color: GRID,
            width: 1.0,
        });
        x += GRID_SPACING;
    }
    let mut y = 0.0;
    while y < arena.y {
        shapes.push(Shape::Line {
            from: Vec2::new(0.0, y),
            to: Vec2::new(arena.x, y),
            color: GRID,
            width: 1.0,
        });
        y += GRID_SPACING;
    }
}

/// Bottom-left weapon readout
fn ammo_panel(shapes: &mut Vec<Shape>, state: &GameState) {
    let bottom = state.arena.y;
    let weapon = &state.player.weapon;

    shapes.push(Shape::Rect {
        min: Vec2::new(10.0, bottom - 80.0),
        size: Vec2::new(200.0, 70.0),
        color: PANEL,
    });
    shapes.push(Shape::Text {
        pos: Vec2::new(20.0, bottom - 55.0),
        text: format!("Ammo: {}/{}", weapon.ammo, weapon.max_ammo),
        color: WHITE,
        px: 16.0,
    });
    if weapon.ammo == 0 {
        shapes.push(Shape::Text {
            pos: Vec2::new(60.0, bottom - 35.0),
            text: "RELOAD (R)".to_string(),
            color: tint_color(Tint::Red, 1.0),
            px: 16.0,
        });
    }
    shapes.push(Shape::Text {
        pos: Vec2::new(20.0, bottom - 15.0),
        text: "Press R to reload".to_string(),
        color: tint_color(Tint::Green, 1.0),
        px: 12.0,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::QualityPreset;

    fn texts(shapes: &[Shape]) -> Vec<&str> {
        shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_grid_follows_quality() {
        let state = GameState::new(1);
        let count_lines = |shapes: &[Shape]| {
            shapes
                .iter()
                .filter(|s| matches!(s, Shape::Line { .. }))
                .count()
        };

        let medium = build_frame(&state, &Settings::default());
        assert_eq!(count_lines(&medium), 20 + 15);

        let low = Settings {
            quality: QualityPreset::Low,
            ..Default::default()
        };
        assert_eq!(count_lines(&build_frame(&state, &low)), 0);
    }

    #[test]
    fn test_ammo_panel() {
        let mut state = GameState::new(1);
        let frame = build_frame(&state, &Settings::default());
        assert!(texts(&frame).contains(&"Ammo: 30/30"));
        assert!(!texts(&frame).contains(&"RELOAD (R)"));

        state.player.weapon.ammo = 0;
        let frame = build_frame(&state, &Settings::default());
        assert!(texts(&frame).contains(&"Ammo: 0/30"));
        assert!(texts(&frame).contains(&"RELOAD (R)"));
    }

    #[test]
    fn test_particles_fade_with_life() {
        let mut state = GameState::new(1);
        state.emit_burst(Vec2::new(50.0, 50.0), Tint::Green, 1);
        state.particles[0].life = 0.25;
        let frame = build_frame(&state, &Settings::default());
        let faded = frame.iter().any(|s| {
            matches!(s, Shape::Rect { size, color, .. }
                if *size == Vec2::splat(PARTICLE_PIXELS) && color[3] == 0.25)
        });
        assert!(faded);
    }

    #[test]
    fn test_entities_drawn() {
        let mut state = GameState::new(3);
        state.start();
        let frame = build_frame(&state, &Settings::default());
        let circles = frame
            .iter()
            .filter(|s| matches!(s, Shape::Circle { .. }))
            .count();
        // Player plus the opening zombie
        assert_eq!(circles, 2);
        let outlines = frame
            .iter()
            .filter(|s| matches!(s, Shape::Outline { .. }))
            .count();
        assert_eq!(outlines, state.obstacles.len());
    }

    #[test]
    fn test_css() {
        assert_eq!(css([1.0, 0.0, 0.0, 1.0]), "rgba(255,0,0,1.000)");
        assert_eq!(css([1.0, 1.0, 1.0, 0.05]), "rgba(255,255,255,0.050)");
    }
}
