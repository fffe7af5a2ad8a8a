//! Overlap tests and push-out for circles and axis-aligned rectangles
//!
//! Everything in the arena is a circle except obstacles, which are boxes.
//! The player is tested against boxes through its bounding square.

use glam::Vec2;

/// Circle-circle overlap (touching does not count)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// True if `p` lies inside the closed rectangle `[0, arena.x] x [0, arena.y]`
#[inline]
pub fn in_arena(p: Vec2, arena: Vec2) -> bool {
    p.x >= 0.0 && p.x <= arena.x && p.y >= 0.0 && p.y <= arena.y
}

/// Bounding square of a circle vs. a box (strict overlap)
pub fn circle_box_overlap(center: Vec2, radius: f32, min: Vec2, max: Vec2) -> bool {
    center.x - radius < max.x
        && center.x + radius > min.x
        && center.y - radius < max.y
        && center.y + radius > min.y
}

/// Displacement that moves a circle's bounding square out of a box
///
/// Resolves along the single axis with the smallest penetration. Returns
/// `Vec2::ZERO` when there is no overlap.
pub fn box_push_out(center: Vec2, radius: f32, min: Vec2, max: Vec2) -> Vec2 {
    if !circle_box_overlap(center, radius, min, max) {
        return Vec2::ZERO;
    }

    // Distance to move in each direction to clear the box
    let push_left = (center.x + radius) - min.x;
    let push_right = max.x - (center.x - radius);
    let push_up = (center.y + radius) - min.y;
    let push_down = max.y - (center.y - radius);

    let x = if push_left < push_right {
        -push_left
    } else {
        push_right
    };
    let y = if push_up < push_down { -push_up } else { push_down };

    if x.abs() <= y.abs() {
        Vec2::new(x, 0.0)
    } else {
        Vec2::new(0.0, y)
    }
}

/// Clamp a circle center so the circle stays inside the arena
#[inline]
pub fn clamp_to_arena(center: Vec2, radius: f32, arena: Vec2) -> Vec2 {
    Vec2::new(
        center.x.clamp(radius, (arena.x - radius).max(radius)),
        center.y.clamp(radius, (arena.y - radius).max(radius)),
    )
}
