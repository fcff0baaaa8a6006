//! Scene generation for the arena

use glam::Vec2;

use super::commands::{Color, DrawCommand, Rect};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, GRID_SPACING};
use crate::sim::{ArenaState, Unit};

const BACKGROUND_TOP: Color = Color::hex(0x0f172a);
const BACKGROUND_BOTTOM: Color = Color::hex(0x111827);
const TERRAIN_GLOW: Color = Color::rgba(30, 64, 175, 0.4);
const TERRAIN_FADE: Color = Color::rgba(30, 64, 175, 0.0);
const GRID_LINE: Color = Color::rgba(255, 255, 255, 0.05);

const HEALTH_BAR_BACKING: Color = Color::rgba(17, 24, 39, 0.6);
const HEALTH_BAR_OUTLINE: Color = Color::rgba(255, 255, 255, 0.5);
const FRIENDLY_HEALTH: Color = Color::hex(0x34d399);
const HOSTILE_HEALTH: Color = Color::hex(0xf97316);

const HEALTH_BAR_HEIGHT: f32 = 6.0;
/// Gap between the top of a unit and its health bar
const HEALTH_BAR_OFFSET: f32 = 12.0;
const HEALTH_BAR_WIDTH_FACTOR: f32 = 2.6;

const FRIENDLY_GLOW: f32 = 18.0;
const HOSTILE_GLOW: f32 = 12.0;

/// Fixed decorative terrain patches: (x, y, size)
const TERRAIN_SPOTS: [(f32, f32, f32); 4] = [
    (120.0, 110.0, 70.0),
    (560.0, 80.0, 90.0),
    (220.0, 300.0, 65.0),
    (640.0, 300.0, 55.0),
];

/// Which side a unit is drawn for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Friendly,
    Hostile,
}

/// Full frame: background, hostiles, then friendlies on top
pub fn build_frame(state: &ArenaState) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(
        32 + (state.friendlies.len() + state.hostiles.len()) * 4,
    );
    background(&mut commands);
    for hostile in &state.hostiles {
        draw_unit(&mut commands, hostile, Side::Hostile);
    }
    for bot in &state.friendlies {
        draw_unit(&mut commands, bot, Side::Friendly);
    }
    commands
}

/// Gradient, terrain spots and grid. Purely cosmetic.
pub fn background(out: &mut Vec<DrawCommand>) {
    out.push(DrawCommand::VerticalGradient {
        rect: Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT),
        top: BACKGROUND_TOP,
        bottom: BACKGROUND_BOTTOM,
    });

    for (x, y, size) in TERRAIN_SPOTS {
        out.push(DrawCommand::RadialGlow {
            center: Vec2::new(x, y),
            inner_radius: size * 0.1,
            outer_radius: size,
            inner: TERRAIN_GLOW,
            outer: TERRAIN_FADE,
        });
    }

    let mut x = 0.0;
    while x <= CANVAS_WIDTH {
        out.push(grid_line(Vec2::new(x, 0.0), Vec2::new(x, CANVAS_HEIGHT)));
        x += GRID_SPACING;
    }
    let mut y = 0.0;
    while y <= CANVAS_HEIGHT {
        out.push(grid_line(Vec2::new(0.0, y), Vec2::new(CANVAS_WIDTH, y)));
        y += GRID_SPACING;
    }
}

fn grid_line(from: Vec2, to: Vec2) -> DrawCommand {
    DrawCommand::Line {
        from,
        to,
        color: GRID_LINE,
        width: 1.0,
    }
}

/// Health bar frame and the filled portion
pub fn health_bar(unit: &Unit) -> (Rect, Rect) {
    let width = unit.radius * HEALTH_BAR_WIDTH_FACTOR;
    let frame = Rect::new(
        unit.pos.x - width / 2.0,
        unit.pos.y - unit.radius - HEALTH_BAR_OFFSET,
        width,
        HEALTH_BAR_HEIGHT,
    );
    let fill = Rect {
        w: width * unit.health_ratio(),
        ..frame
    };
    (frame, fill)
}

/// Glowing body plus health bar
pub fn draw_unit(out: &mut Vec<DrawCommand>, unit: &Unit, side: Side) {
    let (glow, bar_color) = match side {
        Side::Friendly => (FRIENDLY_GLOW, FRIENDLY_HEALTH),
        Side::Hostile => (HOSTILE_GLOW, HOSTILE_HEALTH),
    };

    out.push(DrawCommand::Circle {
        center: unit.pos,
        radius: unit.radius,
        color: Color::hex(unit.color),
        glow,
    });

    let (frame, fill) = health_bar(unit);
    out.push(DrawCommand::FillRect {
        rect: frame,
        color: HEALTH_BAR_BACKING,
    });
    out.push(DrawCommand::FillRect {
        rect: fill,
        color: bar_color,
    });
    out.push(DrawCommand::StrokeRect {
        rect: frame,
        color: HEALTH_BAR_OUTLINE,
        width: 1.0,
    });
}
