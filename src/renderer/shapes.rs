//! Shape generation for 2D primitives and the game scene

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::consts::ROAD_DASH_PERIOD;
use crate::sim::{ObstacleKind, RenderView};

/// Road edge line thickness
const EDGE_WIDTH: f32 = 4.0;
/// Lane divider thickness
const LANE_LINE_WIDTH: f32 = 3.0;
/// Painted part of one dash period
const DASH_LENGTH: f32 = 20.0;

/// A point inside a sprite box: pixel offset plus a fraction of the box size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Place {
    pub px: [f32; 2],
    pub frac: [f32; 2],
}

impl Place {
    fn resolve(&self, size: Vec2) -> Vec2 {
        Vec2::new(
            self.px[0] + self.frac[0] * size.x,
            self.px[1] + self.frac[1] * size.y,
        )
    }
}

/// `x px + fx * width`, `y px + fy * height`
const fn p(x: f32, fx: f32, y: f32, fy: f32) -> Place {
    Place {
        px: [x, y],
        frac: [fx, fy],
    }
}

const ORIGIN: Place = p(0.0, 0.0, 0.0, 0.0);
const FULL: Place = p(0.0, 1.0, 0.0, 1.0);

/// One filled piece of a sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Part {
    Rect {
        at: Place,
        size: Place,
        color: [f32; 4],
    },
    /// Vertical gradient rectangle
    Gradient {
        at: Place,
        size: Place,
        top: [f32; 4],
        bottom: [f32; 4],
    },
    /// Triangle with its apex at top-center and base along the bottom
    Wedge { color: [f32; 4] },
}

/// How a sprite box is drawn, as a list of parts painted in order
#[derive(Debug, Clone, Copy)]
pub struct ObstacleStyle {
    pub parts: &'static [Part],
}

impl ObstacleStyle {
    /// Style table lookup
    pub fn for_kind(kind: ObstacleKind) -> &'static ObstacleStyle {
        &OBSTACLE_STYLES[kind.index()]
    }

    /// Append the sprite's triangles for a box at `min` of `size`
    pub fn tessellate(&self, min: Vec2, size: Vec2, out: &mut Vec<Vertex>) {
        for part in self.parts {
            match *part {
                Part::Rect { at, size: extent, color } => {
                    out.extend(rect(min + at.resolve(size), extent.resolve(size), color));
                }
                Part::Gradient {
                    at,
                    size: extent,
                    top,
                    bottom,
                } => {
                    out.extend(gradient_rect(
                        min + at.resolve(size),
                        extent.resolve(size),
                        top,
                        bottom,
                    ));
                }
                Part::Wedge { color } => {
                    out.extend(triangle(
                        Vec2::new(min.x + size.x / 2.0, min.y),
                        Vec2::new(min.x, min.y + size.y),
                        Vec2::new(min.x + size.x, min.y + size.y),
                        color,
                    ));
                }
            }
        }
    }
}

/// Player car
pub const PLAYER_CAR: ObstacleStyle = ObstacleStyle {
    parts: &[
        Part::Gradient {
            at: ORIGIN,
            size: FULL,
            top: colors::CAR_TOP,
            bottom: colors::CAR_BOTTOM,
        },
        Part::Rect {
            at: p(5.0, 0.0, 10.0, 0.0),
            size: p(-10.0, 1.0, 0.0, 0.3),
            color: colors::WINDOW,
        },
        Part::Rect {
            at: p(-3.0, 0.0, 10.0, 0.0),
            size: p(6.0, 0.0, 15.0, 0.0),
            color: colors::WHEEL,
        },
        Part::Rect {
            at: p(-3.0, 1.0, 10.0, 0.0),
            size: p(6.0, 0.0, 15.0, 0.0),
            color: colors::WHEEL,
        },
        Part::Rect {
            at: p(-3.0, 0.0, -25.0, 1.0),
            size: p(6.0, 0.0, 15.0, 0.0),
            color: colors::WHEEL,
        },
        Part::Rect {
            at: p(-3.0, 1.0, -25.0, 1.0),
            size: p(6.0, 0.0, 15.0, 0.0),
            color: colors::WHEEL,
        },
        Part::Rect {
            at: p(5.0, 0.0, -5.0, 1.0),
            size: p(10.0, 0.0, 4.0, 0.0),
            color: colors::LIGHT,
        },
        Part::Rect {
            at: p(-15.0, 1.0, -5.0, 1.0),
            size: p(10.0, 0.0, 4.0, 0.0),
            color: colors::LIGHT,
        },
    ],
};

const TRAFFIC_CAR: ObstacleStyle = ObstacleStyle {
    parts: &[
        Part::Gradient {
            at: ORIGIN,
            size: FULL,
            top: colors::TRAFFIC_TOP,
            bottom: colors::TRAFFIC_BOTTOM,
        },
        Part::Rect {
            at: p(5.0, 0.0, 0.0, 0.6),
            size: p(-10.0, 1.0, 0.0, 0.3),
            color: colors::TRAFFIC_WINDOW,
        },
        Part::Rect {
            at: p(-3.0, 0.0, 10.0, 0.0),
            size: p(6.0, 0.0, 12.0, 0.0),
            color: colors::WHEEL,
        },
        Part::Rect {
            at: p(-3.0, 1.0, 10.0, 0.0),
            size: p(6.0, 0.0, 12.0, 0.0),
            color: colors::WHEEL,
        },
        Part::Rect {
            at: p(-3.0, 0.0, -22.0, 1.0),
            size: p(6.0, 0.0, 12.0, 0.0),
            color: colors::WHEEL,
        },
        Part::Rect {
            at: p(-3.0, 1.0, -22.0, 1.0),
            size: p(6.0, 0.0, 12.0, 0.0),
            color: colors::WHEEL,
        },
    ],
};

const CONE: ObstacleStyle = ObstacleStyle {
    parts: &[
        Part::Wedge {
            color: colors::CONE,
        },
        Part::Rect {
            at: p(5.0, 0.0, 0.0, 0.3),
            size: p(-10.0, 1.0, 5.0, 0.0),
            color: colors::STRIPE,
        },
        Part::Rect {
            at: p(3.0, 0.0, 0.0, 0.6),
            size: p(-6.0, 1.0, 5.0, 0.0),
            color: colors::STRIPE,
        },
    ],
};

const STRIPE: Place = p(10.0, 0.0, 8.0, 0.0);

const BARRIER: ObstacleStyle = ObstacleStyle {
    parts: &[
        Part::Rect {
            at: ORIGIN,
            size: p(0.0, 1.0, 0.0, 0.7),
            color: colors::BARRIER,
        },
        // Chevrons converging from both sides
        Part::Rect {
            at: p(0.0, 0.0, 0.0, 0.0),
            size: STRIPE,
            color: colors::STRIPE,
        },
        Part::Rect {
            at: p(-10.0, 1.0, 0.0, 0.0),
            size: STRIPE,
            color: colors::STRIPE,
        },
        Part::Rect {
            at: p(15.0, 0.0, 10.0, 0.0),
            size: STRIPE,
            color: colors::STRIPE,
        },
        Part::Rect {
            at: p(-25.0, 1.0, 10.0, 0.0),
            size: STRIPE,
            color: colors::STRIPE,
        },
        Part::Rect {
            at: p(30.0, 0.0, 20.0, 0.0),
            size: STRIPE,
            color: colors::STRIPE,
        },
        Part::Rect {
            at: p(-40.0, 1.0, 20.0, 0.0),
            size: STRIPE,
            color: colors::STRIPE,
        },
        Part::Rect {
            at: p(-5.0, 0.0, 0.0, 0.7),
            size: p(10.0, 1.0, 0.0, 0.3),
            color: colors::BARRIER_BASE,
        },
    ],
};

/// Obstacle styles in `ObstacleKind::index` order
pub static OBSTACLE_STYLES: [ObstacleStyle; 3] = [TRAFFIC_CAR, CONE, BARRIER];

/// Two triangles covering an axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    gradient_rect(min, size, color, color)
}

/// Rectangle with `top` color along its upper edge fading to `bottom`
pub fn gradient_rect(min: Vec2, size: Vec2, top: [f32; 4], bottom: [f32; 4]) -> [Vertex; 6] {
    let max = min + size;
    [
        Vertex::new(min.x, min.y, top),
        Vertex::new(max.x, min.y, top),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(max.x, min.y, top),
        Vertex::new(max.x, max.y, bottom),
    ]
}

pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> [Vertex; 3] {
    [
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Dashed vertical line at `x`; dashes slide down by `phase`
pub fn dashed_line(x: f32, height: f32, phase: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let mut start = phase.rem_euclid(ROAD_DASH_PERIOD) - ROAD_DASH_PERIOD;

    while start < height {
        let top = start.max(0.0);
        let bottom = (start + DASH_LENGTH).min(height);
        if bottom > top {
            vertices.extend(rect(
                Vec2::new(x - LANE_LINE_WIDTH / 2.0, top),
                Vec2::new(LANE_LINE_WIDTH, bottom - top),
                color,
            ));
        }
        start += ROAD_DASH_PERIOD;
    }

    vertices
}

/// Full frame: background, road, obstacles, then the player car on top
pub fn build_scene(view: RenderView<'_>) -> Vec<Vertex> {
    let road = view.road;
    let (w, h) = (road.width, road.height);
    let left = road.road_left();
    let right = left + road.road_width;

    let mut vertices = Vec::with_capacity(256 + view.obstacles.len() * 60);

    vertices.extend(rect(Vec2::ZERO, Vec2::new(w, h), colors::BACKGROUND));
    vertices.extend(rect(Vec2::ZERO, Vec2::new(left, h), colors::GRASS));
    vertices.extend(rect(
        Vec2::new(right, 0.0),
        Vec2::new(w - right, h),
        colors::GRASS,
    ));
    vertices.extend(rect(
        Vec2::new(left, 0.0),
        Vec2::new(road.road_width, h),
        colors::ROAD,
    ));

    for edge in [left, right] {
        vertices.extend(rect(
            Vec2::new(edge - EDGE_WIDTH / 2.0, 0.0),
            Vec2::new(EDGE_WIDTH, h),
            colors::ROAD_EDGE,
        ));
    }

    for lane in 1..road.lane_count {
        let x = left + lane as f32 * road.lane_width();
        vertices.extend(dashed_line(x, h, view.scroll_phase, colors::LANE_LINE));
    }

    for obstacle in view.obstacles {
        ObstacleStyle::for_kind(obstacle.kind).tessellate(
            obstacle.pos,
            obstacle.size,
            &mut vertices,
        );
    }

    PLAYER_CAR.tessellate(view.car.pos, view.car.size, &mut vertices);

    vertices
}
