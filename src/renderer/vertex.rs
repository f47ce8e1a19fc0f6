//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// `0xRRGGBB` to linear-ish RGBA floats
pub const fn rgb(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// CSS `rgba()` string for 2D canvas fills
pub fn css_color(color: [f32; 4]) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({},{},{},{})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

/// Colors for game elements
pub mod colors {
    use super::rgb;

    pub const BACKGROUND: [f32; 4] = rgb(0x2c3e50);
    pub const GRASS: [f32; 4] = rgb(0x27ae60);
    pub const ROAD: [f32; 4] = rgb(0x34495e);
    pub const ROAD_EDGE: [f32; 4] = rgb(0xecf0f1);
    pub const LANE_LINE: [f32; 4] = rgb(0xf39c12);

    pub const CAR_TOP: [f32; 4] = rgb(0xe74c3c);
    pub const CAR_BOTTOM: [f32; 4] = rgb(0xc0392b);
    pub const WINDOW: [f32; 4] = rgb(0x3498db);
    pub const WHEEL: [f32; 4] = rgb(0x000000);
    pub const LIGHT: [f32; 4] = rgb(0xf1c40f);

    pub const TRAFFIC_TOP: [f32; 4] = rgb(0x3498db);
    pub const TRAFFIC_BOTTOM: [f32; 4] = rgb(0x2980b9);
    pub const TRAFFIC_WINDOW: [f32; 4] = rgb(0x34495e);
    pub const CONE: [f32; 4] = rgb(0xe67e22);
    pub const STRIPE: [f32; 4] = rgb(0xecf0f1);
    pub const BARRIER: [f32; 4] = rgb(0xe74c3c);
    pub const BARRIER_BASE: [f32; 4] = rgb(0x34495e);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb() {
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgb(0x000000), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_css_color() {
        assert_eq!(css_color(colors::GRASS), "rgba(39,174,96,1)");
    }
}
