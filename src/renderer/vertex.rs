//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Flat-colored vertex in world pixels (NDC once uploaded)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Same vertex with its position mapped through `f`
    pub fn map_position(self, f: impl Fn(f32, f32) -> (f32, f32)) -> Self {
        let (x, y) = f(self.position[0], self.position[1]);
        Self::new(x, y, self.color)
    }

    /// Buffer layout matching `shader.wgsl` locations 0 and 1
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [90.0 / 255.0, 165.0 / 255.0, 200.0 / 255.0, 1.0];
    pub const GROUND: [f32; 4] = [65.0 / 255.0, 45.0 / 255.0, 25.0 / 255.0, 1.0];
    pub const BALL: [f32; 4] = [210.0 / 255.0, 100.0 / 255.0, 30.0 / 255.0, 1.0];
    /// Marker showing the ball's roll
    pub const BALL_SPOKE: [f32; 4] = [0.35, 0.15, 0.05, 1.0];
    /// Letterbox bars outside the world
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_tightly_packed() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[1].offset, 8);
        assert_eq!(layout.attributes[1].shader_location, 1);
    }

    #[test]
    fn test_map_position_keeps_color() {
        let v = Vertex::new(2.0, 3.0, colors::BALL).map_position(|x, y| (x * 2.0, -y));
        assert_eq!(v.position, [4.0, -3.0]);
        assert_eq!(v.color, colors::BALL);
    }
}
