use crate::core::framebuffer::FrameBuffer;
use crate::core::pipeline::Shader;
use crate::core::rasterizer::Rasterizer;
use crate::scene::mesh::Mesh;
use nalgebra::Vector3;

/// Clear parameters for the start of a frame.
pub struct ClearOptions {
    /// Fallback fill color, used when no gradient is set.
    pub color: Vector3<f32>,
    /// Vertical gradient (top, bottom); takes precedence over `color`.
    pub gradient: Option<(Vector3<f32>, Vector3<f32>)>,
    pub depth: f32,
}

impl Default for ClearOptions {
    fn default() -> Self {
        Self {
            color: Vector3::zeros(),
            gradient: None,
            depth: f32::INFINITY,
        }
    }
}

/// The high-level renderer that orchestrates the pipeline stages.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    pub framebuffer: FrameBuffer,
}

impl Renderer {
    /// Creates a new renderer.
    /// sample_count: 1 for no AA, 2 for 2x2 SSAA, etc.
    pub fn new(width: usize, height: usize, sample_count: usize) -> Self {
        Self {
            // The rasterizer is stateless regarding size; it works on whatever
            // framebuffer it is handed.
            rasterizer: Rasterizer::new(),
            framebuffer: FrameBuffer::new(width, height, sample_count),
        }
    }

    /// Clears the framebuffer.
    pub fn clear(&mut self, color: Vector3<f32>) {
        self.framebuffer.clear(color, f32::INFINITY);
    }

    pub fn clear_with_options(&mut self, options: ClearOptions) {
        match options.gradient {
            Some((top, bottom)) => self.framebuffer.clear_gradient(top, bottom, options.depth),
            None => self.framebuffer.clear(options.color, options.depth),
        }
    }

    /// Draws an indexed triangle mesh using the provided shader.
    pub fn draw_mesh<S: Shader>(&mut self, mesh: &Mesh, shader: &S) {
        // Vertex processing & primitive assembly: indices in chunks of 3.
        for chunk in mesh.indices.chunks(3) {
            if chunk.len() < 3 {
                break;
            }

            let v0 = &mesh.vertices[chunk[0] as usize];
            let v1 = &mesh.vertices[chunk[1] as usize];
            let v2 = &mesh.vertices[chunk[2] as usize];

            let (pos0, var0) = shader.vertex(v0);
            let (pos1, var1) = shader.vertex(v1);
            let (pos2, var2) = shader.vertex(v2);

            let clip_coords = [pos0, pos1, pos2];
            let varyings = [var0, var1, var2];

            self.rasterizer
                .rasterize_triangle(&self.framebuffer, shader, &clip_coords, &varyings);
        }
    }
}
