use web_sys::{WebGl2RenderingContext as GL, WebGlBuffer, WebGlVertexArrayObject};

use super::gl::{NORMAL, POSITION, UV};
use crate::geometry::{fullscreen_triangle, Geometry};
use crate::DemoError;

const FLOAT: i32 = 4;

fn buffer(gl: &GL) -> Result<WebGlBuffer, DemoError> {
    gl.create_buffer().ok_or(DemoError::Allocation("buffer"))
}

fn vertex_array(gl: &GL) -> Result<WebGlVertexArrayObject, DemoError> {
    gl.create_vertex_array()
        .ok_or(DemoError::Allocation("vertex array"))
}

/// Geometry uploaded to the GPU.
pub struct GpuMesh {
    vao: WebGlVertexArrayObject,
    index_count: i32,
    _vertices: WebGlBuffer,
    _indices: WebGlBuffer,
}

impl GpuMesh {
    pub fn upload(gl: &GL, geometry: &Geometry) -> Result<Self, DemoError> {
        let vao = vertex_array(gl)?;
        gl.bind_vertex_array(Some(&vao));

        let vertices = buffer(gl)?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&vertices));
        let data = js_sys::Float32Array::from(geometry.interleaved().as_slice());
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &data, GL::STATIC_DRAW);

        let stride = 8 * FLOAT;
        for (slot, size, offset) in [(POSITION, 3, 0), (NORMAL, 3, 3), (UV, 2, 6)] {
            gl.enable_vertex_attrib_array(slot);
            gl.vertex_attrib_pointer_with_i32(slot, size, GL::FLOAT, false, stride, offset * FLOAT);
        }

        let indices = buffer(gl)?;
        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&indices));
        let data = js_sys::Uint16Array::from(geometry.indices.as_slice());
        gl.buffer_data_with_array_buffer_view(GL::ELEMENT_ARRAY_BUFFER, &data, GL::STATIC_DRAW);

        gl.bind_vertex_array(None);

        Ok(Self {
            vao,
            index_count: geometry.indices.len() as i32,
            _vertices: vertices,
            _indices: indices,
        })
    }

    pub fn draw(&self, gl: &GL) {
        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_elements_with_i32(GL::TRIANGLES, self.index_count, GL::UNSIGNED_SHORT, 0);
        gl.bind_vertex_array(None);
    }
}

/// Clip-space triangle for post-processing passes.
pub struct FullscreenTriangle {
    vao: WebGlVertexArrayObject,
    _vertices: WebGlBuffer,
}

impl FullscreenTriangle {
    pub fn new(gl: &GL) -> Result<Self, DemoError> {
        let vao = vertex_array(gl)?;
        gl.bind_vertex_array(Some(&vao));

        let vertices = buffer(gl)?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&vertices));
        let data = js_sys::Float32Array::from(&fullscreen_triangle()[..]);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &data, GL::STATIC_DRAW);
        gl.enable_vertex_attrib_array(POSITION);
        gl.vertex_attrib_pointer_with_i32(POSITION, 2, GL::FLOAT, false, 0, 0);

        gl.bind_vertex_array(None);
        Ok(Self {
            vao,
            _vertices: vertices,
        })
    }

    pub fn draw(&self, gl: &GL) {
        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(GL::TRIANGLES, 0, 3);
        gl.bind_vertex_array(None);
    }
}
