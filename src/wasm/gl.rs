use std::collections::HashMap;

use glam::{Mat4, Vec2, Vec3, Vec4};
use web_sys::{WebGl2RenderingContext as GL, WebGlProgram, WebGlShader, WebGlUniformLocation};

use crate::DemoError;

/// Attribute slots shared by every program, bound before linking.
pub const POSITION: u32 = 0;
pub const NORMAL: u32 = 1;
pub const UV: u32 = 2;

fn compile(gl: &GL, stage: u32, source: &str) -> Result<WebGlShader, DemoError> {
    let shader = gl
        .create_shader(stage)
        .ok_or(DemoError::Allocation("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let ok = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        return Ok(shader);
    }

    let log = gl.get_shader_info_log(&shader).unwrap_or_default();
    gl.delete_shader(Some(&shader));
    let stage = if stage == GL::VERTEX_SHADER { "vertex" } else { "fragment" };
    log::error!("{stage} shader: {log}");
    Err(DemoError::ShaderCompile { stage, log })
}

/// A linked program plus a lazily filled uniform-location cache.
pub struct Program {
    program: WebGlProgram,
    locations: HashMap<&'static str, Option<WebGlUniformLocation>>,
}

impl Program {
    pub fn new(
        gl: &GL,
        name: &'static str,
        vertex: &str,
        fragment: &str,
    ) -> Result<Self, DemoError> {
        let vs = compile(gl, GL::VERTEX_SHADER, vertex)?;
        let fs = compile(gl, GL::FRAGMENT_SHADER, fragment)?;

        let program = gl
            .create_program()
            .ok_or(DemoError::Allocation("program"))?;
        gl.attach_shader(&program, &vs);
        gl.attach_shader(&program, &fs);
        gl.bind_attrib_location(&program, POSITION, "position");
        gl.bind_attrib_location(&program, NORMAL, "normal");
        gl.bind_attrib_location(&program, UV, "uv");
        gl.link_program(&program);
        gl.delete_shader(Some(&vs));
        gl.delete_shader(Some(&fs));

        let ok = gl
            .get_program_parameter(&program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !ok {
            let log = gl.get_program_info_log(&program).unwrap_or_default();
            log::error!("program {name}: {log}");
            return Err(DemoError::ProgramLink { name, log });
        }

        Ok(Self {
            program,
            locations: HashMap::new(),
        })
    }

    pub fn bind(&self, gl: &GL) {
        gl.use_program(Some(&self.program));
    }

    // Uniforms the compiler stripped come back as None and are skipped.
    fn location(&mut self, gl: &GL, uniform: &'static str) -> Option<WebGlUniformLocation> {
        let program = &self.program;
        self.locations
            .entry(uniform)
            .or_insert_with(|| gl.get_uniform_location(program, uniform))
            .clone()
    }

    pub fn set_f32(&mut self, gl: &GL, uniform: &'static str, v: f32) {
        gl.uniform1f(self.location(gl, uniform).as_ref(), v);
    }

    pub fn set_i32(&mut self, gl: &GL, uniform: &'static str, v: i32) {
        gl.uniform1i(self.location(gl, uniform).as_ref(), v);
    }

    pub fn set_vec2(&mut self, gl: &GL, uniform: &'static str, v: Vec2) {
        gl.uniform2f(self.location(gl, uniform).as_ref(), v.x, v.y);
    }

    pub fn set_vec3(&mut self, gl: &GL, uniform: &'static str, v: Vec3) {
        gl.uniform3f(self.location(gl, uniform).as_ref(), v.x, v.y, v.z);
    }

    pub fn set_vec4(&mut self, gl: &GL, uniform: &'static str, v: Vec4) {
        gl.uniform4f(self.location(gl, uniform).as_ref(), v.x, v.y, v.z, v.w);
    }

    pub fn set_mat4(&mut self, gl: &GL, uniform: &'static str, m: &Mat4) {
        gl.uniform_matrix4fv_with_f32_array(
            self.location(gl, uniform).as_ref(),
            false,
            &m.to_cols_array(),
        );
    }
}
