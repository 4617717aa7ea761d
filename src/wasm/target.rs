//! Offscreen render targets: a 2D colour target for post-processing and a
//! cube target for the environment map.

use web_sys::{WebGl2RenderingContext as GL, WebGlFramebuffer, WebGlRenderbuffer, WebGlTexture};

use crate::DemoError;

fn check_complete(gl: &GL) -> Result<(), DemoError> {
    let status = gl.check_framebuffer_status(GL::FRAMEBUFFER);
    if status != GL::FRAMEBUFFER_COMPLETE {
        log::error!("framebuffer status {status:#x}");
        return Err(DemoError::IncompleteFramebuffer(status));
    }
    Ok(())
}

fn depth_buffer(gl: &GL, width: i32, height: i32) -> Result<WebGlRenderbuffer, DemoError> {
    let depth = gl
        .create_renderbuffer()
        .ok_or(DemoError::Allocation("renderbuffer"))?;
    gl.bind_renderbuffer(GL::RENDERBUFFER, Some(&depth));
    gl.renderbuffer_storage(GL::RENDERBUFFER, GL::DEPTH_COMPONENT24, width, height);
    gl.bind_renderbuffer(GL::RENDERBUFFER, None);
    Ok(depth)
}

fn allocate_rgba(gl: &GL, target: u32, width: i32, height: i32) -> Result<(), DemoError> {
    gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
        target,
        0,
        GL::RGBA8 as i32,
        width,
        height,
        0,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        None,
    )?;
    Ok(())
}

/// Colour texture with a depth attachment, resizable.
pub struct RenderTarget {
    framebuffer: WebGlFramebuffer,
    texture: WebGlTexture,
    depth: WebGlRenderbuffer,
    width: i32,
    height: i32,
}

impl RenderTarget {
    pub fn new(gl: &GL, width: i32, height: i32) -> Result<Self, DemoError> {
        let framebuffer = gl
            .create_framebuffer()
            .ok_or(DemoError::Allocation("framebuffer"))?;
        let texture = gl
            .create_texture()
            .ok_or(DemoError::Allocation("texture"))?;
        gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
        for (param, value) in [
            (GL::TEXTURE_MIN_FILTER, GL::LINEAR),
            (GL::TEXTURE_MAG_FILTER, GL::LINEAR),
            (GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE),
            (GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE),
        ] {
            gl.tex_parameteri(GL::TEXTURE_2D, param, value as i32);
        }
        gl.bind_texture(GL::TEXTURE_2D, None);

        let mut target = Self {
            framebuffer,
            texture,
            depth: depth_buffer(gl, width, height)?,
            width: 0,
            height: 0,
        };
        target.set_size(gl, width, height)?;
        Ok(target)
    }

    pub fn set_size(&mut self, gl: &GL, width: i32, height: i32) -> Result<(), DemoError> {
        if (width, height) == (self.width, self.height) {
            return Ok(());
        }
        self.width = width;
        self.height = height;

        gl.bind_texture(GL::TEXTURE_2D, Some(&self.texture));
        allocate_rgba(gl, GL::TEXTURE_2D, width, height)?;
        gl.bind_texture(GL::TEXTURE_2D, None);

        gl.bind_renderbuffer(GL::RENDERBUFFER, Some(&self.depth));
        gl.renderbuffer_storage(GL::RENDERBUFFER, GL::DEPTH_COMPONENT24, width, height);
        gl.bind_renderbuffer(GL::RENDERBUFFER, None);

        gl.bind_framebuffer(GL::FRAMEBUFFER, Some(&self.framebuffer));
        gl.framebuffer_texture_2d(
            GL::FRAMEBUFFER,
            GL::COLOR_ATTACHMENT0,
            GL::TEXTURE_2D,
            Some(&self.texture),
            0,
        );
        gl.framebuffer_renderbuffer(
            GL::FRAMEBUFFER,
            GL::DEPTH_ATTACHMENT,
            GL::RENDERBUFFER,
            Some(&self.depth),
        );
        let status = check_complete(gl);
        gl.bind_framebuffer(GL::FRAMEBUFFER, None);
        status
    }

    pub fn bind(&self, gl: &GL) {
        gl.bind_framebuffer(GL::FRAMEBUFFER, Some(&self.framebuffer));
        gl.viewport(0, 0, self.width, self.height);
    }

    pub fn texture(&self) -> &WebGlTexture {
        &self.texture
    }
}

/// Six square faces rendered one at a time, mipmapped afterwards.
pub struct CubeRenderTarget {
    framebuffer: WebGlFramebuffer,
    texture: WebGlTexture,
    _depth: WebGlRenderbuffer,
    size: i32,
}

impl CubeRenderTarget {
    pub fn new(gl: &GL, size: i32) -> Result<Self, DemoError> {
        let texture = gl
            .create_texture()
            .ok_or(DemoError::Allocation("cube texture"))?;
        gl.bind_texture(GL::TEXTURE_CUBE_MAP, Some(&texture));
        for face in 0..6 {
            allocate_rgba(gl, GL::TEXTURE_CUBE_MAP_POSITIVE_X + face, size, size)?;
        }
        for (param, value) in [
            (GL::TEXTURE_MIN_FILTER, GL::LINEAR_MIPMAP_LINEAR),
            (GL::TEXTURE_MAG_FILTER, GL::LINEAR),
            (GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE),
            (GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE),
        ] {
            gl.tex_parameteri(GL::TEXTURE_CUBE_MAP, param, value as i32);
        }
        gl.generate_mipmap(GL::TEXTURE_CUBE_MAP);
        gl.bind_texture(GL::TEXTURE_CUBE_MAP, None);

        let framebuffer = gl
            .create_framebuffer()
            .ok_or(DemoError::Allocation("framebuffer"))?;
        let depth = depth_buffer(gl, size, size)?;

        gl.bind_framebuffer(GL::FRAMEBUFFER, Some(&framebuffer));
        gl.framebuffer_renderbuffer(
            GL::FRAMEBUFFER,
            GL::DEPTH_ATTACHMENT,
            GL::RENDERBUFFER,
            Some(&depth),
        );
        gl.framebuffer_texture_2d(
            GL::FRAMEBUFFER,
            GL::COLOR_ATTACHMENT0,
            GL::TEXTURE_CUBE_MAP_POSITIVE_X,
            Some(&texture),
            0,
        );
        let status = check_complete(gl);
        gl.bind_framebuffer(GL::FRAMEBUFFER, None);
        status?;

        Ok(Self {
            framebuffer,
            texture,
            _depth: depth,
            size,
        })
    }

    /// Bind the framebuffer with `face` (0..6) as its colour attachment.
    pub fn bind_face(&self, gl: &GL, face: usize) {
        gl.bind_framebuffer(GL::FRAMEBUFFER, Some(&self.framebuffer));
        gl.framebuffer_texture_2d(
            GL::FRAMEBUFFER,
            GL::COLOR_ATTACHMENT0,
            GL::TEXTURE_CUBE_MAP_POSITIVE_X + face as u32,
            Some(&self.texture),
            0,
        );
        gl.viewport(0, 0, self.size, self.size);
    }

    /// Rebuild the mip chain once all faces are drawn.
    pub fn finish(&self, gl: &GL) {
        gl.bind_framebuffer(GL::FRAMEBUFFER, None);
        gl.bind_texture(GL::TEXTURE_CUBE_MAP, Some(&self.texture));
        gl.generate_mipmap(GL::TEXTURE_CUBE_MAP);
        gl.bind_texture(GL::TEXTURE_CUBE_MAP, None);
    }

    pub fn texture(&self) -> &WebGlTexture {
        &self.texture
    }
}
