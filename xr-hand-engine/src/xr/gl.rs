use web_sys::{WebGl2RenderingContext as Gl, WebGlFramebuffer, WebGlTexture};

use crate::tracking::error::FrameError;
use crate::tracking::frame_reader::PixelTransfer;

use super::bindings::describe_js_error;

impl PixelTransfer for Gl {
    type Texture = WebGlTexture;
    type Target = WebGlFramebuffer;

    fn create_target(&self) -> Result<WebGlFramebuffer, FrameError> {
        self.create_framebuffer()
            .ok_or(FrameError::FramebufferUnavailable)
    }

    fn attach_texture(
        &self,
        target: &WebGlFramebuffer,
        texture: &WebGlTexture,
    ) -> Result<(), FrameError> {
        self.bind_framebuffer(Gl::FRAMEBUFFER, Some(target));
        self.framebuffer_texture_2d(
            Gl::FRAMEBUFFER,
            Gl::COLOR_ATTACHMENT0,
            Gl::TEXTURE_2D,
            Some(texture),
            0,
        );

        let status = self.check_framebuffer_status(Gl::FRAMEBUFFER);
        if status != Gl::FRAMEBUFFER_COMPLETE {
            return Err(FrameError::IncompleteFramebuffer(status));
        }
        Ok(())
    }

    fn read_rgba(&self, width: u32, height: u32, dst: &mut [u8]) -> Result<(), FrameError> {
        self.read_pixels_with_opt_u8_array(
            0,
            0,
            width as i32,
            height as i32,
            Gl::RGBA,
            Gl::UNSIGNED_BYTE,
            Some(dst),
        )
        .map_err(|err| FrameError::ReadFailed(describe_js_error(&err)))
    }

    fn release_target(&self, target: &WebGlFramebuffer) {
        self.bind_framebuffer(Gl::FRAMEBUFFER, None);
        self.delete_framebuffer(Some(target));
    }
}
