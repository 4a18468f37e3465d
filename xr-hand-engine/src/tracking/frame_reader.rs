use super::error::FrameError;

/// CPU copy of a camera frame, tightly packed RGBA8 rows.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    pub fn byte_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * 4
    }
}

/// GPU operations needed to stage a texture for readback.
///
/// Implemented for `WebGl2RenderingContext` in the browser; tests use a
/// counting fake.
pub trait PixelTransfer {
    type Texture;
    type Target;

    fn create_target(&self) -> Result<Self::Target, FrameError>;

    /// Bind `target` and attach `texture` as its colour attachment 0.
    fn attach_texture(
        &self,
        target: &Self::Target,
        texture: &Self::Texture,
    ) -> Result<(), FrameError>;

    /// Synchronously read `width * height` RGBA8 pixels from the bound target.
    fn read_rgba(&self, width: u32, height: u32, dst: &mut [u8]) -> Result<(), FrameError>;

    fn release_target(&self, target: &Self::Target);
}

/// Owns an offscreen target for the duration of one readback.
struct ScopedTarget<'a, G: PixelTransfer> {
    gl: &'a G,
    target: G::Target,
}

impl<'a, G: PixelTransfer> ScopedTarget<'a, G> {
    fn acquire(gl: &'a G) -> Result<Self, FrameError> {
        let target = gl.create_target()?;
        Ok(Self { gl, target })
    }
}

impl<G: PixelTransfer> Drop for ScopedTarget<'_, G> {
    fn drop(&mut self) {
        self.gl.release_target(&self.target);
    }
}

/// Copy a GPU-resident camera texture into CPU memory.
///
/// The offscreen target is released exactly once whether the read succeeds
/// or fails.
pub fn read_frame<G: PixelTransfer>(
    gl: &G,
    texture: &G::Texture,
    width: u32,
    height: u32,
) -> Result<PixelBuffer, FrameError> {
    if width == 0 || height == 0 {
        return Err(FrameError::InvalidDimensions { width, height });
    }

    let target = ScopedTarget::acquire(gl)?;
    gl.attach_texture(&target.target, texture)?;

    let mut data = vec![0u8; PixelBuffer::byte_len(width, height)];
    gl.read_rgba(width, height, &mut data)?;

    Ok(PixelBuffer {
        width,
        height,
        data,
    })
}
