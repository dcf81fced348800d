//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct which is a CPU representation of a GPU texture,
//! and [`load_image_or_placeholder`] which never fails to produce something to upload.

use std::{path::Path, sync::Arc};

use glow::HasContext;
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

/// Side length of the generated placeholder, in texels.
pub const PLACEHOLDER_SIZE: u32 = 8;

/// Magenta/black checkerboard used when the real image cannot be loaded.
pub fn placeholder_image() -> DynamicImage {
    let image = RgbaImage::from_fn(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba([255, 0, 255, 255])
        } else {
            Rgba([0, 0, 0, 255])
        }
    });
    DynamicImage::ImageRgba8(image)
}

/// Decodes the image at `path`, substituting [`placeholder_image`] on any failure.
pub fn load_image_or_placeholder(path: &Path) -> DynamicImage {
    match image::open(path) {
        Ok(image) => {
            log::info!(
                "loaded texture {} ({}x{})",
                path.display(),
                image.width(),
                image.height()
            );
            image
        }
        Err(e) => {
            log::warn!(
                "cannot load texture {}: {e}; using placeholder",
                path.display()
            );
            placeholder_image()
        }
    }
}

/// Represents a texture stored on the GPU side.
pub struct Texture {
    gl: Arc<glow::Context>,
    id: glow::Texture,
    width: u32,
    height: u32,
}

impl Texture {
    /// Creates a new texture from the given [`image::DynamicImage`].
    ///
    /// Uses linear filtering and repeat wrapping. The RGBA copy made for the upload is dropped
    /// before this returns.
    pub fn new(gl: &Arc<glow::Context>, image: &DynamicImage) -> Result<Self, String> {
        let (width, height) = image.dimensions();
        let data = image.to_rgba8().into_raw();
        unsafe {
            let texture = gl.create_texture()?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(data.as_slice())),
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            gl.bind_texture(glow::TEXTURE_2D, None);

            log::debug!("uploaded {width}x{height} texture");
            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
                width,
                height,
            })
        }
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        log::trace!("deleting {}x{} texture", self.width, self.height);
        unsafe {
            self.gl.bind_texture(glow::TEXTURE_2D, None);
            self.gl.delete_texture(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_checkerboard() {
        let image = placeholder_image().to_rgba8();
        assert_eq!(image.dimensions(), (PLACEHOLDER_SIZE, PLACEHOLDER_SIZE));
        assert_eq!(image.get_pixel(0, 0), &Rgba([255, 0, 255, 255]));
        assert_eq!(image.get_pixel(1, 0), &Rgba([0, 0, 0, 255]));
        assert_eq!(image.get_pixel(1, 1), &Rgba([255, 0, 255, 255]));
    }

    #[test]
    fn test_missing_image_falls_back() {
        let path = std::env::temp_dir().join("hellogl-no-such-texture.png");
        let image = load_image_or_placeholder(&path);
        assert_eq!(image.dimensions(), (PLACEHOLDER_SIZE, PLACEHOLDER_SIZE));
    }

    #[test]
    fn test_real_image_is_loaded() {
        let path = std::env::temp_dir().join(format!("hellogl-tex-{}.png", std::process::id()));
        RgbaImage::from_pixel(3, 5, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();
        let image = load_image_or_placeholder(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(image.dimensions(), (3, 5));
    }
}
