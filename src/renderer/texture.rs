//! Surface textures for the floor, walls and ceiling.
//!
//! Images are decoded with the `image` crate and uploaded as
//! `Rgba8UnormSrgb`. A missing or unreadable file never aborts start-up; the
//! surface falls back to a small solid-colour texture instead.

use std::path::Path;

/// Fallback colours used when a texture path is unset or fails to load.
pub const FLOOR_FALLBACK: [u8; 4] = [90, 85, 80, 255];
pub const WALL_FALLBACK: [u8; 4] = [150, 140, 125, 255];
pub const CEILING_FALLBACK: [u8; 4] = [60, 60, 70, 255];

/// Side length of a fallback texture in pixels.
const FALLBACK_SIZE: u32 = 4;

/// Decodes `path` to RGBA8, or returns a solid `fallback` image.
pub fn decode_or_fallback(path: Option<&Path>, fallback: [u8; 4]) -> image::RgbaImage {
    let solid = || image::RgbaImage::from_pixel(FALLBACK_SIZE, FALLBACK_SIZE, image::Rgba(fallback));

    let Some(path) = path else {
        log::debug!("No texture configured, using solid colour {:?}", fallback);
        return solid();
    };

    match image::open(path) {
        Ok(img) => {
            let img = img.to_rgba8();
            log::info!(
                "Loaded texture {} ({}x{})",
                path.display(),
                img.width(),
                img.height()
            );
            img
        }
        Err(e) => {
            log::warn!(
                "Failed to load texture {}: {}, using solid colour",
                path.display(),
                e
            );
            solid()
        }
    }
}

/// Uploads `img` to a new sampled texture and returns its view.
pub fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    img: &image::RgbaImage,
    label: &str,
) -> wgpu::TextureView {
    let (width, height) = img.dimensions();
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
        },
        img,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );

    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Repeating, linearly filtered sampler shared by all surfaces.
pub fn create_repeat_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Surface Sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Tests that an unset path yields the solid fallback.
    #[test]
    fn test_fallback_without_path() {
        let img = decode_or_fallback(None, WALL_FALLBACK);
        assert_eq!(img.dimensions(), (FALLBACK_SIZE, FALLBACK_SIZE));
        assert!(img.pixels().all(|p| p.0 == WALL_FALLBACK));
    }

    /// Tests that a missing file yields the solid fallback.
    #[test]
    fn test_fallback_on_missing_file() {
        let path = PathBuf::from("does/not/exist/floor.png");
        let img = decode_or_fallback(Some(&path), FLOOR_FALLBACK);
        assert_eq!(img.get_pixel(0, 0).0, FLOOR_FALLBACK);
    }

    /// Tests that a real image file is decoded.
    #[test]
    fn test_decodes_png() {
        let path = std::env::temp_dir().join(format!("mazewalk_texture_{}.png", std::process::id()));
        let source = image::RgbaImage::from_pixel(2, 3, image::Rgba([1, 2, 3, 255]));
        source.save(&path).unwrap();

        let img = decode_or_fallback(Some(&path), CEILING_FALLBACK);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(img.dimensions(), (2, 3));
        assert_eq!(img.get_pixel(1, 2).0, [1, 2, 3, 255]);
    }
}
