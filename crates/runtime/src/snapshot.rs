//! PNG snapshot of a raster surface's last presented frame.
//!
//! Feature-gated behind `png` (default on) so embedders that only need the
//! live ticker do not pull in the `image` crate.

use std::path::Path;

use plexus_core::error::AnimationError;

use crate::raster::RasterSurface;

/// Writes the surface's most recently presented frame as a PNG.
///
/// Returns `AnimationError::InvalidDimensions` if the pixel dimensions
/// overflow `u32`, or `AnimationError::Io` on encode/write failure.
pub fn write_png(surface: &RasterSurface, path: &Path) -> Result<(), AnimationError> {
    let w = u32::try_from(surface.width()).map_err(|_| AnimationError::InvalidDimensions)?;
    let h = u32::try_from(surface.height()).map_err(|_| AnimationError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, surface.pixels().to_vec())
        .ok_or_else(|| AnimationError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| AnimationError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexus_core::surface::Surface;
    use plexus_core::Rgba;

    #[test]
    fn write_png_round_trip() {
        let mut surface = RasterSurface::new(24, 16, Rgba::opaque(0.0, 0.0, 0.0)).unwrap();
        surface.set_fill_color(Rgba::opaque(1.0, 0.0, 119.0 / 255.0));
        surface.begin_path();
        surface.circle(12.0, 8.0, 4.0);
        surface.fill();
        surface.present();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        write_png(&surface, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 24);
        assert_eq!(img.height(), 16);
        assert_eq!(img.get_pixel(12, 8).0, [255, 0, 119, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }
}
