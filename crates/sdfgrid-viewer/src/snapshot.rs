//! Headless PNG snapshot through the software rasterizer.

use std::path::Path;

use anyhow::{Context, Result};
use sdfgrid_engine::field::{rasterize, GridUniforms};

/// Renders one frame of the grid for `uniforms` and writes it to `path` as PNG.
pub fn write_snapshot(path: &Path, uniforms: &GridUniforms) -> Result<()> {
    let frame = rasterize(uniforms).context("failed to rasterize grid")?;

    let image = image::RgbaImage::from_raw(frame.width(), frame.height(), frame.to_rgba8())
        .context("framebuffer size does not match its pixel data")?;

    image
        .save(path)
        .with_context(|| format!("failed to write snapshot to {}", path.display()))?;

    log::info!(
        "wrote {}x{} snapshot to {}",
        frame.width(),
        frame.height(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdfgrid_engine::coords::{Vec2, Viewport};

    #[test]
    fn writes_a_decodable_png() {
        let path = std::env::temp_dir().join(format!("sdfgrid-snapshot-{}.png", std::process::id()));
        let u = GridUniforms::new(Viewport::new(64.0, 48.0), Vec2::new(32.0, 24.0), 1.0);

        write_snapshot(&path, &u).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (64, 48));
        assert!(img.pixels().all(|p| p.0[3] == 255));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn rejects_degenerate_uniforms() {
        let path = std::env::temp_dir().join("sdfgrid-never-written.png");
        let u = GridUniforms::new(Viewport::new(0.0, 48.0), Vec2::zero(), 1.0);
        assert!(write_snapshot(&path, &u).is_err());
        assert!(!path.exists());
    }
}
