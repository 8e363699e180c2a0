//! PNG display sink.
//!
//! Stands in for the e-paper driver on a host: every pushed frame is redrawn
//! onto a `SimulatorDisplay` and saved with the LCD-white theme, so ink shows
//! dark on a light background like the real panel.

use std::path::{Path, PathBuf};

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
};
use embedded_graphics_simulator::{BinaryColorTheme, OutputSettings, OutputSettingsBuilder, SimulatorDisplay};
use etch_common::{
    Bitmap, DisplaySink,
    colors::PAPER,
};
use log::{debug, info};
use thiserror::Error;

use crate::config::OUTPUT_SCALE;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("frame is {actual}, panel is {expected}")]
    Geometry { expected: SizeLabel, actual: SizeLabel },
    #[error("failed to write {}: {message}", path.display())]
    Png { path: PathBuf, message: String },
}

/// `WxH` rendering of a `Size` for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLabel(pub Size);

impl std::fmt::Display for SizeLabel {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}x{}", self.0.width, self.0.height)
    }
}

pub struct PngSink {
    path: PathBuf,
    size: Size,
    settings: OutputSettings,
    frames_written: usize,
}

impl PngSink {
    pub fn new(
        path: impl AsRef<Path>,
        size: Size,
    ) -> Self {
        let settings = OutputSettingsBuilder::new()
            .scale(OUTPUT_SCALE)
            .pixel_spacing(0)
            .theme(BinaryColorTheme::LcdWhite)
            .build();
        Self { path: path.as_ref().to_path_buf(), size, settings, frames_written: 0 }
    }

    pub fn path(&self) -> &Path { &self.path }

    /// Frames saved so far, including the blank frame from `init`.
    pub const fn frames_written(&self) -> usize { self.frames_written }

    fn save(
        &mut self,
        display: &SimulatorDisplay<BinaryColor>,
    ) -> Result<(), SinkError> {
        display
            .to_rgb_output_image(&self.settings)
            .save_png(&self.path)
            .map_err(|e| SinkError::Png { path: self.path.clone(), message: e.to_string() })?;
        self.frames_written += 1;
        Ok(())
    }
}

impl DisplaySink for PngSink {
    type Error = SinkError;

    fn geometry(&self) -> Size { self.size }

    fn init(&mut self) -> Result<(), Self::Error> {
        let mut display = SimulatorDisplay::<BinaryColor>::new(self.size);
        display.clear(PAPER).unwrap_or_else(|never| match never {});
        self.save(&display)?;
        debug!("cleared {}", self.path.display());
        Ok(())
    }

    fn display(
        &mut self,
        frame: Bitmap,
    ) -> Result<(), Self::Error> {
        if frame.size() != self.size {
            return Err(SinkError::Geometry { expected: SizeLabel(self.size), actual: SizeLabel(frame.size()) });
        }
        let mut display = SimulatorDisplay::<BinaryColor>::new(self.size);
        display.draw_iter(frame.pixels()).unwrap_or_else(|never| match never {});
        self.save(&display)?;
        info!("wrote frame to {}", self.path.display());
        Ok(())
    }

    fn cleanup(&mut self) -> Result<(), Self::Error> {
        debug!("{} frames written to {}", self.frames_written, self.path.display());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::fs;

    use etch_common::colors::INK;

    use super::*;

    /// Width and height from a PNG's IHDR chunk.
    fn png_dimensions(path: &Path) -> (u32, u32) {
        let bytes = fs::read(path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG", "not a PNG file");
        let width = u32::from_be_bytes(bytes[16..20].try_into().unwrap());
        let height = u32::from_be_bytes(bytes[20..24].try_into().unwrap());
        (width, height)
    }

    #[test_log::test]
    fn test_init_writes_blank_scaled_frame() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = PngSink::new(dir.path().join("panel.png"), Size::new(250, 122));
        sink.init().unwrap();
        assert_eq!(sink.frames_written(), 1);
        assert_eq!(png_dimensions(sink.path()), (500, 244));
    }

    #[test_log::test]
    fn test_display_writes_frame() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = PngSink::new(dir.path().join("panel.png"), Size::new(16, 8));
        let mut frame = Bitmap::new(sink.geometry()).unwrap();
        frame.set_pixel(Point::new(3, 3), INK);
        sink.display(frame).unwrap();
        assert_eq!(sink.frames_written(), 1);
        assert_eq!(png_dimensions(sink.path()), (32, 16));
        sink.cleanup().unwrap();
    }

    #[test_log::test]
    fn test_geometry_mismatch_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = PngSink::new(dir.path().join("panel.png"), Size::new(250, 122));
        let frame = Bitmap::new(Size::new(122, 250)).unwrap();
        let err = sink.display(frame).unwrap_err();
        assert_eq!(err.to_string(), "frame is 122x250, panel is 250x122");
        assert!(!sink.path().exists());
        assert_eq!(sink.frames_written(), 0);
    }

    #[test_log::test]
    fn test_unwritable_path_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = PngSink::new(dir.path().join("missing").join("panel.png"), Size::new(8, 8));
        assert!(matches!(sink.init(), Err(SinkError::Png { .. })));
    }
}
