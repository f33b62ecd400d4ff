use crate::bmp::BmpHeader;
use crate::error::ScreenshotError;

/// Resource limits for a capture.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for any one allocation: the row buffer, and for
    /// in-memory captures the whole output file.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check surface geometry before anything is allocated.
    pub(crate) fn check_surface(&self, width: u32, height: u32) -> Result<(), ScreenshotError> {
        let over = |what: &str, value: u64, max: Option<u64>| match max {
            Some(max) if value > max => Err(ScreenshotError::LimitExceeded(alloc::format!(
                "{what} {value} exceeds limit {max}"
            ))),
            _ => Ok(()),
        };
        over("width", u64::from(width), self.max_width)?;
        over("height", u64::from(height), self.max_height)?;
        over(
            "pixel count",
            u64::from(width) * u64::from(height),
            self.max_pixels,
        )
    }

    /// The single reused scanline buffer.
    pub(crate) fn check_row_buffer(&self, header: &BmpHeader) -> Result<(), ScreenshotError> {
        self.check_alloc("row buffer", header.row_stride as u64)
    }

    /// The full file, when a capture is materialized in memory.
    pub(crate) fn check_output(&self, header: &BmpHeader) -> Result<(), ScreenshotError> {
        self.check_alloc("output buffer", u64::from(header.file_size()))
    }

    fn check_alloc(&self, what: &str, bytes: u64) -> Result<(), ScreenshotError> {
        match self.max_memory_bytes {
            Some(max) if bytes > max => Err(ScreenshotError::LimitExceeded(alloc::format!(
                "{what} {bytes} bytes exceeds memory limit {max}"
            ))),
            _ => Ok(()),
        }
    }
}
