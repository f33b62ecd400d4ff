//! Capture entry points: validate, allocate, open, header, rows.

use alloc::vec::Vec;
use enough::{Stop, Unstoppable};

use crate::bmp::{self, BmpHeader};
use crate::error::ScreenshotError;
use crate::limits::Limits;
use crate::pixel::ColorDepth;
use crate::sink::{BusConfig, Filesystem, ScopedFile, Sink};
use crate::surface::Surface;

/// Result of a successful capture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenshotOutput {
    pub width: u32,
    pub height: u32,
    /// Header plus pixel data; equals the declared BMP file size.
    pub bytes_written: usize,
}

/// Builder for a screenshot capture.
///
/// ```no_run
/// use zenshot::{FrameBuffer, ScreenshotRequest, StdFilesystem, Unstoppable};
///
/// let fb = FrameBuffer::new(320, 240);
/// let out = ScreenshotRequest::new()
///     .save("/shot.bmp", &fb, &mut StdFilesystem::new(), Unstoppable)?;
/// assert_eq!(out.bytes_written, 54 + 960 * 240);
/// # Ok::<(), zenshot::ScreenshotError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScreenshotRequest<'a> {
    limits: Option<&'a Limits>,
    bus: Option<BusConfig>,
}

impl<'a> ScreenshotRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Storage-bus parameters handed to [`Filesystem::open_write`].
    pub fn with_bus(mut self, bus: BusConfig) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Capture `surface` into a new file at `path`.
    ///
    /// No I/O happens until every precondition passes. The file is closed
    /// before this returns, on success or failure. On failure a partial
    /// file may remain; it is not removed.
    pub fn save<S, F>(
        &self,
        path: impl AsRef<str>,
        surface: &S,
        fs: &mut F,
        stop: impl Stop,
    ) -> Result<ScreenshotOutput, ScreenshotError>
    where
        S: Surface,
        F: Filesystem + ?Sized,
    {
        let header = self.prepare(surface)?;
        let mut row = bmp::alloc_row_buffer(header.row_stride)?;
        let mut file = ScopedFile::open(fs, path.as_ref(), self.bus)
            .ok_or(ScreenshotError::FileOpenFailed)?;
        stream(surface, file.get(), &header, &mut row, &stop)
    }

    /// Capture `surface` into an already-open sink.
    ///
    /// The sink is not closed; the caller owns it.
    pub fn write_to<S, W>(
        &self,
        surface: &S,
        sink: &mut W,
        stop: impl Stop,
    ) -> Result<ScreenshotOutput, ScreenshotError>
    where
        S: Surface,
        W: Sink,
    {
        let header = self.prepare(surface)?;
        let mut row = bmp::alloc_row_buffer(header.row_stride)?;
        stream(surface, sink, &header, &mut row, &stop)
    }

    /// Capture into a fresh in-memory BMP file.
    pub fn encode<S: Surface>(
        &self,
        surface: &S,
        stop: impl Stop,
    ) -> Result<Vec<u8>, ScreenshotError> {
        let header = self.prepare(surface)?;
        if let Some(limits) = self.limits {
            limits.check_output(&header)?;
        }
        let file_size = header.file_size() as usize;
        let mut out = Vec::new();
        out.try_reserve_exact(file_size)
            .map_err(|_| ScreenshotError::OutputBufferAllocFailed { bytes: file_size })?;
        let mut row = bmp::alloc_row_buffer(header.row_stride)?;
        stream(surface, &mut out, &header, &mut row, &stop)?;
        Ok(out)
    }

    /// Precondition checks and geometry. Performs no I/O.
    fn prepare<S: Surface>(&self, surface: &S) -> Result<BmpHeader, ScreenshotError> {
        let (width, height) = validate(surface)?;
        if let Some(limits) = self.limits {
            limits.check_surface(width, height)?;
        }
        let header = BmpHeader::new(width, height)?;
        if let Some(limits) = self.limits {
            limits.check_row_buffer(&header)?;
        }
        Ok(header)
    }
}

/// Capture `surface` to `path` with default settings.
///
/// Accepts `&str`, `String` and anything else that is `AsRef<str>`.
pub fn save_screenshot<S, F>(
    path: impl AsRef<str>,
    surface: &S,
    fs: &mut F,
) -> Result<ScreenshotOutput, ScreenshotError>
where
    S: Surface,
    F: Filesystem + ?Sized,
{
    ScreenshotRequest::new().save(path, surface, fs, Unstoppable)
}

/// Capture `surface` to an in-memory BMP file with default settings.
pub fn encode_screenshot<S: Surface>(surface: &S) -> Result<Vec<u8>, ScreenshotError> {
    ScreenshotRequest::new().encode(surface, Unstoppable)
}

fn validate<S: Surface>(surface: &S) -> Result<(u32, u32), ScreenshotError> {
    let depth = surface.color_depth();
    if depth != ColorDepth::Rgb565 {
        return Err(ScreenshotError::UnsupportedColorDepth { bits: depth.bits() });
    }
    let (w, h) = (surface.width(), surface.height());
    if w <= 0 || h <= 0 {
        return Err(ScreenshotError::InvalidDimensions {
            width: w,
            height: h,
        });
    }
    if surface.is_readable() == Some(false) {
        return Err(ScreenshotError::DisplayNotReadable);
    }
    Ok((w as u32, h as u32))
}

fn stream<S: Surface, W: Sink>(
    surface: &S,
    sink: &mut W,
    header: &BmpHeader,
    row: &mut [u8],
    stop: &dyn Stop,
) -> Result<ScreenshotOutput, ScreenshotError> {
    stop.check()?;
    let head = bmp::write_header(sink, header)?;
    let pixels = bmp::write_pixel_data(surface, sink, header, row, stop)?;
    if !sink.flush() {
        return Err(ScreenshotError::FlushFailed);
    }
    Ok(ScreenshotOutput {
        width: header.width,
        height: header.height,
        bytes_written: head + pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::surface::FrameBuffer;
    use alloc::vec;

    struct Sprite {
        depth: ColorDepth,
        width: i32,
        height: i32,
    }

    impl Surface for Sprite {
        fn width(&self) -> i32 {
            self.width
        }
        fn height(&self) -> i32 {
            self.height
        }
        fn color_depth(&self) -> ColorDepth {
            self.depth
        }
        fn read_pixel(&self, _x: i32, _y: i32) -> u16 {
            0xFFFF
        }
    }

    #[test]
    fn rejects_wrong_depth_first() {
        let s = Sprite {
            depth: ColorDepth::Rgb888,
            width: 0,
            height: 0,
        };
        let err = encode_screenshot(&s).unwrap_err();
        assert!(matches!(
            err,
            ScreenshotError::UnsupportedColorDepth { bits: 24 }
        ));
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        for (w, h) in [(0, 1), (1, 0), (-4, 4)] {
            let s = Sprite {
                depth: ColorDepth::Rgb565,
                width: w,
                height: h,
            };
            assert_eq!(
                encode_screenshot(&s).unwrap_err().kind(),
                ErrorKind::InvalidDimensions
            );
        }
    }

    #[test]
    fn limits_apply_before_allocation() {
        let fb = FrameBuffer::new(100, 1);
        let limits = Limits {
            max_memory_bytes: Some(100),
            ..Default::default()
        };
        let err = ScreenshotRequest::new()
            .with_limits(&limits)
            .encode(&fb, Unstoppable)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LimitExceeded);
    }

    #[test]
    fn encode_bounds_the_whole_file() {
        // 960-byte rows fit, the 230 454-byte file does not.
        let fb = FrameBuffer::new(320, 240);
        let limits = Limits {
            max_memory_bytes: Some(1024),
            ..Default::default()
        };
        let request = ScreenshotRequest::new().with_limits(&limits);
        let err = request.encode(&fb, Unstoppable).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LimitExceeded);

        let mut out = Vec::new();
        let res = request.write_to(&fb, &mut out, Unstoppable).unwrap();
        assert_eq!(res.bytes_written, 230_454);
    }

    #[test]
    fn failed_flush_fails_the_capture() {
        struct Buffered {
            pending: Vec<u8>,
        }
        impl Sink for Buffered {
            fn append(&mut self, bytes: &[u8]) -> usize {
                self.pending.extend_from_slice(bytes);
                bytes.len()
            }
            fn flush(&mut self) -> bool {
                false
            }
        }

        let fb = FrameBuffer::new(2, 2);
        let mut sink = Buffered {
            pending: Vec::new(),
        };
        let err = ScreenshotRequest::new()
            .write_to(&fb, &mut sink, Unstoppable)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FlushFailed);
        assert_eq!(sink.pending.len(), 54 + 8 * 2);
    }

    #[test]
    fn write_to_reports_total() {
        let fb = FrameBuffer::from_pixels(2, 1, vec![0x001F, 0xF800]).unwrap();
        let mut out = Vec::new();
        let res = ScreenshotRequest::new()
            .write_to(&fb, &mut out, Unstoppable)
            .unwrap();
        assert_eq!(res.bytes_written, 62);
        assert_eq!(out.len(), 62);
        assert_eq!(
            &out[54..],
            &[0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x00]
        );
    }
}
