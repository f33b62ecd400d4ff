//! Streaming BMP encoder: one reusable row buffer, rows appended as they
//! are converted.

use alloc::vec::Vec;
use enough::Stop;

use super::header::{BmpHeader, HEADER_SIZE};
use crate::error::ScreenshotError;
use crate::pixel::expand_rgb565;
use crate::sink::Sink;
use crate::surface::Surface;

/// Allocate the zeroed row buffer without aborting on OOM.
pub(crate) fn alloc_row_buffer(row_stride: usize) -> Result<Vec<u8>, ScreenshotError> {
    let mut row = Vec::new();
    row.try_reserve_exact(row_stride)
        .map_err(|_| ScreenshotError::PixelBufferAllocFailed { bytes: row_stride })?;
    row.resize(row_stride, 0);
    Ok(row)
}

/// Append the 54-byte header in one call.
pub(crate) fn write_header(
    sink: &mut dyn Sink,
    header: &BmpHeader,
) -> Result<usize, ScreenshotError> {
    let bytes = header.to_bytes();
    let written = sink.append(&bytes);
    if written != HEADER_SIZE {
        return Err(ScreenshotError::WriteHeaderFailed {
            written,
            expected: HEADER_SIZE,
        });
    }
    Ok(written)
}

/// Convert scanline `y` into `row` (B, G, R per pixel, then zero padding).
fn encode_row(surface: &dyn Surface, y: i32, width: usize, row: &mut [u8]) {
    let (pixels, padding) = row.split_at_mut(width * 3);
    for (x, out) in pixels.chunks_exact_mut(3).enumerate() {
        out.copy_from_slice(&expand_rgb565(surface.read_pixel(x as i32, y)));
    }
    padding.fill(0);
}

/// Stream every row top to bottom through `row`, returning bytes written.
///
/// `row` must be exactly `header.row_stride` long. Stops at the first
/// short write; nothing is appended after it.
pub(crate) fn write_pixel_data(
    surface: &dyn Surface,
    sink: &mut dyn Sink,
    header: &BmpHeader,
    row: &mut [u8],
    stop: &dyn Stop,
) -> Result<usize, ScreenshotError> {
    debug_assert_eq!(row.len(), header.row_stride);
    let w = header.width as usize;
    let mut total = 0usize;

    for y in 0..header.height {
        if y % 16 == 0 {
            stop.check()?;
        }
        encode_row(surface, y as i32, w, row);
        let written = sink.append(row);
        if written != row.len() {
            return Err(ScreenshotError::WritePixelDataFailed {
                row: y,
                written,
                expected: row.len(),
            });
        }
        total += written;
    }

    Ok(total)
}
