//! Top-down 24-bit BMP writer (internal).
//!
//! Output is a 14-byte file header, a 40-byte `BITMAPINFOHEADER`, then
//! `height` rows of BGR pixels padded to 4 bytes. No color table, no
//! compression. Height is stored negated so the first row is the top one.

mod encode;
mod header;

pub use header::{BmpHeader, HEADER_SIZE, row_stride};

pub(crate) use encode::{alloc_row_buffer, write_header, write_pixel_data};
