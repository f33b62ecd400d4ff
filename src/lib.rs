//! # zenshot
//!
//! Capture an RGB565 display framebuffer to a 24-bit BMP file.
//!
//! ## Streaming
//!
//! Pixels are read back one scanline at a time into a single row buffer,
//! expanded to BGR, padded to a 4-byte boundary, and appended to the output
//! sink. Memory use is one row (`((width * 3) + 3) & !3` bytes) regardless
//! of image height, so captures fit on targets that cannot hold a second
//! framebuffer.
//!
//! ## Output format
//!
//! - Windows BMP, `BITMAPINFOHEADER`, 24 bits per pixel, uncompressed
//! - Top-down rows (negative height), no color table, no alpha
//! - Channels rescaled linearly: `v * 255 / 31` for red and blue,
//!   `v * 255 / 63` for green, truncating
//!
//! ## Non-Goals
//!
//! - Decoding or displaying images
//! - Source formats other than RGB565
//! - Compression
//! - Storage lifecycle beyond the one file handle per capture
//!
//! ## Usage
//!
//! ```no_run
//! use zenshot::{FrameBuffer, StdFilesystem, save_screenshot};
//!
//! let mut fb = FrameBuffer::new(320, 240);
//! fb.fill(0xF800); // red
//!
//! let mut sd = StdFilesystem::rooted("/mnt/sd");
//! let out = save_screenshot("/screenshot.bmp", &fb, &mut sd)?;
//! println!("wrote {} bytes", out.bytes_written);
//! # Ok::<(), zenshot::ScreenshotError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod capture;
mod error;
mod limits;
mod pixel;
mod sink;
mod surface;

pub mod bmp;

// Re-exports
pub use capture::{ScreenshotOutput, ScreenshotRequest, encode_screenshot, save_screenshot};
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::{ErrorKind, ScreenshotError};
pub use limits::Limits;
pub use pixel::{ColorDepth, expand_rgb565, pack_rgb565};
#[cfg(feature = "rgb")]
pub use pixel::{rgb565_to_bgr8, rgb565_to_rgb8};
pub use sink::{BusConfig, Filesystem, ScopedFile, Sink};
#[cfg(feature = "std")]
pub use sink::{IoSink, StdFilesystem};
pub use surface::{FrameBuffer, Surface};
