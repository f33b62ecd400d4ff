//! Readable display surfaces.

use alloc::vec;
use alloc::vec::Vec;

use crate::pixel::ColorDepth;

/// A 2D pixel source that can be read back one pixel at a time.
///
/// The surface must not change while a capture is running. Dimensions are
/// signed because display drivers report them that way; a capture rejects
/// anything that is not strictly positive.
pub trait Surface {
    fn width(&self) -> i32;

    fn height(&self) -> i32;

    fn color_depth(&self) -> ColorDepth;

    /// Read the packed RGB565 value at `(x, y)`.
    ///
    /// Only called with `0 <= x < width()` and `0 <= y < height()`.
    fn read_pixel(&self, x: i32, y: i32) -> u16;

    /// Whether the panel supports pixel read-back.
    ///
    /// `None` means the surface exposes no such capability flag (an
    /// off-screen sprite, for instance) and is assumed readable.
    fn is_readable(&self) -> Option<bool> {
        None
    }
}

impl<S: Surface + ?Sized> Surface for &S {
    fn width(&self) -> i32 {
        (**self).width()
    }

    fn height(&self) -> i32 {
        (**self).height()
    }

    fn color_depth(&self) -> ColorDepth {
        (**self).color_depth()
    }

    fn read_pixel(&self, x: i32, y: i32) -> u16 {
        (**self).read_pixel(x, y)
    }

    fn is_readable(&self) -> Option<bool> {
        (**self).is_readable()
    }
}

/// In-memory RGB565 framebuffer, row-major, top row first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u16>,
    readable: Option<bool>,
}

impl FrameBuffer {
    /// A black framebuffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
            readable: None,
        }
    }

    /// Wrap existing pixels. Returns `None` if `pixels.len() != width * height`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u16>) -> Option<Self> {
        if width.checked_mul(height)? != pixels.len() {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
            readable: None,
        })
    }

    /// Report a read-back capability flag, as a physical panel would.
    pub fn with_readable(mut self, readable: bool) -> Self {
        self.readable = Some(readable);
        self
    }

    /// Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u16) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<u16> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn fill(&mut self, color: u16) {
        self.pixels.fill(color);
    }

    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }
}

impl Surface for FrameBuffer {
    fn width(&self) -> i32 {
        i32::try_from(self.width).unwrap_or(i32::MAX)
    }

    fn height(&self) -> i32 {
        i32::try_from(self.height).unwrap_or(i32::MAX)
    }

    fn color_depth(&self) -> ColorDepth {
        ColorDepth::Rgb565
    }

    fn read_pixel(&self, x: i32, y: i32) -> u16 {
        self.pixels[y as usize * self.width + x as usize]
    }

    fn is_readable(&self) -> Option<bool> {
        self.readable
    }
}
