//! Framebuffer color depths and RGB565 expansion.

/// Color depth reported by a display surface.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorDepth {
    /// 8-bit packed, 3 bits red, 3 green, 2 blue.
    Rgb332,
    /// 16-bit packed, 5 bits red, 6 green, 5 blue. The only capturable depth.
    Rgb565,
    /// 18-bit, 6 bits per channel (panel-native on some controllers).
    Rgb666,
    /// 24-bit, 8 bits per channel.
    Rgb888,
}

impl ColorDepth {
    /// Bits per pixel.
    pub fn bits(&self) -> u8 {
        match self {
            Self::Rgb332 => 8,
            Self::Rgb565 => 16,
            Self::Rgb666 => 18,
            Self::Rgb888 => 24,
        }
    }

    /// Map a raw bit count, as display drivers usually report it.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            8 => Some(Self::Rgb332),
            16 => Some(Self::Rgb565),
            18 => Some(Self::Rgb666),
            24 => Some(Self::Rgb888),
            _ => None,
        }
    }
}

/// Expand a packed RGB565 value to 8-bit channels in BMP (B, G, R) order.
///
/// Each channel is rescaled linearly with truncating division
/// (`v * 255 / max`), not by bit replication. The two differ for some
/// inputs, and captured files depend on this exact mapping.
#[inline]
pub fn expand_rgb565(c: u16) -> [u8; 3] {
    let c = u32::from(c);
    let b = (c & 0x1F) * 255 / 31;
    let g = ((c >> 5) & 0x3F) * 255 / 63;
    let r = ((c >> 11) & 0x1F) * 255 / 31;
    [b as u8, g as u8, r as u8]
}

/// Pack 8-bit channels into RGB565 by dropping low bits.
#[inline]
pub fn pack_rgb565(r: u8, g: u8, b: u8) -> u16 {
    (u16::from(r >> 3) << 11) | (u16::from(g >> 2) << 5) | u16::from(b >> 3)
}

/// Expand to a typed [`rgb::Bgr<u8>`] (BMP byte order).
#[cfg(feature = "rgb")]
#[inline]
pub fn rgb565_to_bgr8(c: u16) -> rgb::Bgr<u8> {
    let [b, g, r] = expand_rgb565(c);
    rgb::Bgr { b, g, r }
}

/// Expand to a typed [`rgb::Rgb<u8>`].
#[cfg(feature = "rgb")]
#[inline]
pub fn rgb565_to_rgb8(c: u16) -> rgb::Rgb<u8> {
    let [b, g, r] = expand_rgb565(c);
    rgb::Rgb { r, g, b }
}
