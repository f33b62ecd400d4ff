//! Test corpus: captures of various patterns and sizes, checked against an
//! independent reading of the output bytes.

use enough::Unstoppable;
use zenshot::*;

fn noise(w: usize, h: usize) -> FrameBuffer {
    let mut state: u32 = 0xDEAD_BEEF;
    let pixels = (0..w * h)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u16
        })
        .collect();
    FrameBuffer::from_pixels(w, h, pixels).unwrap()
}

fn checkerboard(w: usize, h: usize) -> FrameBuffer {
    let mut fb = FrameBuffer::new(w, h);
    for y in 0..h {
        for x in 0..w {
            fb.set_pixel(x, y, if (x + y) % 2 == 0 { 0xFFFF } else { 0x0000 });
        }
    }
    fb
}

/// Read pixel (x, y) back from a captured file.
fn bgr_at(bmp: &[u8], stride: usize, x: usize, y: usize) -> [u8; 3] {
    let off = 54 + y * stride + x * 3;
    [bmp[off], bmp[off + 1], bmp[off + 2]]
}

fn check_capture(fb: &FrameBuffer) {
    let w = Surface::width(fb) as usize;
    let h = Surface::height(fb) as usize;
    let stride = ((w * 3) + 3) & !3;

    let bmp = encode_screenshot(fb).unwrap();
    assert_eq!(bmp.len(), 54 + stride * h, "{w}x{h}");

    let header = bmp::BmpHeader::parse(&bmp).unwrap();
    assert_eq!((header.width as usize, header.height as usize), (w, h));
    assert_eq!(header.row_stride, stride);

    for y in 0..h {
        for x in 0..w {
            let c = fb.get_pixel(x, y).unwrap();
            let expected = [
                ((c & 0x1F) as u32 * 255 / 31) as u8,
                (((c >> 5) & 0x3F) as u32 * 255 / 63) as u8,
                (((c >> 11) & 0x1F) as u32 * 255 / 31) as u8,
            ];
            assert_eq!(bgr_at(&bmp, stride, x, y), expected, "{w}x{h} at ({x},{y})");
        }
        let pad = &bmp[54 + y * stride + w * 3..54 + (y + 1) * stride];
        assert!(pad.iter().all(|&b| b == 0), "{w}x{h} row {y} padding");
    }
}

#[test]
fn noise_all_padding_residues() {
    // Widths 1..=8 cover padding of 1, 2, 3 and 0 bytes twice.
    for w in 1..=8 {
        for h in [1, 2, 5] {
            check_capture(&noise(w, h));
        }
    }
}

#[test]
fn checkerboard_odd_sizes() {
    for (w, h) in [(1, 1), (3, 7), (17, 3), (31, 31)] {
        check_capture(&checkerboard(w, h));
    }
}

#[test]
fn display_sized_capture() {
    let fb = noise(320, 240);
    let bmp = encode_screenshot(&fb).unwrap();
    assert_eq!(bmp.len(), 54 + 960 * 240);
    assert_eq!(
        u32::from_le_bytes(bmp[2..6].try_into().unwrap()) as usize,
        bmp.len()
    );
    assert_eq!(
        u32::from_le_bytes(bmp[34..38].try_into().unwrap()),
        960 * 240
    );
}

#[test]
fn write_to_matches_encode() {
    let fb = noise(11, 4);
    let mut sink = Vec::new();
    let out = ScreenshotRequest::new()
        .write_to(&fb, &mut sink, Unstoppable)
        .unwrap();
    assert_eq!(out.bytes_written, sink.len());
    assert_eq!(sink, encode_screenshot(&fb).unwrap());
}

#[cfg(feature = "std")]
#[test]
fn io_sink_matches_encode() {
    let fb = checkerboard(6, 6);
    let mut sink = IoSink::new(std::io::Cursor::new(Vec::new()));
    ScreenshotRequest::new()
        .write_to(&fb, &mut sink, Unstoppable)
        .unwrap();
    assert!(sink.take_error().is_none());
    assert_eq!(
        sink.into_inner().into_inner(),
        encode_screenshot(&fb).unwrap()
    );
}

#[test]
fn every_rgb565_value_expands_like_the_formula() {
    for c in 0..=u16::MAX {
        let [b, g, r] = expand_rgb565(c);
        assert_eq!(b as u32, (c as u32 & 0x1F) * 255 / 31);
        assert_eq!(g as u32, ((c as u32 >> 5) & 0x3F) * 255 / 63);
        assert_eq!(r as u32, ((c as u32 >> 11) & 0x1F) * 255 / 31);
    }
}
