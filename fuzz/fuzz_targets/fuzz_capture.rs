#![no_main]
use libfuzzer_sys::fuzz_target;
use zenshot::*;

fuzz_target!(|data: &[u8]| {
    // First two bytes pick the geometry, the rest fills the framebuffer.
    let [w, h, rest @ ..] = data else {
        return;
    };
    let (w, h) = (usize::from(*w % 64) + 1, usize::from(*h % 64) + 1);
    let mut pixels: Vec<u16> = rest
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();
    pixels.resize(w * h, 0);
    let fb = FrameBuffer::from_pixels(w, h, pixels).unwrap();

    let bmp = encode_screenshot(&fb).unwrap();
    let stride = ((w * 3) + 3) & !3;
    assert_eq!(bmp.len(), 54 + stride * h);

    let header = bmp::BmpHeader::parse(&bmp).expect("own header must parse");
    assert_eq!(header.file_size() as usize, bmp.len());
    assert_eq!(encode_screenshot(&fb).unwrap(), bmp, "capture not deterministic");
});
