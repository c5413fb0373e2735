//! Binary PGM (`P5`) image output
//!
//! Header `P5\n<width> <height>\n255\n`, then one byte per pixel in
//! row-major order.
//!
//! Author: Moroya Sakamoto

use crate::io::IoError;
use crate::render::Image;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Maximum sample value written in the header
pub const MAX_VALUE: u8 = 255;

/// Encode an image to any writer
pub fn encode_ppm<W: Write>(image: &Image, mut w: W) -> std::io::Result<()> {
    write!(w, "P5\n{} {}\n{}\n", image.width(), image.height(), MAX_VALUE)?;
    w.write_all(image.pixels())?;
    w.flush()
}

/// Write an image to a file
pub fn write_ppm(path: impl AsRef<Path>, image: &Image) -> Result<(), IoError> {
    let file = std::fs::File::create(path)?;
    encode_ppm(image, BufWriter::new(file))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_header_and_body() {
        let image = Image::from_pixels(2, vec![255, 0, 0, 255]);
        let mut bytes = Vec::new();
        encode_ppm(&image, &mut bytes).unwrap();

        assert_eq!(&bytes[..11], b"P5\n2 2\n255\n");
        assert_eq!(&bytes[11..], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_encode_empty() {
        let image = Image::from_pixels(0, vec![]);
        let mut bytes = Vec::new();
        encode_ppm(&image, &mut bytes).unwrap();
        assert_eq!(bytes, b"P5\n0 0\n255\n");
    }
}
