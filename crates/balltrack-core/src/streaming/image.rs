use image::codecs::jpeg::JpegEncoder;
use image::{GrayImage, ImageBuffer, Rgb, RgbImage};
use ndarray::ArrayView2;

const JPEG_QUALITY: u8 = 60;

// Convert a grayscale ndarray to JPEG bytes
pub fn gray_to_jpeg(arr: ArrayView2<u8>) -> Option<Vec<u8>> {
    let (height, width) = arr.dim();
    let img: GrayImage = ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
        image::Luma([arr[[y as usize, x as usize]]])
    });
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
        .encode_image(&img)
        .ok()?;
    Some(buf)
}

// Convert an RGB ndarray to JPEG bytes
pub fn rgb_to_jpeg(arr: ArrayView2<[u8; 3]>) -> Option<Vec<u8>> {
    let (height, width) = arr.dim();
    let img: RgbImage = ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
        Rgb(arr[[y as usize, x as usize]])
    });
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
        .encode_image(&img)
        .ok()?;
    Some(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn encodes_both_plane_kinds() {
        let gray = Array2::from_elem((8, 8), 128u8);
        let jpeg = gray_to_jpeg(gray.view()).unwrap();
        // JPEG SOI marker.
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);

        let rgb = Array2::from_elem((8, 8), [200u8, 10, 10]);
        let jpeg = rgb_to_jpeg(rgb.view()).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }
}
