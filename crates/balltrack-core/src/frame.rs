use ndarray::Array2;
use thiserror::Error;

// Image planes are (height, width) ndarrays, one element per pixel.
pub type ColorFrame = Array2<[u8; 3]>;
pub type DepthFrame = Array2<u16>;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("buffer size doesn't match: expected {expected} bytes, got {actual}")]
    InvalidDimensions { expected: usize, actual: usize },

    #[error("frame dimensions are zero")]
    ZeroDimensions,
}

// Validates buffer size against dimensions and packs an interleaved RGB
// byte buffer into a color frame.
pub fn color_from_raw(data: &[u8], width: u32, height: u32) -> Result<ColorFrame, FrameError> {
    if width == 0 || height == 0 {
        return Err(FrameError::ZeroDimensions);
    }

    let expected = width as usize * height as usize * 3;
    if data.len() != expected {
        return Err(FrameError::InvalidDimensions {
            expected,
            actual: data.len(),
        });
    }

    let pixels: Vec<[u8; 3]> = data
        .chunks_exact(3)
        .map(|px| [px[0], px[1], px[2]])
        .collect();
    Array2::from_shape_vec((height as usize, width as usize), pixels).map_err(|_| {
        FrameError::InvalidDimensions {
            expected,
            actual: data.len(),
        }
    })
}

// 11-bit raw depth to the 8-bit display-normalized form.
pub fn depth_display(depth: &DepthFrame) -> Array2<u8> {
    depth.map(|&raw| (raw >> 3).min(255) as u8)
}

// Expands a gray plane to RGB so annotations can be drawn over it.
pub fn gray_to_rgb(gray: &Array2<u8>) -> ColorFrame {
    gray.map(|&g| [g, g, g])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_interleaved_rgb() {
        let data = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        let frame = color_from_raw(&data, 2, 2).unwrap();
        assert_eq!(frame.dim(), (2, 2));
        assert_eq!(frame[(0, 0)], [1, 2, 3]);
        assert_eq!(frame[(1, 1)], [10, 11, 12]);
    }

    #[test]
    fn rejects_wrong_buffer_size() {
        let err = color_from_raw(&[0u8; 11], 2, 2).unwrap_err();
        assert!(matches!(
            err,
            FrameError::InvalidDimensions {
                expected: 12,
                actual: 11
            }
        ));
    }

    #[test]
    fn rejects_zero_dimensions() {
        let err = color_from_raw(&[], 0, 4).unwrap_err();
        assert!(matches!(err, FrameError::ZeroDimensions));
    }

    #[test]
    fn depth_display_scales_11_bits_down() {
        let mut depth: DepthFrame = Array2::zeros((1, 3));
        depth[(0, 1)] = 800;
        depth[(0, 2)] = 2047;
        let display = depth_display(&depth);
        assert_eq!(display[(0, 0)], 0);
        assert_eq!(display[(0, 1)], 100);
        assert_eq!(display[(0, 2)], 255);
    }

    #[test]
    fn gray_expands_to_rgb() {
        let gray = Array2::from_elem((2, 2), 7u8);
        let rgb = gray_to_rgb(&gray);
        assert_eq!(rgb[(1, 0)], [7, 7, 7]);
    }
}
