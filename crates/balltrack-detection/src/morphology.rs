use ndarray::{Array2, ArrayView2};

// Square-kernel morphology over 8-bit masks. A radius of 2 matches the
// 5x5 kernels the pipeline uses. Borders replicate the edge pixel.

pub fn dilate(src: ArrayView2<u8>, radius: usize, dst: &mut Array2<u8>) {
    window_op(src, radius, dst, |acc, px| acc.max(px));
}

pub fn erode(src: ArrayView2<u8>, radius: usize, dst: &mut Array2<u8>) {
    window_op(src, radius, dst, |acc, px| acc.min(px));
}

// Morphological closing: dilation followed by erosion. `scratch` holds
// the intermediate dilation and must match the source dimensions.
pub fn close(
    src: ArrayView2<u8>,
    radius: usize,
    scratch: &mut Array2<u8>,
    dst: &mut Array2<u8>,
) {
    dilate(src, radius, scratch);
    erode(scratch.view(), radius, dst);
}

fn window_op(
    src: ArrayView2<u8>,
    radius: usize,
    dst: &mut Array2<u8>,
    fold: impl Fn(u8, u8) -> u8,
) {
    let (height, width) = src.dim();
    let r = radius as i32;

    for y in 0..height {
        for x in 0..width {
            let mut acc = src[(y, x)];
            for dy in -r..=r {
                for dx in -r..=r {
                    let ny = (y as i32 + dy).clamp(0, height as i32 - 1) as usize;
                    let nx = (x as i32 + dx).clamp(0, width as i32 - 1) as usize;
                    acc = fold(acc, src[(ny, nx)]);
                }
            }
            dst[(y, x)] = acc;
        }
    }
}

// 5x5 Gaussian smoothing with the binomial [1 4 6 4 1]/16 kernel,
// applied separably. `scratch` holds the horizontal pass.
pub fn gaussian_blur_5(src: ArrayView2<u8>, scratch: &mut Array2<u16>, dst: &mut Array2<u8>) {
    const WEIGHTS: [u32; 5] = [1, 4, 6, 4, 1];
    let (height, width) = src.dim();

    for y in 0..height {
        for x in 0..width {
            let mut sum: u32 = 0;
            for (i, &w) in WEIGHTS.iter().enumerate() {
                let nx = (x as i32 + i as i32 - 2).clamp(0, width as i32 - 1) as usize;
                sum += w * src[(y, nx)] as u32;
            }
            scratch[(y, x)] = sum as u16;
        }
    }

    for y in 0..height {
        for x in 0..width {
            let mut sum: u32 = 0;
            for (i, &w) in WEIGHTS.iter().enumerate() {
                let ny = (y as i32 + i as i32 - 2).clamp(0, height as i32 - 1) as usize;
                sum += w * scratch[(ny, x)] as u32;
            }
            dst[(y, x)] = (sum / 256) as u8;
        }
    }
}
