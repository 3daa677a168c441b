use crate::color::{rgb_to_hsv, ColorRange};
use ndarray::{Array2, ArrayView2};

pub const FOREGROUND: u8 = 255;
pub const BACKGROUND: u8 = 0;

// Builds the three per-channel range masks from an RGB frame in one
// pass. Each output pixel is 255 when the channel falls inside its
// inclusive bound and 0 otherwise.
pub fn channel_masks(
    rgb: ArrayView2<[u8; 3]>,
    range: &ColorRange,
    hue_mask: &mut Array2<u8>,
    sat_mask: &mut Array2<u8>,
    val_mask: &mut Array2<u8>,
) {
    for (pixel, (h_dst, (s_dst, v_dst))) in rgb.iter().zip(
        hue_mask
            .iter_mut()
            .zip(sat_mask.iter_mut().zip(val_mask.iter_mut())),
    ) {
        let (h, s, v) = rgb_to_hsv(pixel[0], pixel[1], pixel[2]);
        *h_dst = if range.hue_contains(h) { FOREGROUND } else { BACKGROUND };
        *s_dst = if range.sat_contains(s) { FOREGROUND } else { BACKGROUND };
        *v_dst = if range.val_contains(v) { FOREGROUND } else { BACKGROUND };
    }
}

// ANDs the three channel masks into the combined tracking mask.
pub fn combine(
    hue_mask: ArrayView2<u8>,
    sat_mask: ArrayView2<u8>,
    val_mask: ArrayView2<u8>,
    out: &mut Array2<u8>,
) {
    for (dst, ((&h, &s), &v)) in out
        .iter_mut()
        .zip(hue_mask.iter().zip(sat_mask.iter()).zip(val_mask.iter()))
    {
        *dst = h & s & v;
    }
}

// Re-binarizes a blurred mask so downstream stages see clean 0/255.
pub fn binarize(src: ArrayView2<u8>, cutoff: u8, out: &mut Array2<u8>) {
    for (dst, &px) in out.iter_mut().zip(src.iter()) {
        *dst = if px >= cutoff { FOREGROUND } else { BACKGROUND };
    }
}
