use rayon::prelude::*;

use crate::canvas::Canvas;
use crate::geom::Region;

/// Squared color distance between two packed `0xRRGGBB` colors.
///
/// Channel differences are truncated to i8 before squaring, so a difference
/// of 255 wraps to 1 rather than scoring 255^2. The narrow signed
/// subtraction is deliberate: a cheap approximation, not a true euclidean
/// delta. Callers relying on exact scores must keep the wrap behavior.
#[inline]
pub fn color_dist(a: u32, b: u32) -> u32 {
    let rd = ((a >> 16) as u8).wrapping_sub((b >> 16) as u8) as i8 as i32;
    let gd = ((a >> 8) as u8).wrapping_sub((b >> 8) as u8) as i8 as i32;
    let bd = (a as u8).wrapping_sub(b as u8) as i8 as i32;
    (rd * rd + gd * gd + bd * bd) as u32
}

/// Cumulative `color_dist` over a region, sampling every `step`-th pixel on
/// both axes. `step` must be >= 1; a non-empty region always contributes at
/// least one sample. Read-only over both canvases.
pub fn region_dist(a: &Canvas, b: &Canvas, region: Region, step: u32) -> u64 {
    profiling::scope!("region_dist");
    debug_assert!(step >= 1);
    debug_assert_eq!(a.width(), b.width());
    debug_assert_eq!(a.height(), b.height());

    let mut sum = 0u64;
    let mut y = region.y;
    while y < region.y + region.h {
        let mut x = region.x;
        while x < region.x + region.w {
            sum += color_dist(a.pixel(x, y), b.pixel(x, y)) as u64;
            x += step;
        }
        y += step;
    }
    sum
}

/// Whole-image distance, one rayon task per row band. Used only for the
/// final report; the hill-climb loop itself scores bounded regions.
pub fn total_dist(a: &Canvas, b: &Canvas) -> u64 {
    profiling::scope!("total_dist");
    debug_assert_eq!(a.width(), b.width());
    debug_assert_eq!(a.height(), b.height());

    let width = a.width();
    (0..a.height())
        .into_par_iter()
        .with_min_len(64)
        .map(|y| {
            let mut sum = 0u64;
            for x in 0..width {
                sum += color_dist(a.pixel(x, y), b.pixel(x, y)) as u64;
            }
            sum
        })
        .sum()
}
