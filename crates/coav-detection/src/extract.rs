use std::f64::consts::{FRAC_PI_2, PI};

use coav_core::{BoundingBox, Obstacle, PolarVector};
use log::warn;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{PolarHistParams, PolarHistogram};

/// Append one obstacle per histogram slice that is both close enough and
/// dense enough, in slice order (decreasing azimuth).
///
/// Slices that only saw dropouts keep the max-range sentinel and are never
/// reported, whatever the threshold.
///
/// The camera is assumed to look down the vehicle's forward axis, so the
/// leftmost slice sits at azimuth `(hfov + π) / 2`. Every obstacle spans the
/// full vertical field of view `vfov`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(hist, params, out), fields(slices = hist.len()))
)]
pub fn extract_obstacles(
    hist: &PolarHistogram,
    vfov: f64,
    params: &PolarHistParams,
    out: &mut Vec<Obstacle>,
) {
    let slice_pixels = hist.slice_pixel_count();
    if slice_pixels == 0 {
        warn!(
            "{} slices over {} columns and {} rows leave no pixels per slice; no obstacles reported",
            hist.len(),
            hist.width,
            hist.rows.len()
        );
        return;
    }

    let step = hist.fixed_step;
    let max_azimuth = (hist.hfov + PI) / 2.0;
    let top = (PI - vfov) / 2.0;
    let bottom = (PI + vfov) / 2.0;

    for (i, &range) in hist.ranges.iter().enumerate() {
        if range > params.threshold || range >= hist.max_range {
            continue;
        }
        if hist.density_ratio(i) < params.density {
            continue;
        }

        let azimuth = max_azimuth - i as f64 * step - step / 2.0;
        out.push(Obstacle {
            bounding_box: BoundingBox {
                tlc: PolarVector::new(range, azimuth + step / 2.0, top),
                brf: PolarVector::new(range, azimuth - step / 2.0, bottom),
            },
            center: PolarVector::new(range, azimuth, FRAC_PI_2),
        });
    }
}
