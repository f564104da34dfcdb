use crate::color::{rgb_to_hsl, Rgb};

use super::distinct;

const HUE_BUCKETS: usize = 36;

#[derive(Debug, Clone, Copy)]
struct Bucket {
    population: usize,
    /// Most saturated member; first seen wins ties.
    representative: Rgb,
    saturation: f32,
}

/// Per-bucket population and most saturated member, indexed by bucket.
fn hue_buckets(samples: &[Rgb]) -> Vec<Option<Bucket>> {
    let mut buckets: Vec<Option<Bucket>> = vec![None; HUE_BUCKETS];
    for &color in samples {
        let hsl = rgb_to_hsl(color);
        let slot = &mut buckets[hsl.hue_bucket()];
        match slot {
            Some(bucket) => {
                bucket.population += 1;
                if hsl.s > bucket.saturation {
                    bucket.representative = color;
                    bucket.saturation = hsl.s;
                }
            }
            None => {
                *slot = Some(Bucket {
                    population: 1,
                    representative: color,
                    saturation: hsl.s,
                })
            }
        }
    }
    buckets
}

/// Most saturated member of each of the `k` most populated hue buckets.
pub(super) fn hue_clusters(samples: &[Rgb], k: usize) -> Vec<Rgb> {
    let mut populated: Vec<(usize, Bucket)> = hue_buckets(samples)
        .into_iter()
        .enumerate()
        .filter_map(|(i, b)| b.map(|b| (i, b)))
        .collect();
    populated.sort_by(|a, b| b.1.population.cmp(&a.1.population).then(a.0.cmp(&b.0)));
    populated
        .into_iter()
        .take(k)
        .map(|(_, b)| b.representative)
        .collect()
}

/// Representatives spread evenly over the populated hue buckets, topped up
/// with the most saturated remaining colors.
pub(super) fn varied(samples: &[Rgb], k: usize) -> Vec<Rgb> {
    let reps: Vec<Rgb> = hue_buckets(samples)
        .into_iter()
        .flatten()
        .map(|b| b.representative)
        .collect();

    let mut chosen: Vec<Rgb> = if reps.len() > k {
        (0..k).map(|i| reps[i * reps.len() / k]).collect()
    } else {
        reps
    };

    if chosen.len() < k {
        let mut rest: Vec<(Rgb, f32)> = distinct(samples)
            .into_iter()
            .filter(|c| !chosen.contains(c))
            .map(|c| (c, rgb_to_hsl(c).s))
            .collect();
        rest.sort_by(|a, b| b.1.total_cmp(&a.1));
        chosen.extend(rest.into_iter().take(k - chosen.len()).map(|(c, _)| c));
    }
    chosen
}
