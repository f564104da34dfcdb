use rand::rngs::StdRng;
use rand::Rng;

use crate::color::{contrast_ratio, luminance_of, rgb_to_lab, Lab, Rgb};

use super::distinct;

/// Greedy farthest-point selection.
///
/// Starting from `first`, repeatedly takes the point whose minimum distance
/// to everything chosen so far is largest; the lowest index wins ties.
fn farthest_point<T: Copy>(
    points: &[T],
    first: usize,
    k: usize,
    distance: impl Fn(T, T) -> f32,
) -> Vec<usize> {
    let target = k.min(points.len());
    let mut chosen = Vec::with_capacity(target);
    let mut taken = vec![false; points.len()];
    let mut min_dist: Vec<f32> = points.iter().map(|&p| distance(p, points[first])).collect();

    chosen.push(first);
    taken[first] = true;

    while chosen.len() < target {
        let mut best: Option<usize> = None;
        for (i, &d) in min_dist.iter().enumerate() {
            if taken[i] {
                continue;
            }
            if best.map_or(true, |b| d > min_dist[b]) {
                best = Some(i);
            }
        }
        let Some(next) = best else {
            break;
        };

        chosen.push(next);
        taken[next] = true;
        for (i, d) in min_dist.iter_mut().enumerate() {
            *d = d.min(distance(points[i], points[next]));
        }
    }
    chosen
}

/// Lab farthest-point sampling from a random start.
pub(super) fn distant(samples: &[Rgb], k: usize, rng: &mut StdRng) -> Vec<Rgb> {
    let colors = distinct(samples);
    if colors.is_empty() {
        return Vec::new();
    }
    let labs: Vec<Lab> = colors.iter().map(|&c| rgb_to_lab(c)).collect();
    let first = rng.gen_range(0..colors.len());

    farthest_point(&labs, first, k, |a, b| a.distance_sq(b))
        .into_iter()
        .map(|i| colors[i])
        .collect()
}

/// Contrast-ratio farthest-point sampling from the brightest color.
pub(super) fn contrasting(samples: &[Rgb], k: usize) -> Vec<Rgb> {
    let colors = distinct(samples);
    if colors.is_empty() {
        return Vec::new();
    }
    let lums: Vec<f32> = colors.iter().map(|&c| luminance_of(c) / 255.0).collect();

    let mut brightest = 0;
    for (i, &l) in lums.iter().enumerate() {
        if l > lums[brightest] {
            brightest = i;
        }
    }

    farthest_point(&lums, brightest, k, contrast_ratio)
        .into_iter()
        .map(|i| colors[i])
        .collect()
}
