use rand::rngs::StdRng;
use rand::seq::index;

use crate::color::{rgb_to_lab, Lab, Rgb};

const MAX_ROUNDS: usize = 20;

/// Lloyd's algorithm in Lab space.
///
/// Centroids start on `k` distinct random samples (fewer when there are
/// fewer samples). Output colors are the RGB means of each cluster, so they
/// are real averages of source pixels rather than Lab round trips.
pub(super) fn kmeans(samples: &[Rgb], k: usize, rng: &mut StdRng) -> Vec<Rgb> {
    let labs: Vec<Lab> = samples.iter().map(|&c| rgb_to_lab(c)).collect();
    let seeds = index::sample(rng, samples.len(), k.min(samples.len()));

    let mut centroids: Vec<Lab> = seeds.iter().map(|i| labs[i]).collect();
    let mut colors: Vec<Rgb> = seeds.iter().map(|i| samples[i]).collect();
    let mut assignment = vec![usize::MAX; samples.len()];

    for round in 0..MAX_ROUNDS {
        let mut changed = false;
        for (slot, lab) in assignment.iter_mut().zip(&labs) {
            let nearest = nearest(&centroids, *lab);
            if *slot != nearest {
                *slot = nearest;
                changed = true;
            }
        }
        if !changed {
            tracing::trace!(round, "k-means converged");
            break;
        }

        let mut lab_sums = vec![[0.0f64; 3]; centroids.len()];
        let mut rgb_sums = vec![[0u64; 3]; centroids.len()];
        let mut counts = vec![0u64; centroids.len()];
        for ((&cluster, lab), color) in assignment.iter().zip(&labs).zip(samples) {
            let l = &mut lab_sums[cluster];
            l[0] += lab.l as f64;
            l[1] += lab.a as f64;
            l[2] += lab.b as f64;
            let s = &mut rgb_sums[cluster];
            s[0] += color.r as u64;
            s[1] += color.g as u64;
            s[2] += color.b as u64;
            counts[cluster] += 1;
        }

        for (cluster, &n) in counts.iter().enumerate() {
            // An empty cluster keeps its previous centroid.
            if n == 0 {
                continue;
            }
            let l = lab_sums[cluster];
            let nf = n as f64;
            centroids[cluster] =
                Lab::new((l[0] / nf) as f32, (l[1] / nf) as f32, (l[2] / nf) as f32);
            let s = rgb_sums[cluster];
            colors[cluster] = Rgb::from_f32([
                s[0] as f32 / n as f32,
                s[1] as f32 / n as f32,
                s[2] as f32 / n as f32,
            ]);
        }
    }

    colors
}

fn nearest(centroids: &[Lab], lab: Lab) -> usize {
    let mut best = 0;
    let mut best_dist = f32::MAX;
    for (i, c) in centroids.iter().enumerate() {
        let d = lab.distance_sq(*c);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}
