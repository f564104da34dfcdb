use std::collections::HashMap;

use crate::color::Rgb;

/// Drop the low three bits of a channel.
#[inline]
fn bucket(c: u8) -> u8 {
    (c >> 3) << 3
}

/// The `k` most frequent colors after reducing each channel to 5 bits.
///
/// Equal counts are ordered by color value so the result is stable.
pub(super) fn frequency(samples: &[Rgb], k: usize) -> Vec<Rgb> {
    let mut counts: HashMap<Rgb, u32> = HashMap::new();
    for c in samples {
        *counts
            .entry(Rgb::new(bucket(c.r), bucket(c.g), bucket(c.b)))
            .or_insert(0) += 1;
    }

    let mut ranked: Vec<(Rgb, u32)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.into_iter().take(k).map(|(c, _)| c).collect()
}
