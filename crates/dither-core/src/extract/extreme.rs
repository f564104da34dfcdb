use crate::color::{rgb_to_hsl, Hsl, Rgb};

use super::distinct;

fn with_hsl(samples: &[Rgb]) -> Vec<(Rgb, Hsl)> {
    distinct(samples)
        .into_iter()
        .map(|c| (c, rgb_to_hsl(c)))
        .collect()
}

/// Index of the first element maximizing `key`.
fn argmax(colors: &[(Rgb, Hsl)], key: impl Fn(&Hsl) -> f32) -> usize {
    let mut best = 0;
    for (i, (_, hsl)) in colors.iter().enumerate() {
        if key(hsl) > key(&colors[best].1) {
            best = i;
        }
    }
    best
}

/// Lightest, darkest, most and least saturated colors, then the colors
/// closest to mid lightness.
pub(super) fn extreme(samples: &[Rgb], k: usize) -> Vec<Rgb> {
    let colors = with_hsl(samples);
    if colors.is_empty() {
        return Vec::new();
    }

    let picks = [
        argmax(&colors, |h| h.l),
        argmax(&colors, |h| -h.l),
        argmax(&colors, |h| h.s),
        argmax(&colors, |h| -h.s),
    ];
    let mut chosen: Vec<Rgb> = Vec::with_capacity(k.max(4));
    for i in picks {
        let color = colors[i].0;
        if !chosen.contains(&color) {
            chosen.push(color);
        }
    }

    if chosen.len() < k {
        let mut rest: Vec<&(Rgb, Hsl)> =
            colors.iter().filter(|(c, _)| !chosen.contains(c)).collect();
        rest.sort_by(|a, b| (a.1.l - 50.0).abs().total_cmp(&(b.1.l - 50.0).abs()));
        chosen.extend(rest.into_iter().take(k - chosen.len()).map(|(c, _)| *c));
    }
    chosen
}

/// Vivid mid-tones: score `s × (1 − |l − 50| / 50)`, best first.
pub(super) fn pronounced(samples: &[Rgb], k: usize) -> Vec<Rgb> {
    let mut scored: Vec<(Rgb, f32)> = with_hsl(samples)
        .into_iter()
        .map(|(c, h)| (c, h.s * (1.0 - (h.l - 50.0).abs() / 50.0)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().take(k).map(|(c, _)| c).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extreme_picks() {
        let samples = [
            Rgb::new(128, 128, 128),
            Rgb::WHITE,
            Rgb::BLACK,
            Rgb::new(255, 0, 0),
        ];
        assert_eq!(
            extreme(&samples, 4),
            vec![Rgb::WHITE, Rgb::BLACK, Rgb::new(255, 0, 0), Rgb::new(128, 128, 128)]
        );
    }

    #[test]
    fn test_extreme_dedups() {
        // White is lightest, most and least saturated at once.
        let colors = extreme(&[Rgb::WHITE, Rgb::BLACK], 4);
        assert_eq!(colors, vec![Rgb::WHITE, Rgb::BLACK]);
    }

    #[test]
    fn test_extreme_pads_with_mid_lightness() {
        let samples = [
            Rgb::WHITE,
            Rgb::BLACK,
            Rgb::new(255, 0, 0),
            Rgb::new(100, 100, 100),
            Rgb::new(128, 128, 128),
        ];
        let colors = extreme(&samples, 5);
        assert_eq!(colors[3], Rgb::new(128, 128, 128));
        assert_eq!(colors[4], Rgb::new(100, 100, 100));
    }

    #[test]
    fn test_pronounced_prefers_vivid_midtones() {
        let samples = [Rgb::new(200, 180, 180), Rgb::new(255, 0, 0), Rgb::new(128, 0, 0)];
        assert_eq!(
            pronounced(&samples, 2),
            vec![Rgb::new(255, 0, 0), Rgb::new(128, 0, 0)]
        );
    }
}
