use crate::color::Rgb;

/// Median cut in RGB.
///
/// Repeatedly picks the box whose single widest channel range is the
/// largest over all boxes and splits it at the median of that channel. The
/// split point snaps to a value boundary so equal values never straddle two
/// boxes. Boxes with fewer than two samples or a zero range are final.
pub(super) fn median_cut(samples: &[Rgb], k: usize) -> Vec<Rgb> {
    let mut boxes: Vec<Vec<Rgb>> = vec![samples.to_vec()];

    while boxes.len() < k {
        let widest = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.len() >= 2)
            .map(|(i, b)| (i, widest_channel(b)))
            .filter(|&(_, (_, range))| range > 0)
            .max_by(|a, b| a.1 .1.cmp(&b.1 .1).then(b.0.cmp(&a.0)));

        let Some((idx, (channel, _))) = widest else {
            break;
        };

        let mut cube = boxes.swap_remove(idx);
        cube.sort_by_key(|c| channel_value(*c, channel));
        let median = channel_value(cube[cube.len() / 2], channel);

        let mut split = cube.partition_point(|c| channel_value(*c, channel) < median);
        if split == 0 {
            split = cube.partition_point(|c| channel_value(*c, channel) <= median);
        }
        let upper = cube.split_off(split);
        boxes.push(cube);
        boxes.push(upper);
    }

    boxes.iter().map(|b| mean(b)).collect()
}

#[inline]
fn channel_value(color: Rgb, channel: usize) -> u8 {
    match channel {
        0 => color.r,
        1 => color.g,
        _ => color.b,
    }
}

/// `(channel, range)` of the widest channel; red wins ties, then green.
fn widest_channel(colors: &[Rgb]) -> (usize, u8) {
    let mut lo = [u8::MAX; 3];
    let mut hi = [u8::MIN; 3];
    for &c in colors {
        for ch in 0..3 {
            let v = channel_value(c, ch);
            lo[ch] = lo[ch].min(v);
            hi[ch] = hi[ch].max(v);
        }
    }
    (0..3)
        .map(|ch| (ch, hi[ch] - lo[ch]))
        .fold((0, 0), |best, cur| if cur.1 > best.1 { cur } else { best })
}

fn mean(colors: &[Rgb]) -> Rgb {
    let n = colors.len().max(1) as f32;
    let sum = colors.iter().fold([0u64; 3], |acc, c| {
        [acc[0] + c.r as u64, acc[1] + c.g as u64, acc[2] + c.b as u64]
    });
    Rgb::from_f32([sum[0] as f32 / n, sum[1] as f32 / n, sum[2] as f32 / n])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_colors_two_boxes() {
        let samples = [
            Rgb::new(200, 30, 30),
            Rgb::new(200, 30, 30),
            Rgb::new(200, 30, 30),
            Rgb::new(20, 40, 220),
        ];
        let mut colors = median_cut(&samples, 2);
        colors.sort();
        assert_eq!(colors, vec![Rgb::new(20, 40, 220), Rgb::new(200, 30, 30)]);
    }

    #[test]
    fn test_uniform_samples_do_not_split() {
        let colors = median_cut(&[Rgb::WHITE; 10], 4);
        assert_eq!(colors, vec![Rgb::WHITE]);
    }

    #[test]
    fn test_splits_widest_channel() {
        let samples: Vec<Rgb> = (0..=255u8).map(|g| Rgb::new(10, g, 10)).collect();
        let colors = median_cut(&samples, 2);
        assert_eq!(colors.len(), 2);
        assert!(colors.iter().all(|c| c.r == 10 && c.b == 10));
        assert_ne!(colors[0].g, colors[1].g);
    }

    #[test]
    fn test_widest_channel_ties_prefer_red() {
        let samples = [Rgb::new(0, 0, 0), Rgb::new(50, 50, 50)];
        assert_eq!(widest_channel(&samples), (0, 50));
    }
}
