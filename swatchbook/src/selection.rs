//! Pure selection helpers: max-min distinct subsets and gradient padding.

use tracing::debug;

use crate::color::{hsl_distance, Color};

#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    #[error("requested color count must be at least 1")]
    ZeroCount,
}

/// Picks `count` colors from `colors` that are spread as far apart as
/// possible under [`hsl_distance`].
///
/// Selection is greedy max-min: the first color seeds the set, then each
/// round adds the candidate whose nearest selected color is farthest away.
/// Ties go to the earlier catalog entry. When `count` exceeds the number of
/// colors the catalog order is handed to [`interpolate`] instead.
pub fn most_distinct(colors: &[Color], count: usize) -> Result<Vec<Color>, SelectionError> {
    if count == 0 {
        return Err(SelectionError::ZeroCount);
    }

    if count > colors.len() {
        debug!(
            available = colors.len(),
            requested = count,
            "padding distinct selection with interpolated colors"
        );
        return Ok(interpolate(colors, count));
    }

    let mut selected = Vec::with_capacity(count);
    selected.push(colors[0]);

    // Nearest-selected distance per catalog entry, refreshed as the set grows.
    let mut nearest: Vec<f64> = colors
        .iter()
        .map(|color| hsl_distance(&colors[0], color))
        .collect();

    for _ in 1..count {
        let mut best: Option<(usize, f64)> = None;
        for (index, color) in colors.iter().enumerate() {
            if selected.contains(color) {
                continue;
            }
            let score = nearest[index];
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((index, score));
            }
        }

        // Only reachable for slices with repeats; catalogs reject them.
        let Some((chosen, _)) = best else {
            break;
        };

        let winner = colors[chosen];
        selected.push(winner);
        for (index, color) in colors.iter().enumerate() {
            let distance = hsl_distance(&winner, color);
            if distance < nearest[index] {
                nearest[index] = distance;
            }
        }
    }

    Ok(selected)
}

/// Stretches `colors` to `target_count` entries by inserting HSL blends
/// between neighbours.
///
/// Lists already holding at least `target_count` colors come back unchanged,
/// a single color is repeated, and an empty list stays empty.
pub fn interpolate(colors: &[Color], target_count: usize) -> Vec<Color> {
    if colors.len() >= target_count {
        return colors.to_vec();
    }

    match colors {
        [] => return Vec::new(),
        [only] => return vec![*only; target_count],
        _ => {}
    }

    let segments = target_count.div_ceil(colors.len() - 1);
    let mut result = Vec::with_capacity(target_count);

    for pair in colors.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        result.push(start);

        for step in 1..segments {
            if result.len() >= target_count {
                break;
            }
            let ratio = step as f64 / segments as f64;
            result.push(start.mix(&end, ratio));
        }
    }

    if result.len() < target_count {
        if let Some(last) = colors.last() {
            result.push(*last);
        }
    }

    result.truncate(target_count);
    result
}
