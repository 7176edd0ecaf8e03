//! Terminal histogram rendering

use console::style;

use crate::stats::HistogramBin;

/// Render histogram bins as horizontal bars
///
/// Bars are scaled so the fullest bin spans `width` characters. Bins whose
/// midpoint lies outside `fences` (the outlier fences) are drawn shaded.
///
/// # Example Output
/// ```text
///        9.98 │████████████                  │     3
///       10.01 │██████████████████████████████│     7
/// ```
pub fn render_histogram(
    bins: &[HistogramBin],
    width: usize,
    fences: Option<(f64, f64)>,
) -> String {
    let max_count = bins.iter().map(|b| b.frequency).max().unwrap_or(0).max(1);
    let mut lines = Vec::with_capacity(bins.len() + 1);

    for bin in bins {
        let bar_width = (bin.frequency as f64 / max_count as f64 * width as f64).round() as usize;
        let outside = fences
            .map(|(lo, hi)| bin.midpoint < lo || bin.midpoint > hi)
            .unwrap_or(false);

        let bar = if outside {
            style("░".repeat(bar_width)).red()
        } else {
            style("█".repeat(bar_width)).green()
        };
        let pad = " ".repeat(width - bar_width);

        lines.push(format!(
            "   {:>10.2} │{}{}│ {:>5}",
            bin.midpoint, bar, pad, bin.frequency
        ));
    }

    lines.push(format!("   {:>10} └{}┘", "", "─".repeat(width)));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::histogram;

    #[test]
    fn test_one_line_per_bin_plus_axis() {
        let bins = histogram(&[1.0, 2.0, 2.0, 3.0]).unwrap();
        let out = render_histogram(&bins, 20, None);
        assert_eq!(out.lines().count(), bins.len() + 1);
    }

    #[test]
    fn test_fullest_bin_spans_width() {
        console::set_colors_enabled(false);
        let bins = histogram(&[0.0, 10.0, 10.0, 10.0]).unwrap();
        let out = render_histogram(&bins, 12, None);
        let last = out.lines().nth(bins.len() - 1).unwrap();
        assert!(last.contains(&"█".repeat(12)));
        assert!(last.ends_with("    3"));
    }
}
