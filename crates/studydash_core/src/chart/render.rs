//! Bar layout and terminal drawing for one chart frame.
//!
//! # Responsibility
//! - Scale weekday counts into bar heights for a given progress.
//! - Draw a frame as plain text with `Mon..Sun` labels.

use crate::activity::WeekdayCounts;
use crate::model::schedule::WEEKDAY_LABELS;

/// One laid-out bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: &'static str,
    pub count: u32,
    /// Bar height in rows, already scaled by progress.
    pub height: f64,
}

/// Bars for one animation frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub bars: Vec<Bar>,
    pub max_height: usize,
    pub progress: f64,
}

/// Scales `counts` against their maximum (at least 1) and `progress`.
pub fn render_bars(counts: &WeekdayCounts, progress: f64, max_height: usize) -> ChartFrame {
    let progress = progress.clamp(0.0, 1.0);
    let scale = f64::from(counts.max().max(1));
    let bars = counts
        .labeled()
        .map(|(label, count)| Bar {
            label,
            count,
            height: f64::from(count) / scale * max_height as f64 * progress,
        })
        .collect();

    ChartFrame {
        bars,
        max_height,
        progress,
    }
}

impl ChartFrame {
    /// Draws the frame as rows of `#` columns with weekday labels underneath.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in (1..=self.max_height).rev() {
            let line: Vec<&str> = self
                .bars
                .iter()
                .map(|bar| if bar.height.round() as usize >= row { " ### " } else { "     " })
                .collect();
            out.push_str(line.concat().trim_end());
            out.push('\n');
        }
        let labels: Vec<String> = WEEKDAY_LABELS.iter().map(|label| format!(" {label} ")).collect();
        out.push_str(&labels.concat());
        out.push('\n');
        let totals: Vec<String> = self.bars.iter().map(|bar| format!("{:^5}", bar.count)).collect();
        out.push_str(totals.concat().trim_end());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::render_bars;
    use crate::activity::WeekdayCounts;

    #[test]
    fn zero_vector_renders_flat_bars() {
        let frame = render_bars(&WeekdayCounts::default(), 1.0, 8);
        assert_eq!(frame.bars.len(), 7);
        assert!(frame.bars.iter().all(|bar| bar.height == 0.0));
    }

    #[test]
    fn tallest_bar_fills_height_at_full_progress() {
        let counts = WeekdayCounts::new([2, 0, 0, 1, 0, 0, 0]);
        let frame = render_bars(&counts, 1.0, 10);
        assert_eq!(frame.bars[0].height, 10.0);
        assert_eq!(frame.bars[3].height, 5.0);

        let half = render_bars(&counts, 0.5, 10);
        assert_eq!(half.bars[0].height, 5.0);
    }

    #[test]
    fn rendering_is_repeatable_and_leaves_input_untouched() {
        let counts = WeekdayCounts::new([1, 2, 3, 4, 5, 6, 7]);
        let first = render_bars(&counts, 0.3, 6);
        let second = render_bars(&counts, 0.3, 6);
        assert_eq!(first, second);
        assert_eq!(counts, WeekdayCounts::new([1, 2, 3, 4, 5, 6, 7]));
    }

    #[test]
    fn text_output_has_one_row_per_height_plus_labels() {
        let frame = render_bars(&WeekdayCounts::new([1, 0, 0, 0, 0, 0, 0]), 1.0, 3);
        let text = frame.to_text();
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("Mon"));
        assert!(text.lines().next().unwrap().contains("###"));
    }
}
