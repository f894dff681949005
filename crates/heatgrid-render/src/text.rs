use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

/// Font-independent text box estimate used for static tooltip boxes.
///
/// Browsers resize the box from `getBBox()` at hover time; this only has to be close enough for
/// rasterized snapshots.
#[derive(Debug, Clone, Copy)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl Default for DeterministicTextMeasurer {
    fn default() -> Self {
        Self {
            char_width_factor: 0.6,
            line_height_factor: 1.2,
        }
    }
}

impl DeterministicTextMeasurer {
    pub fn measure_lines<S: AsRef<str>>(&self, lines: &[S], font_size: f64) -> TextMetrics {
        let font_size = font_size.max(1.0);
        let max_chars = lines
            .iter()
            .map(|l| l.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        TextMetrics {
            width: max_chars as f64 * font_size * self.char_width_factor,
            height: lines.len() as f64 * font_size * self.line_height_factor,
            line_count: lines.len(),
        }
    }
}
