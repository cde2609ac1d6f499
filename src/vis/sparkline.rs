//! Sparkline rendering for labeled series
//!
//! Missing values are drawn as blanks so gaps in a moving average stay visible.

use crate::na::NA;

/// Sparkline - a compact inline chart
#[derive(Debug, Clone)]
pub struct Sparkline {
    /// Data values
    values: Vec<NA<f64>>,
    /// Custom minimum value (None = auto)
    min: Option<f64>,
    /// Custom maximum value (None = auto)
    max: Option<f64>,
    /// Maximum number of characters; longer series are averaged into buckets
    max_width: Option<usize>,
}

impl Sparkline {
    /// Block characters for sparkline (8 levels)
    const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

    /// Create a new sparkline
    pub fn new(values: &[NA<f64>]) -> Self {
        Self {
            values: values.to_vec(),
            min: None,
            max: None,
            max_width: None,
        }
    }

    /// Set custom range
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Limit the rendered width
    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width.max(1));
        self
    }

    /// Minimum and maximum of the defined values
    pub fn bounds(values: &[NA<f64>]) -> Option<(f64, f64)> {
        values.iter().filter_map(NA::get).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Render the sparkline to a string
    pub fn render(&self) -> String {
        let values = match self.max_width {
            Some(width) if self.values.len() > width => bucket_means(&self.values, width),
            _ => self.values.clone(),
        };

        let (auto_min, auto_max) = match Self::bounds(&values) {
            Some(bounds) => bounds,
            None => return " ".repeat(values.len()),
        };
        let min = self.min.unwrap_or(auto_min);
        let max = self.max.unwrap_or(auto_max);

        let range = if (max - min).abs() < f64::EPSILON {
            1.0
        } else {
            max - min
        };

        values
            .iter()
            .map(|v| match v {
                NA::Value(v) => {
                    let normalized = ((v - min) / range).clamp(0.0, 1.0);
                    let idx = (normalized * 7.0).round() as usize;
                    Self::BLOCKS[idx.min(7)]
                }
                NA::NA => ' ',
            })
            .collect()
    }
}

/// Average consecutive values into `width` buckets; a bucket with no defined value is NA
fn bucket_means(values: &[NA<f64>], width: usize) -> Vec<NA<f64>> {
    let len = values.len();
    (0..width)
        .map(|b| {
            let start = b * len / width;
            let end = ((b + 1) * len / width).max(start + 1).min(len);
            let defined: Vec<f64> = values[start..end].iter().filter_map(NA::get).collect();
            if defined.is_empty() {
                NA::NA
            } else {
                NA::Value(defined.iter().sum::<f64>() / defined.len() as f64)
            }
        })
        .collect()
}
