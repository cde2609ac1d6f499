use std::io::Write;

use crate::analysis::TrendData;
use crate::error::Result;
use crate::vis::{Sparkline, TrendPlotter};

/// 各系列を1行のスパークラインとして書き出すプロッター
///
/// すべての系列で同じ値域を使うため、元データと移動平均を縦に並べて比較できます。
pub struct AsciiTrendPlotter<W: Write> {
    writer: W,
    width: usize,
}

impl<W: Write> AsciiTrendPlotter<W> {
    /// 出力先を指定して作成（幅は60文字）
    pub fn new(writer: W) -> Self {
        Self { writer, width: 60 }
    }

    /// スパークラインの最大幅を設定
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    /// 出力先を取り出す
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TrendPlotter for AsciiTrendPlotter<W> {
    fn plot(&mut self, trend: &TrendData) -> Result<()> {
        writeln!(self.writer, "{}", trend.title)?;

        let first = trend.timestamps.iter().min();
        let last = trend.timestamps.iter().max();
        if let (Some(first), Some(last)) = (first, last) {
            writeln!(
                self.writer,
                "{} .. {} ({} rows)",
                first.format("%Y-%m-%d"),
                last.format("%Y-%m-%d"),
                trend.timestamps.len()
            )?;
        }

        let bounds = trend
            .series
            .iter()
            .filter_map(|s| Sparkline::bounds(&s.values))
            .reduce(|(lo_a, hi_a), (lo_b, hi_b)| (lo_a.min(lo_b), hi_a.max(hi_b)));

        let label_width = trend
            .series
            .iter()
            .map(|s| s.label.chars().count())
            .max()
            .unwrap_or(0);

        for series in &trend.series {
            let mut spark = Sparkline::new(&series.values).with_max_width(self.width);
            if let Some((min, max)) = bounds {
                spark = spark.with_range(min, max);
            }
            let latest = series
                .values
                .iter()
                .rev()
                .find_map(|v| v.get())
                .map(|v| format!("{:.2}", v))
                .unwrap_or_else(|| "NA".to_string());

            writeln!(
                self.writer,
                "{:>width$}: {} (last: {})",
                series.label,
                spark.render(),
                latest,
                width = label_width
            )?;
        }

        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::LabeledSeries;
    use crate::na::NA;
    use chrono::NaiveDate;

    #[test]
    fn test_plot_writes_every_series() {
        let day = |d| {
            NaiveDate::from_ymd_opt(2023, 1, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        };
        let trend = TrendData {
            title: "Sales".to_string(),
            timestamps: vec![day(1), day(2), day(3)],
            series: vec![
                LabeledSeries::new("Original Data", vec![NA::Value(1.0), NA::Value(2.0), NA::Value(3.0)]),
                LabeledSeries::new("2-day Moving Average", vec![NA::NA, NA::Value(1.5), NA::Value(2.5)]),
            ],
        };

        let mut plotter = AsciiTrendPlotter::new(Vec::new());
        plotter.plot(&trend).unwrap();
        let output = String::from_utf8(plotter.into_inner()).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Sales");
        assert_eq!(lines[1], "2023-01-01 .. 2023-01-03 (3 rows)");
        assert!(lines[2].contains("Original Data"));
        assert!(lines[2].ends_with("(last: 3.00)"));
        assert!(lines[3].contains("2-day Moving Average"));
        assert!(lines[3].ends_with("(last: 2.50)"));
    }
}
