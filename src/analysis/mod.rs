//! 時系列分析のファサード
//!
//! `TimeSeriesAnalysis` は1つのデータセットを保持し、移動平均エンジンと
//! 季節性検出器を1つのAPIとして提供します。列名の検証はここで一元的に行います。

mod moving_average;
mod seasonality;
mod trend;

use std::collections::HashSet;

use crate::config::TrendConfig;
use crate::dataset::{Column, Dataset};
use crate::error::{Error, Result};
use crate::vis::TrendPlotter;

pub use self::moving_average::{rolling_mean, MovingAverage, MovingAverageEngine};
pub use self::seasonality::{lag_correlation, SeasonalityDetector, SeasonalityReport};
pub use self::trend::{
    default_title, moving_average_label, LabeledSeries, TrendData, ORIGINAL_LABEL,
};

/// 構築時に確定した有効な列名の集合による列名検証
#[derive(Debug, Clone)]
pub struct ColumnValidator {
    valid: HashSet<String>,
}

impl ColumnValidator {
    /// データセットの列名から作成
    pub fn new(dataset: &Dataset) -> Self {
        Self {
            valid: dataset.column_set(),
        }
    }

    /// 列名が有効かどうか
    pub fn is_valid(&self, name: &str) -> bool {
        self.valid.contains(name)
    }

    /// 列名を検証して列を取得する
    pub fn resolve<'a>(&self, dataset: &'a Dataset, name: &str) -> Result<Column<'a>> {
        if !self.is_valid(name) {
            return Err(unknown_column(name));
        }
        dataset.column(name).ok_or_else(|| unknown_column(name))
    }
}

fn unknown_column(name: &str) -> Error {
    Error::UnknownColumn(format!("指定された列 '{}' はデータに存在しません", name))
}

/// 時系列データの分析を行う構造体
#[derive(Debug, Clone)]
pub struct TimeSeriesAnalysis {
    dataset: Dataset,
    validator: ColumnValidator,
    moving_average: MovingAverageEngine,
    seasonality: SeasonalityDetector,
    trend: TrendConfig,
}

impl TimeSeriesAnalysis {
    /// データセットを束縛して作成（トレンドは7日・30日の移動平均）
    pub fn new(dataset: Dataset) -> Self {
        let validator = ColumnValidator::new(&dataset);
        Self {
            dataset,
            validator,
            moving_average: MovingAverageEngine::new(),
            seasonality: SeasonalityDetector::new(),
            trend: TrendConfig::default(),
        }
    }

    /// トレンドの窓幅を指定して作成
    pub fn with_trend_config(dataset: Dataset, trend: TrendConfig) -> Result<Self> {
        if trend.short_window == 0 || trend.long_window == 0 {
            return Err(Error::InvalidParameter(format!(
                "トレンドの窓幅は1以上である必要があります: short={}, long={}",
                trend.short_window, trend.long_window
            )));
        }
        if trend.short_window == trend.long_window {
            return Err(Error::InvalidParameter(format!(
                "トレンドの2つの窓幅が同じです ({})。系列のラベルが重複します。",
                trend.short_window
            )));
        }
        let mut analysis = Self::new(dataset);
        analysis.trend = trend;
        Ok(analysis)
    }

    /// 束縛しているデータセット
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// データセットを取り出す
    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }

    /// 分析可能な列名（読み込み順）
    pub fn column_names(&self) -> &[String] {
        self.dataset.column_names()
    }

    /// 指定した列の移動平均を計算
    pub fn moving_average(&self, column_name: &str, window_size: usize) -> Result<MovingAverage> {
        let column = self.validator.resolve(&self.dataset, column_name)?;
        self.moving_average.compute(column, window_size)
    }

    /// 指定した列の季節性を検出
    pub fn detect_seasonality(&self, column_name: &str) -> Result<SeasonalityReport> {
        let column = self.validator.resolve(&self.dataset, column_name)?;
        Ok(self.seasonality.detect(column))
    }

    /// 描画用のトレンドデータを作成
    ///
    /// 元データと、短期・長期（既定では7日・30日）の移動平均を含みます。
    pub fn trend_data(&self, column_name: &str, title: Option<&str>) -> Result<TrendData> {
        let column = self.validator.resolve(&self.dataset, column_name)?;

        let short = self.moving_average.compute(column, self.trend.short_window)?;
        let long = self.moving_average.compute(column, self.trend.long_window)?;

        Ok(TrendData {
            title: title
                .map(str::to_string)
                .unwrap_or_else(|| default_title(column_name)),
            timestamps: self.dataset.timestamps().to_vec(),
            series: vec![
                LabeledSeries::new(ORIGINAL_LABEL, column.values().to_vec()),
                LabeledSeries::new(moving_average_label(short.window_size()), short.into_values()),
                LabeledSeries::new(moving_average_label(long.window_size()), long.into_values()),
            ],
        })
    }

    /// トレンドデータを描画側に渡す
    pub fn display_trend<P: TrendPlotter + ?Sized>(
        &self,
        column_name: &str,
        title: Option<&str>,
        plotter: &mut P,
    ) -> Result<()> {
        let trend = self.trend_data(column_name, title)?;
        plotter.plot(&trend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::na::NA;
    use chrono::NaiveDate;

    fn dataset(values: Vec<NA<f64>>) -> Dataset {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let timestamps = (0..values.len())
            .map(|i| {
                (start + chrono::Duration::days(i as i64))
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
            })
            .collect();
        Dataset::new(timestamps, vec![("sales".to_string(), values)]).unwrap()
    }

    #[test]
    fn test_validator() {
        let ds = dataset(vec![NA::Value(1.0)]);
        let validator = ColumnValidator::new(&ds);
        assert!(validator.is_valid("sales"));
        assert!(validator.resolve(&ds, "sales").is_ok());
        assert!(matches!(
            validator.resolve(&ds, "visits"),
            Err(Error::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_trend_config_rejects_zero() {
        let ds = dataset(vec![NA::Value(1.0)]);
        let trend = TrendConfig {
            short_window: 0,
            long_window: 30,
        };
        assert!(matches!(
            TimeSeriesAnalysis::with_trend_config(ds, trend),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_trend_config_rejects_equal_windows() {
        let ds = dataset(vec![NA::Value(1.0)]);
        let trend = TrendConfig {
            short_window: 7,
            long_window: 7,
        };
        assert!(matches!(
            TimeSeriesAnalysis::with_trend_config(ds, trend),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_trend_labels() {
        let ds = dataset((1..=40).map(|i| NA::Value(i as f64)).collect());
        let analysis = TimeSeriesAnalysis::new(ds);
        let trend = analysis.trend_data("sales", None).unwrap();

        assert_eq!(trend.title, "Trend analysis of sales");
        let labels: Vec<&str> = trend.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Original Data", "7-day Moving Average", "30-day Moving Average"]
        );
    }
}
