use serde::Serialize;

use crate::na::NA;
use crate::temporal::Timestamp;

/// 元データの系列ラベル
pub const ORIGINAL_LABEL: &str = "Original Data";

/// 移動平均系列のラベル
pub fn moving_average_label(window_size: usize) -> String {
    format!("{}-day Moving Average", window_size)
}

/// 既定のタイトル
pub fn default_title(column: &str) -> String {
    format!("Trend analysis of {}", column)
}

/// ラベル付きの値の並び
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledSeries {
    pub label: String,
    pub values: Vec<NA<f64>>,
}

impl LabeledSeries {
    pub fn new(label: impl Into<String>, values: Vec<NA<f64>>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// 描画側に渡すトレンドデータ
///
/// すべての系列は `timestamps` と位置で対応します。描画は行いません。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendData {
    pub title: String,
    pub timestamps: Vec<Timestamp>,
    pub series: Vec<LabeledSeries>,
}

impl TrendData {
    /// ラベルで系列を取得
    pub fn series(&self, label: &str) -> Option<&LabeledSeries> {
        self.series.iter().find(|s| s.label == label)
    }

    /// 元データの系列
    pub fn original(&self) -> Option<&LabeledSeries> {
        self.series(ORIGINAL_LABEL)
    }

    /// 系列を (時刻, 値) の組として取得する。NAの位置は含めない
    pub fn points(&self, label: &str) -> Option<Vec<(Timestamp, f64)>> {
        let series = self.series(label)?;
        Some(
            self.timestamps
                .iter()
                .zip(&series.values)
                .filter_map(|(ts, v)| v.get().map(|v| (*ts, v)))
                .collect(),
        )
    }
}
