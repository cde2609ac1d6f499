//! 移動平均の計算を行うモジュール

use log::trace;
use serde::Serialize;

use crate::dataset::Column;
use crate::error::{Error, Result};
use crate::na::NA;

/// 移動平均の計算結果
///
/// 元の列と同じ長さで位置が対応します。先頭の `window_size - 1` 個は常にNAです。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovingAverage {
    window_size: usize,
    values: Vec<NA<f64>>,
}

impl MovingAverage {
    /// 窓幅
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// 計算結果の値
    pub fn values(&self) -> &[NA<f64>] {
        &self.values
    }

    /// 値の所有権を取り出す
    pub fn into_values(self) -> Vec<NA<f64>> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// NAでない値の数
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_value()).count()
    }

    /// 最新（末尾側）のNAでない値
    pub fn last(&self) -> Option<f64> {
        self.values.iter().rev().find_map(NA::get)
    }
}

/// 固定長ウィンドウの移動平均エンジン
///
/// データセットの列に対して純粋に計算を行い、結果はキャッシュしません。
#[derive(Debug, Clone, Copy, Default)]
pub struct MovingAverageEngine;

impl MovingAverageEngine {
    pub fn new() -> Self {
        MovingAverageEngine
    }

    /// 列の移動平均を計算
    pub fn compute(&self, column: Column<'_>, window_size: usize) -> Result<MovingAverage> {
        trace!(
            "移動平均を計算します: 列 '{}', 窓幅 {}, 長さ {}",
            column.name(),
            window_size,
            column.len()
        );
        let values = rolling_mean(column.values(), window_size)?;
        Ok(MovingAverage {
            window_size,
            values,
        })
    }
}

/// 移動平均を計算
///
/// 位置 `i >= window_size - 1` の値は `[i - window_size + 1, i]` の算術平均です。
/// ウィンドウ内にNAが1つでもあればその位置の結果はNAになります。
/// 系列の長さが窓幅より短い場合はすべてNAです。
pub fn rolling_mean(values: &[NA<f64>], window_size: usize) -> Result<Vec<NA<f64>>> {
    if window_size == 0 {
        return Err(Error::InvalidParameter(format!(
            "ウィンドウサイズ ({}) が無効です。1以上である必要があります。",
            window_size
        )));
    }

    let mut result = Vec::with_capacity(values.len());
    let mut sum = CompensatedSum::default();
    let mut na_in_window = 0usize;

    for i in 0..values.len() {
        match values[i] {
            NA::Value(v) => sum.add(v),
            NA::NA => na_in_window += 1,
        }

        if i >= window_size {
            if let NA::Value(v) = values[i - window_size] {
                sum.add(-v);
            } else {
                na_in_window -= 1;
            }

            // 窓幅ごと、または無限大が外れた後は窓から和を取り直す
            if i % window_size == 0 || !sum.total().is_finite() {
                sum = CompensatedSum::of(&values[i + 1 - window_size..=i]);
            }
        }

        if i + 1 < window_size || na_in_window > 0 {
            result.push(NA::NA);
        } else {
            result.push(NA::Value(sum.total() / window_size as f64));
        }
    }

    Ok(result)
}

/// Neumaierの補償付き加算
///
/// 桁の大きく異なる値の加減算で失われる下位桁を `compensation` に保持します。
#[derive(Debug, Clone, Copy, Default)]
struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    fn of(window: &[NA<f64>]) -> Self {
        let mut sum = Self::default();
        for v in window.iter().filter_map(NA::get) {
            sum.add(v);
        }
        sum
    }

    fn add(&mut self, v: f64) {
        let t = self.sum + v;
        if self.sum.abs() >= v.abs() {
            self.compensation += (self.sum - t) + v;
        } else {
            self.compensation += (v - t) + self.sum;
        }
        self.sum = t;
    }

    fn total(&self) -> f64 {
        // 無限大を含む間は補正項がNaNになるため使わない
        if self.sum.is_finite() {
            self.sum + self.compensation
        } else {
            self.sum
        }
    }
}
