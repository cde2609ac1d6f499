//! ラグ自己相関による季節性の検出
//!
//! 日次・週次・月次の各ラグについて、系列とそれをずらした系列とのピアソン相関係数を
//! 計算し、周期構造の強さの目安とします。有意性の検定は行いません。

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::dataset::Column;
use crate::na::drop_na;
use crate::temporal::SeasonalPeriod;

/// 周期ごとの相関係数
///
/// データが足りない周期はレポートに含まれません。
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SeasonalityReport {
    /// NAを除いた後の観測数
    observations: usize,
    scores: BTreeMap<SeasonalPeriod, f64>,
}

impl SeasonalityReport {
    /// 周期の相関係数を取得
    pub fn get(&self, period: SeasonalPeriod) -> Option<f64> {
        self.scores.get(&period).copied()
    }

    /// ラベル（"daily", "weekly", "monthly"）で相関係数を取得
    pub fn get_label(&self, label: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|(period, _)| period.label() == label)
            .map(|(_, score)| *score)
    }

    pub fn contains(&self, period: SeasonalPeriod) -> bool {
        self.scores.contains_key(&period)
    }

    /// 周期の昇順に (周期, 相関係数) を列挙
    pub fn iter(&self) -> impl Iterator<Item = (SeasonalPeriod, f64)> + '_ {
        self.scores.iter().map(|(p, s)| (*p, *s))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// NAを除いた後の観測数
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// 絶対値が最大の相関係数を持つ周期
    pub fn strongest(&self) -> Option<(SeasonalPeriod, f64)> {
        self.iter()
            .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
    }
}

/// 季節性検出器
#[derive(Debug, Clone)]
pub struct SeasonalityDetector {
    periods: Vec<SeasonalPeriod>,
}

impl Default for SeasonalityDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SeasonalityDetector {
    /// 日次・週次・月次を評価する検出器を作成
    pub fn new() -> Self {
        Self {
            periods: SeasonalPeriod::ALL.to_vec(),
        }
    }

    /// 評価対象の周期
    pub fn periods(&self) -> &[SeasonalPeriod] {
        &self.periods
    }

    /// 列の季節性を評価する
    ///
    /// NAの位置は補完せずに取り除きます（時間的な連続性は保たれません）。
    /// NAを除いた長さが `2 * lag` 以下の周期は結果に含めません。
    pub fn detect(&self, column: Column<'_>) -> SeasonalityReport {
        let data = drop_na(column.values());
        let mut scores = BTreeMap::new();

        for &period in &self.periods {
            let lag = period.lag();
            if data.len() <= lag * 2 {
                debug!(
                    "列 '{}': {} (ラグ {}) はデータ不足のため省略します（観測数 {}）",
                    column.name(),
                    period,
                    lag,
                    data.len()
                );
                continue;
            }

            match lag_correlation(&data, lag) {
                Some(r) => {
                    debug!("列 '{}': {} (ラグ {}) = {:.4}", column.name(), period, lag, r);
                    scores.insert(period, r);
                }
                None => {
                    debug!(
                        "列 '{}': {} (ラグ {}) は分散が0のため相関を定義できません",
                        column.name(),
                        period,
                        lag
                    );
                }
            }
        }

        SeasonalityReport {
            observations: data.len(),
            scores,
        }
    }
}

/// 系列と `lag` だけずらした系列とのピアソン相関係数
///
/// 重なり合う範囲 `x[lag..]` と `x[..n-lag]` を比較します。重なりが2点未満の場合や、
/// どちらかの分散が0の場合はNoneを返します。結果は [-1, 1] に収まります。
pub fn lag_correlation(data: &[f64], lag: usize) -> Option<f64> {
    if data.len() < lag + 2 {
        return None;
    }

    let n = data.len() - lag;
    let current = &data[lag..];
    let lagged = &data[..n];

    let mean_current = current.iter().sum::<f64>() / n as f64;
    let mean_lagged = lagged.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_current = 0.0;
    let mut var_lagged = 0.0;
    for (a, b) in current.iter().zip(lagged) {
        let da = a - mean_current;
        let db = b - mean_lagged;
        cov += da * db;
        var_current += da * da;
        var_lagged += db * db;
    }

    let denom = (var_current * var_lagged).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }

    Some((cov / denom).clamp(-1.0, 1.0))
}
