//! 描画側とのデータ受け渡し境界
//!
//! 分析コアは描画を行わず、`TrendData` を `TrendPlotter` に渡すだけです。
//! 端末向けの簡易な実装として `AsciiTrendPlotter` を提供します。

mod plotter;
mod sparkline;

use crate::analysis::TrendData;
use crate::error::Result;

pub use self::plotter::AsciiTrendPlotter;
pub use self::sparkline::Sparkline;

/// トレンドデータを受け取って描画する外部コンポーネント
pub trait TrendPlotter {
    /// 時刻・ラベル付き系列・タイトルを受け取り描画する
    fn plot(&mut self, trend: &TrendData) -> Result<()>;
}

/// 受け取ったトレンドデータを保持するだけのプロッター
#[derive(Debug, Default)]
pub struct RecordingPlotter {
    pub received: Vec<TrendData>,
}

impl TrendPlotter for RecordingPlotter {
    fn plot(&mut self, trend: &TrendData) -> Result<()> {
        self.received.push(trend.clone());
        Ok(())
    }
}
