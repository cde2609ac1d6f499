//! 日付インデックス付きの表形式データに対する時系列分析
//!
//! - `Dataset`: 日付フィールドを時刻として読み込んだ数値列の表
//! - `MovingAverageEngine`: 任意の窓幅の移動平均
//! - `SeasonalityDetector`: 日次・週次・月次ラグの自己相関
//! - `TimeSeriesAnalysis`: 上記をまとめたファサード
//!
//! ```no_run
//! use tsanalysis::{io, LoaderConfig, TimeSeriesAnalysis};
//!
//! let dataset = io::read_csv("sales.csv", &LoaderConfig::default())?;
//! let analysis = TimeSeriesAnalysis::new(dataset);
//! let ma7 = analysis.moving_average("sales", 7)?;
//! let report = analysis.detect_seasonality("sales")?;
//! println!("{:?} {:?}", ma7.last(), report.get_label("weekly"));
//! # Ok::<(), tsanalysis::Error>(())
//! ```

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod io;
pub mod na;
pub mod temporal;
pub mod vis;

// Re-export commonly used types
pub use analysis::{
    MovingAverage, MovingAverageEngine, SeasonalityDetector, SeasonalityReport,
    TimeSeriesAnalysis, TrendData,
};
pub use config::{AnalysisConfig, LoaderConfig, TrendConfig};
pub use dataset::{Column, Dataset};
pub use error::{Error, Result};
pub use na::NA;
pub use temporal::{SeasonalPeriod, Timestamp};
pub use vis::{AsciiTrendPlotter, TrendPlotter};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
