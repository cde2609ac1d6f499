use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

/// 季節性検出で評価する周期を表す列挙型
///
/// 日次データを前提とし、各周期は行位置のラグに対応します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalPeriod {
    /// 1日（ラグ1）
    Daily,
    /// 1週間（ラグ7）
    Weekly,
    /// 1ヶ月（ラグ30として概算）
    Monthly,
}

impl SeasonalPeriod {
    /// 評価対象となるすべての周期（ラグの昇順）
    pub const ALL: [SeasonalPeriod; 3] = [
        SeasonalPeriod::Daily,
        SeasonalPeriod::Weekly,
        SeasonalPeriod::Monthly,
    ];

    /// 行位置のラグ
    pub fn lag(&self) -> usize {
        match self {
            SeasonalPeriod::Daily => 1,
            SeasonalPeriod::Weekly => 7,
            SeasonalPeriod::Monthly => 30,
        }
    }

    /// レポートで使うラベル
    pub fn label(&self) -> &'static str {
        match self {
            SeasonalPeriod::Daily => "daily",
            SeasonalPeriod::Weekly => "weekly",
            SeasonalPeriod::Monthly => "monthly",
        }
    }
}

impl fmt::Display for SeasonalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SeasonalPeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "D" | "DAY" | "DAILY" => Ok(SeasonalPeriod::Daily),
            "W" | "WEEK" | "WEEKLY" => Ok(SeasonalPeriod::Weekly),
            "M" | "MONTH" | "MONTHLY" => Ok(SeasonalPeriod::Monthly),
            _ => Err(Error::InvalidParameter(format!(
                "未知の周期です: '{}'",
                s
            ))),
        }
    }
}
