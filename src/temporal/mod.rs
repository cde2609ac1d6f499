//! 日付インデックスのためのモジュール
//!
//! 日付文字列の解析と、季節性検出で使う周期の定義を提供します。

mod period;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

pub use self::period::SeasonalPeriod;

/// データセットの行に付与される時刻
pub type Timestamp = NaiveDateTime;

/// 日時として解釈を試みる書式（`%.f` は小数秒がなくても一致する）
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// 日付のみとして解釈を試みる書式
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// 日付文字列を時刻に変換する
///
/// `format` が指定された場合はその書式のみを使います。日付だけの書式であれば
/// 0時0分0秒として扱います。指定がない場合はISO形式に近い書式を順に試し、
/// 最後にRFC 3339（UTCに変換）を試します。
pub fn parse_timestamp(s: &str, format: Option<&str>) -> Result<Timestamp, chrono::ParseError> {
    let s = s.trim();

    if let Some(fmt) = format {
        return match NaiveDateTime::parse_from_str(s, fmt) {
            Ok(dt) => Ok(dt),
            Err(dt_err) => NaiveDate::parse_from_str(s, fmt)
                .map(at_midnight)
                .map_err(|_| dt_err),
        };
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(at_midnight(date));
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    DateTime::parse_from_rfc3339(s).map(|dt| dt.naive_utc())
}

fn at_midnight(date: NaiveDate) -> Timestamp {
    date.and_time(NaiveTime::default())
}
