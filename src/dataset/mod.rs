//! 日付インデックス付きのデータセット
//!
//! `Dataset` は読み込み時の行順を保持した時刻の並びと、それに位置で対応する
//! 名前付き数値列の集合です。構築後は変更されません。

mod loader;

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::na::NA;
use crate::temporal::Timestamp;

/// 日付インデックス付きの数値列の表
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// 時刻（読み込み順。ソート・重複除去はしない）
    timestamps: Vec<Timestamp>,

    /// 列名（読み込み順）
    column_names: Vec<String>,

    /// 列名から値の並びへの対応
    columns: HashMap<String, Vec<NA<f64>>>,
}

/// データセット内の1列への参照
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column<'a> {
    name: &'a str,
    values: &'a [NA<f64>],
}

impl<'a> Column<'a> {
    /// 列名を取得
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// 値を取得
    pub fn values(&self) -> &'a [NA<f64>] {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Dataset {
    /// 解析済みの時刻と列から作成する
    ///
    /// すべての列の長さは時刻の数と一致している必要があります。
    pub fn new(timestamps: Vec<Timestamp>, columns: Vec<(String, Vec<NA<f64>>)>) -> Result<Self> {
        let mut column_names = Vec::with_capacity(columns.len());
        let mut map = HashMap::with_capacity(columns.len());

        for (name, values) in columns {
            if values.len() != timestamps.len() {
                return Err(Error::InconsistentRowCount {
                    expected: timestamps.len(),
                    found: values.len(),
                });
            }
            if map.contains_key(&name) {
                return Err(Error::DuplicateColumnName(name));
            }
            column_names.push(name.clone());
            map.insert(name, values);
        }

        Ok(Dataset {
            timestamps,
            column_names,
            columns: map,
        })
    }

    /// 行数
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// 時刻の並びを取得
    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    /// 列名を読み込み順で取得
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// 列が存在するかどうか
    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// 列を取得
    pub fn column(&self, name: &str) -> Option<Column<'_>> {
        self.columns
            .get_key_value(name)
            .map(|(name, values)| Column {
                name: name.as_str(),
                values: values.as_slice(),
            })
    }

    /// 列名の集合
    pub fn column_set(&self) -> HashSet<String> {
        self.column_names.iter().cloned().collect()
    }

    /// 最小・最大の時刻。行がない場合はNone
    pub fn date_range(&self) -> Option<(Timestamp, Timestamp)> {
        let min = self.timestamps.iter().min()?;
        let max = self.timestamps.iter().max()?;
        Some((*min, *max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(2023, 1, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_new_validates_lengths() {
        let result = Dataset::new(
            vec![day(1), day(2)],
            vec![("x".to_string(), vec![NA::Value(1.0)])],
        );
        assert!(matches!(
            result,
            Err(Error::InconsistentRowCount {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_new_rejects_duplicate_columns() {
        let result = Dataset::new(
            vec![day(1)],
            vec![
                ("x".to_string(), vec![NA::Value(1.0)]),
                ("x".to_string(), vec![NA::Value(2.0)]),
            ],
        );
        assert!(matches!(result, Err(Error::DuplicateColumnName(name)) if name == "x"));
    }

    #[test]
    fn test_accessors() {
        let ds = Dataset::new(
            vec![day(3), day(1), day(2)],
            vec![
                ("b".to_string(), vec![NA::Value(1.0), NA::NA, NA::Value(3.0)]),
                ("a".to_string(), vec![NA::Value(0.0); 3]),
            ],
        )
        .unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.column_names(), &["b".to_string(), "a".to_string()]);
        assert!(ds.contains_column("a"));
        assert!(ds.column("missing").is_none());

        let b = ds.column("b").unwrap();
        assert_eq!(b.name(), "b");
        assert_eq!(b.len(), 3);
        assert!(b.values()[1].is_na());

        assert_eq!(ds.date_range(), Some((day(1), day(3))));
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::new(Vec::new(), Vec::new()).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.date_range(), None);
    }
}
