use std::collections::HashSet;

use log::{debug, warn};

use crate::config::LoaderConfig;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::io::TabularReader;
use crate::na::NA;
use crate::temporal::{parse_timestamp, Timestamp};

impl Dataset {
    /// 表形式のリーダーからデータセットを構築する
    ///
    /// `config.date_field` のフィールドを時刻として解析し、それ以外のすべての
    /// フィールドを数値列として読み込みます。行の順序はそのまま保持されます。
    ///
    /// # エラー
    /// - 日付フィールドが存在しない場合は `Error::Schema`
    /// - 日付を解析できない場合は `Error::Parse`（回復は行わない）
    /// - `strict_numeric` が有効で数値を解析できない場合は `Error::Parse`
    pub fn from_reader<R: TabularReader + ?Sized>(
        reader: &mut R,
        config: &LoaderConfig,
    ) -> Result<Self> {
        let field_names = reader.field_names()?;

        let mut seen = HashSet::with_capacity(field_names.len());
        for name in &field_names {
            if !seen.insert(name.as_str()) {
                return Err(Error::DuplicateColumnName(name.clone()));
            }
        }

        let date_field = config.date_field.as_str();
        if !seen.contains(date_field) {
            return Err(Error::Schema(format!(
                "日付フィールド '{}' が見つかりません（利用可能なフィールド: {}）",
                date_field,
                field_names.join(", ")
            )));
        }

        let value_fields: Vec<&String> =
            field_names.iter().filter(|name| *name != date_field).collect();

        let mut timestamps: Vec<Timestamp> = Vec::new();
        let mut columns: Vec<Vec<NA<f64>>> = vec![Vec::new(); value_fields.len()];
        let mut lenient_count = 0usize;

        let mut row = 0usize;
        while let Some(record) = reader.next_record() {
            let record = record?;

            let raw_date = record.get(date_field).map(String::as_str).unwrap_or("");
            let ts = parse_timestamp(raw_date, config.date_format.as_deref())
                .map_err(|e| Error::parse(row, date_field, raw_date, e))?;
            timestamps.push(ts);

            for (field, values) in value_fields.iter().zip(columns.iter_mut()) {
                let raw = record.get(field.as_str()).map(String::as_str);
                let value = match raw {
                    None => NA::NA,
                    Some(raw) if config.is_na_token(raw) => NA::NA,
                    Some(raw) => match raw.trim().parse::<f64>() {
                        Ok(v) => NA::from_f64(v),
                        Err(e) if config.strict_numeric => {
                            return Err(Error::parse(row, field.as_str(), raw, e));
                        }
                        Err(_) => {
                            warn!(
                                "数値として解析できないため欠損として扱います: 行 {}, フィールド '{}', 値 '{}'",
                                row, field, raw
                            );
                            lenient_count += 1;
                            NA::NA
                        }
                    },
                };
                values.push(value);
            }

            row += 1;
        }

        debug!(
            "データセットを読み込みました: {} 行, {} 列, 日付フィールド '{}', 欠損扱いにした不正値 {} 件",
            row,
            value_fields.len(),
            date_field,
            lenient_count
        );

        let columns = value_fields
            .into_iter()
            .cloned()
            .zip(columns)
            .collect();

        Dataset::new(timestamps, columns)
    }

    /// 既定の設定で、指定した日付フィールドを使って読み込む
    pub fn load<R: TabularReader + ?Sized>(reader: &mut R, date_field: &str) -> Result<Self> {
        Self::from_reader(reader, &LoaderConfig::with_date_field(date_field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryTable;
    use chrono::NaiveDate;

    #[test]
    fn test_load_preserves_row_order() {
        let mut table = MemoryTable::new(["date", "sales"])
            .with_row(["2023-01-03", "3"])
            .with_row(["2023-01-01", "1"])
            .with_row(["2023-01-03", "2"]);

        let ds = Dataset::load(&mut table, "date").unwrap();
        let days: Vec<NaiveDate> = ds.timestamps().iter().map(|t| t.date()).collect();
        assert_eq!(
            days,
            vec![
                NaiveDate::from_ymd_opt(2023, 1, 3).unwrap(),
                NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2023, 1, 3).unwrap(),
            ]
        );
        assert_eq!(
            ds.column("sales").unwrap().values(),
            &[NA::Value(3.0), NA::Value(1.0), NA::Value(2.0)]
        );
        assert!(!ds.contains_column("date"));
    }

    #[test]
    fn test_missing_date_field() {
        let mut table = MemoryTable::new(["day", "sales"]).with_row(["2023-01-01", "1"]);
        let err = Dataset::load(&mut table, "date").unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn test_bad_date_is_propagated() {
        let mut table = MemoryTable::new(["date", "sales"])
            .with_row(["2023-01-01", "1"])
            .with_row(["yesterday", "2"]);
        match Dataset::load(&mut table, "date").unwrap_err() {
            Error::Parse { row, field, value, .. } => {
                assert_eq!(row, 1);
                assert_eq!(field, "date");
                assert_eq!(value, "yesterday");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_date_value_is_parse_error() {
        let mut table = MemoryTable::new(["sales", "date"]).with_row(["1"]);
        assert!(matches!(
            Dataset::load(&mut table, "date"),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn test_na_tokens_and_short_rows() {
        let mut table = MemoryTable::new(["date", "a", "b"])
            .with_row(["2023-01-01", "NA", "1.5"])
            .with_row(["2023-01-02", "", "NaN"])
            .with_row(["2023-01-03", "4"]);

        let ds = Dataset::load(&mut table, "date").unwrap();
        assert_eq!(
            ds.column("a").unwrap().values(),
            &[NA::NA, NA::NA, NA::Value(4.0)]
        );
        assert_eq!(
            ds.column("b").unwrap().values(),
            &[NA::Value(1.5), NA::NA, NA::NA]
        );
    }

    #[test]
    fn test_strict_numeric() {
        let mut table = MemoryTable::new(["date", "store"]).with_row(["2023-01-01", "tokyo"]);
        assert!(matches!(
            Dataset::load(&mut table, "date"),
            Err(Error::Parse { .. })
        ));

        let mut table = MemoryTable::new(["date", "store"]).with_row(["2023-01-01", "tokyo"]);
        let config = LoaderConfig {
            strict_numeric: false,
            ..LoaderConfig::default()
        };
        let ds = Dataset::from_reader(&mut table, &config).unwrap();
        assert!(ds.column("store").unwrap().values()[0].is_na());
    }

    #[test]
    fn test_custom_date_format() {
        let mut table = MemoryTable::new(["day", "x"]).with_row(["31/01/2023", "1"]);
        let config = LoaderConfig {
            date_field: "day".to_string(),
            date_format: Some("%d/%m/%Y".to_string()),
            ..LoaderConfig::default()
        };
        let ds = Dataset::from_reader(&mut table, &config).unwrap();
        assert_eq!(
            ds.timestamps()[0].date(),
            NaiveDate::from_ymd_opt(2023, 1, 31).unwrap()
        );
    }

    #[test]
    fn test_header_only_input() {
        let mut table = MemoryTable::new(["date", "x"]);
        let ds = Dataset::load(&mut table, "date").unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.column_names(), &["x".to_string()]);
    }
}
