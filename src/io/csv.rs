use csv::{ReaderBuilder, StringRecord};
use log::warn;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::config::LoaderConfig;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::io::{Record, TabularReader};

/// CSVを名前付きフィールドの行として読み込むリーダー
///
/// 1行目をヘッダーとして扱います。前後の空白は除去し、列数が足りない行は
/// 欠けたフィールドを含まない行として返します。ヘッダーより多いセルは空であれば
/// 無視し、値が入っていればエラーにします。
pub struct CsvTableReader<R: Read> {
    reader: csv::Reader<R>,
    headers: Option<Vec<String>>,
    record: StringRecord,
    row: usize,
}

impl CsvTableReader<File> {
    /// ファイルパスからリーダーを作成
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(Error::Io)?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> CsvTableReader<R> {
    /// 任意の `Read` からリーダーを作成
    pub fn from_reader(reader: R) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        Self {
            reader,
            headers: None,
            record: StringRecord::new(),
            row: 0,
        }
    }

    fn headers(&mut self) -> Result<&[String]> {
        if self.headers.is_none() {
            let headers = self
                .reader
                .headers()
                .map_err(Error::Csv)?
                .iter()
                .map(|h| h.to_string())
                .collect();
            self.headers = Some(headers);
        }
        Ok(self.headers.as_deref().unwrap_or(&[]))
    }
}

impl<R: Read> TabularReader for CsvTableReader<R> {
    fn field_names(&mut self) -> Result<Vec<String>> {
        Ok(self.headers()?.to_vec())
    }

    fn next_record(&mut self) -> Option<Result<Record>> {
        if let Err(e) = self.headers() {
            return Some(Err(e));
        }

        match self.reader.read_record(&mut self.record) {
            Ok(true) => {
                let row = self.row;
                self.row += 1;

                let headers = self.headers.as_deref().unwrap_or(&[]);
                if let Some((index, extra)) = self
                    .record
                    .iter()
                    .enumerate()
                    .skip(headers.len())
                    .find(|(_, v)| !v.is_empty())
                {
                    warn!(
                        "ヘッダーにないセルに値があります: 行 {}, {}番目のセル, 値 '{}'",
                        row,
                        index + 1,
                        extra
                    );
                    return Some(Err(Error::parse(
                        row,
                        format!("#{}", index + 1),
                        extra,
                        format!("ヘッダーの列数 ({}) を超えるセルです", headers.len()),
                    )));
                }

                let record = headers
                    .iter()
                    .zip(self.record.iter())
                    .map(|(h, v)| (h.clone(), v.to_string()))
                    .collect();
                Some(Ok(record))
            }
            Ok(false) => None,
            Err(e) => Some(Err(Error::Csv(e))),
        }
    }
}

/// CSVファイルからデータセットを読み込む
pub fn read_csv<P: AsRef<Path>>(path: P, config: &LoaderConfig) -> Result<Dataset> {
    let mut reader = CsvTableReader::from_path(path)?;
    Dataset::from_reader(&mut reader, config)
}

/// 任意の `Read` のCSVからデータセットを読み込む
pub fn read_csv_from_reader<R: Read>(reader: R, config: &LoaderConfig) -> Result<Dataset> {
    let mut reader = CsvTableReader::from_reader(reader);
    Dataset::from_reader(&mut reader, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_reader_trims_and_handles_short_rows() {
        let data = "date, sales , visits\n2023-01-01, 10 ,5\n2023-01-02,20\n";
        let mut reader = CsvTableReader::from_reader(data.as_bytes());

        assert_eq!(reader.field_names().unwrap(), vec!["date", "sales", "visits"]);

        let first = reader.next_record().unwrap().unwrap();
        assert_eq!(first["sales"], "10");
        assert_eq!(first["visits"], "5");

        let second = reader.next_record().unwrap().unwrap();
        assert_eq!(second["sales"], "20");
        assert!(!second.contains_key("visits"));

        assert!(reader.next_record().is_none());
    }

    #[test]
    fn test_next_record_without_field_names_call() {
        let mut reader = CsvTableReader::from_reader("date,x\n2023-01-01,1\n".as_bytes());
        let record = reader.next_record().unwrap().unwrap();
        assert_eq!(record["x"], "1");
    }

    #[test]
    fn test_extra_cells_beyond_header() {
        let data = "date,x\n2023-01-01,1,\n2023-01-02,2,99\n";
        let mut reader = CsvTableReader::from_reader(data.as_bytes());

        // 末尾の空セルは無視する
        let first = reader.next_record().unwrap().unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first["x"], "1");

        match reader.next_record().unwrap() {
            Err(Error::Parse {
                row, field, value, ..
            }) => {
                assert_eq!(row, 1);
                assert_eq!(field, "#3");
                assert_eq!(value, "99");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_read_csv_rejects_extra_values() {
        let data = "date,x\n2023-01-01,1\n2023-01-02,2,3\n";
        let result = read_csv_from_reader(data.as_bytes(), &LoaderConfig::default());
        assert!(matches!(result, Err(Error::Parse { row: 1, .. })));
    }
}
