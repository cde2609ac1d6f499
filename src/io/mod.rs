//! 表形式の入力ソース
//!
//! データセットの読み込みは「名前付きフィールドの行」を列挙できる任意のリーダーを
//! 受け付けます。CSVとメモリ上の行のための実装を提供します。

pub mod csv;

use std::collections::HashMap;
use std::collections::VecDeque;

use crate::error::Result;

pub use self::csv::{read_csv, read_csv_from_reader, CsvTableReader};

/// フィールド名から値への対応（1行分）
pub type Record = HashMap<String, String>;

/// 行を名前付きフィールドとして列挙できるリーダー
pub trait TabularReader {
    /// 入力に含まれるフィールド名（入力上の順序）
    fn field_names(&mut self) -> Result<Vec<String>>;

    /// 次の行を返す。終端に達した場合はNone
    fn next_record(&mut self) -> Option<Result<Record>>;
}

/// メモリ上の行を返すリーダー
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    field_names: Vec<String>,
    rows: VecDeque<Record>,
}

impl MemoryTable {
    /// フィールド名を指定して空のテーブルを作成
    pub fn new<I, S>(field_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field_names: field_names.into_iter().map(Into::into).collect(),
            rows: VecDeque::new(),
        }
    }

    /// フィールド名の順に並んだ値から行を追加
    ///
    /// 値がフィールド数より少ない場合、残りのフィールドはその行に含まれない
    pub fn push_row<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let record = self
            .field_names
            .iter()
            .cloned()
            .zip(values.into_iter().map(Into::into))
            .collect();
        self.rows.push_back(record);
    }

    /// 行を追加したテーブルを返す
    pub fn with_row<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(values);
        self
    }

    /// 名前付きの行をそのまま追加
    pub fn push_record(&mut self, record: Record) {
        self.rows.push_back(record);
    }

    /// 残りの行数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl TabularReader for MemoryTable {
    fn field_names(&mut self) -> Result<Vec<String>> {
        Ok(self.field_names.clone())
    }

    fn next_record(&mut self) -> Option<Result<Record>> {
        self.rows.pop_front().map(Ok)
    }
}
