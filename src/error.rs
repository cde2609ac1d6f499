use thiserror::Error;

/// エラー型の定義
#[derive(Error, Debug)]
pub enum Error {
    /// 日付フィールドなど、必須のフィールドが入力に存在しない
    #[error("スキーマエラー: {0}")]
    Schema(String),

    /// セル値の解析に失敗した（日付・数値）
    #[error("解析エラー: 行 {row}, フィールド '{field}', 値 '{value}': {reason}")]
    Parse {
        row: usize,
        field: String,
        value: String,
        reason: String,
    },

    #[error("列が見つかりません: {0}")]
    UnknownColumn(String),

    #[error("無効なパラメータです: {0}")]
    InvalidParameter(String),

    #[error("行数が一致しません: 期待値 {expected}, 実際 {found}")]
    InconsistentRowCount { expected: usize, found: usize },

    #[error("列名が重複しています: {0}")]
    DuplicateColumnName(String),

    #[error("設定エラー: {0}")]
    Configuration(String),

    #[error("入出力エラー")]
    Io(#[source] std::io::Error),

    #[error("CSVエラー")]
    Csv(#[source] csv::Error),

    #[error("JSONエラー")]
    Json(#[source] serde_json::Error),
}

/// Resultの型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// 解析エラーを作成するヘルパー
    pub(crate) fn parse(
        row: usize,
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Error::Parse {
            row,
            field: field.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
