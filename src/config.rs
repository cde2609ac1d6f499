//! 設定モジュール
//!
//! 設定は「既定値 → 設定ファイル（TOML/YAML）→ 環境変数」の順に上書きされます。

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 既定の日付フィールド名
pub const DEFAULT_DATE_FIELD: &str = "date";

/// 欠損として扱う既定の文字列
const DEFAULT_NA_VALUES: &[&str] = &["", "NA", "NaN", "nan", "null", "NULL", "N/A"];

/// データ読み込みの設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// 日付として扱うフィールド名
    pub date_field: String,
    /// 日付の書式（chronoの書式文字列）。Noneの場合はISO形式に近い書式を自動判定
    pub date_format: Option<String>,
    /// 欠損として扱う文字列
    pub na_values: Vec<String>,
    /// trueの場合、数値として解析できないセルは解析エラーとなる。
    /// falseの場合は警告を出して欠損として扱う
    pub strict_numeric: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            date_field: DEFAULT_DATE_FIELD.to_string(),
            date_format: None,
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
            strict_numeric: true,
        }
    }
}

impl LoaderConfig {
    /// 日付フィールド名だけを変更した設定を作成
    pub fn with_date_field(date_field: impl Into<String>) -> Self {
        Self {
            date_field: date_field.into(),
            ..Self::default()
        }
    }

    /// 欠損を表す文字列かどうか
    pub fn is_na_token(&self, value: &str) -> bool {
        let value = value.trim();
        self.na_values.iter().any(|na| na == value)
    }
}

/// トレンド表示に使う移動平均の窓幅
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    pub short_window: usize,
    pub long_window: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            short_window: 7,
            long_window: 30,
        }
    }
}

/// 解析全体の設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub loader: LoaderConfig,
    pub trend: TrendConfig,
}

impl AnalysisConfig {
    /// 設定ファイル（任意）と環境変数から設定を読み込む
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => Self::load_from_file(p)?,
            None => Self::default(),
        };
        config.apply_env_overrides()
    }

    /// 拡張子に応じてYAMLまたはTOMLの設定ファイルを読み込む
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Configuration(format!(
                "設定ファイルが見つかりません: {}",
                path.display()
            )));
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!(
                "設定ファイルを読み込めません {}: {}",
                path.display(),
                e
            ))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&contents),
            Some("toml") => Self::from_toml(&contents),
            _ => Err(Error::Configuration(format!(
                "未対応の設定ファイル形式です: {}",
                path.display()
            ))),
        }
    }

    /// TOML文字列から読み込む
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)
            .map_err(|e| Error::Configuration(format!("TOMLの解析に失敗しました: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// YAML文字列から読み込む
    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(contents)
            .map_err(|e| Error::Configuration(format!("YAMLの解析に失敗しました: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// 環境変数による上書きを適用する
    pub fn apply_env_overrides(self) -> Result<Self> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// 任意の参照関数による上書きを適用する
    ///
    /// 対応するキー: `TSA_DATE_FIELD`, `TSA_DATE_FORMAT`, `TSA_STRICT_NUMERIC`,
    /// `TSA_SHORT_WINDOW`, `TSA_LONG_WINDOW`
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(field) = lookup("TSA_DATE_FIELD") {
            self.loader.date_field = field;
        }

        if let Some(format) = lookup("TSA_DATE_FORMAT") {
            self.loader.date_format = Some(format);
        }

        if let Some(strict) = lookup("TSA_STRICT_NUMERIC") {
            self.loader.strict_numeric = strict.parse().map_err(|e| {
                Error::Configuration(format!("TSA_STRICT_NUMERIC が無効です: {}", e))
            })?;
        }

        if let Some(window) = lookup("TSA_SHORT_WINDOW") {
            self.trend.short_window = window.parse().map_err(|e| {
                Error::Configuration(format!("TSA_SHORT_WINDOW が無効です: {}", e))
            })?;
        }

        if let Some(window) = lookup("TSA_LONG_WINDOW") {
            self.trend.long_window = window.parse().map_err(|e| {
                Error::Configuration(format!("TSA_LONG_WINDOW が無効です: {}", e))
            })?;
        }

        self.validate()?;
        Ok(self)
    }

    /// 設定値を検証する
    pub fn validate(&self) -> Result<()> {
        if self.loader.date_field.trim().is_empty() {
            return Err(Error::Configuration(
                "date_field は空にできません".to_string(),
            ));
        }
        if self.trend.short_window == 0 || self.trend.long_window == 0 {
            return Err(Error::Configuration(format!(
                "移動平均の窓幅は1以上である必要があります: short={}, long={}",
                self.trend.short_window, self.trend.long_window
            )));
        }
        if self.trend.short_window == self.trend.long_window {
            return Err(Error::Configuration(format!(
                "short_window と long_window は異なる値である必要があります: {}",
                self.trend.short_window
            )));
        }
        Ok(())
    }
}
