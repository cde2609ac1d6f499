use std::fmt::{self, Debug, Display};

use serde::{Serialize, Serializer};

/// 欠損値（NA, Not Available）を表現する型
///
/// 列の値や移動平均の結果は「値がない」位置を含み得るため、
/// すべての系列は `NA<f64>` の並びとして保持します。
#[derive(Clone, Copy)]
pub enum NA<T> {
    /// 値が存在する場合
    Value(T),
    /// 値が存在しない場合
    NA,
}

impl<T> NA<T> {
    /// 欠損かどうかをチェック
    pub fn is_na(&self) -> bool {
        matches!(self, NA::NA)
    }

    /// 値があるかどうかをチェック
    pub fn is_value(&self) -> bool {
        !self.is_na()
    }

    /// 値を取得（存在する場合）
    pub fn value(&self) -> Option<&T> {
        match self {
            NA::Value(v) => Some(v),
            NA::NA => None,
        }
    }

    /// 値を変換する
    pub fn map<U, F>(&self, f: F) -> NA<U>
    where
        F: FnOnce(&T) -> U,
    {
        match self {
            NA::Value(v) => NA::Value(f(v)),
            NA::NA => NA::NA,
        }
    }
}

impl<T: Copy> NA<T> {
    /// `Option<T>` として取り出す
    pub fn get(&self) -> Option<T> {
        match self {
            NA::Value(v) => Some(*v),
            NA::NA => None,
        }
    }
}

impl NA<f64> {
    /// 浮動小数点値から作成する。NaNは欠損として扱う
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            NA::NA
        } else {
            NA::Value(value)
        }
    }
}

/// 欠損を除いた値だけを順序を保って取り出す
pub fn drop_na(values: &[NA<f64>]) -> Vec<f64> {
    values.iter().filter_map(NA::get).collect()
}

// From実装：T型からNA<T>への自動変換
impl<T> From<T> for NA<T> {
    fn from(value: T) -> Self {
        NA::Value(value)
    }
}

// From実装：Option<T>からNA<T>への自動変換
impl<T> From<Option<T>> for NA<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => NA::Value(v),
            None => NA::NA,
        }
    }
}

impl<T> From<NA<T>> for Option<T> {
    fn from(na: NA<T>) -> Self {
        match na {
            NA::Value(v) => Some(v),
            NA::NA => None,
        }
    }
}

impl<T: Debug> Debug for NA<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NA::Value(v) => write!(f, "{:?}", v),
            NA::NA => write!(f, "NA"),
        }
    }
}

impl<T: Display> Display for NA<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NA::Value(v) => write!(f, "{}", v),
            NA::NA => write!(f, "NA"),
        }
    }
}

impl<T: PartialEq> PartialEq for NA<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NA::Value(a), NA::Value(b)) => a == b,
            (NA::NA, NA::NA) => true,
            _ => false,
        }
    }
}

// JSONではNAをnullとして出力する
impl<T: Serialize> Serialize for NA<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            NA::Value(v) => serializer.serialize_some(v),
            NA::NA => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_f64_treats_nan_as_na() {
        assert!(NA::from_f64(f64::NAN).is_na());
        assert_eq!(NA::from_f64(1.5), NA::Value(1.5));
    }

    #[test]
    fn test_drop_na_keeps_order() {
        let values = vec![NA::Value(3.0), NA::NA, NA::Value(1.0), NA::NA, NA::Value(2.0)];
        assert_eq!(drop_na(&values), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_serialize_as_null() {
        let values = vec![NA::Value(1.0), NA::NA];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, "[1.0,null]");
    }
}
