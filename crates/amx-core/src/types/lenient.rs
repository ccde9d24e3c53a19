//! 형태가 어긋난 필드를 누락으로 읽는 serde 헬퍼.
//!
//! 거래소 응답은 레코드마다 필드 타입이 일정하지 않습니다.
//! 필드 하나가 예상과 다르다고 응답 전체를 버리지 않도록,
//! `#[serde(default, deserialize_with = "lenient::deserialize")]`로 지정한
//! 필드는 변환에 실패하면 `None`이 됩니다.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// 값을 `T`로 변환하고, 실패하면 `None`을 반환합니다.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "super::deserialize")]
        name: Option<String>,
        #[serde(default, deserialize_with = "super::deserialize")]
        nested: Option<Vec<u32>>,
    }

    #[test]
    fn test_wrong_shape_becomes_none() {
        let sample: Sample = serde_json::from_str(r#"{"name": 42, "nested": "oops"}"#).unwrap();
        assert!(sample.name.is_none());
        assert!(sample.nested.is_none());
    }

    #[test]
    fn test_missing_and_null_become_none() {
        let sample: Sample = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert!(sample.name.is_none());
        assert!(sample.nested.is_none());
    }

    #[test]
    fn test_valid_values_kept() {
        let sample: Sample = serde_json::from_str(r#"{"name": "AMB1", "nested": [1, 2]}"#).unwrap();
        assert_eq!(sample.name.as_deref(), Some("AMB1"));
        assert_eq!(sample.nested, Some(vec![1, 2]));
    }
}
