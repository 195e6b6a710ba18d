//! Нестрогая (де)сериализация для JSON-сервисов RS.ge.
//!
//! REST API возвращают `null` вместо пустых значений и иногда присылают числа
//! строками. Каждое поле JSON-модели идёт через один из этих хелперов вместе
//! с `#[serde(default)]`: отсутствующее, `null` или неожиданное значение
//! превращается в нулевое, а не ломает разбор всего ответа.

use serde::de::DeserializeOwned;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

pub fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(value_to_int(&Value::deserialize(deserializer)?))
}

pub fn int32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let value = value_to_int(&Value::deserialize(deserializer)?);
    Ok(i32::try_from(value).unwrap_or_default())
}

pub fn opt_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(value_to_int(&other)),
    })
}

pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(value_to_float(&Value::deserialize(deserializer)?))
}

pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(value_to_string(&Value::deserialize(deserializer)?))
}

/// `true`, `"true"`, `1` → true; всё остальное false
pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(value_to_flag(&Value::deserialize(deserializer)?))
}

/// Массив, в котором пропускаются элементы, не подходящие под `T`;
/// `null` и не-массив дают пустой список
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decodable(&value).map(|(item, _)| item).collect())
}

/// Вложенный объект; `null`, строка или массив вместо объекта дают `T::default()`
pub fn section<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(if value.is_object() { decode(&value) } else { T::default() })
}

/// eAPI принимает флаги строками "true" / "false"
pub fn flag_as_string<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "true" } else { "false" })
}

/// Списки, которые заполняет сервер, всегда отправляются пустыми
pub fn empty_list<T, S: Serializer>(_value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_seq(Some(0))?.end()
}

/// Модель из JSON; значение не той формы (например, строка вместо объекта)
/// даёт модель по умолчанию
pub fn decode<T: DeserializeOwned + Default>(value: &Value) -> T {
    T::deserialize(value).unwrap_or_default()
}

/// Элементы массива, которые декодируются в `T`, вместе с исходным JSON
pub fn decodable<'a, T>(value: &'a Value) -> impl Iterator<Item = (T, &'a Value)> + 'a
where
    T: DeserializeOwned + 'a,
{
    value
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|item| T::deserialize(item).ok().map(|decoded| (decoded, item)))
}

/// Целое без подстановки нуля: `None` для `null`, отсутствующего значения и мусора
pub fn value_to_opt_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}

pub fn value_to_int(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or_default(),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
                .unwrap_or_default()
        }
        Value::Bool(b) => i64::from(*b),
        _ => 0,
    }
}

pub fn value_to_float(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    }
}

pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

pub fn value_to_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true") || s.trim() == "1",
        Value::Number(n) => n.as_i64() == Some(1),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Default, Deserialize, Serialize)]
    struct Probe {
        #[serde(default, deserialize_with = "int")]
        id: i64,
        #[serde(default, deserialize_with = "float")]
        amount: f64,
        #[serde(default, deserialize_with = "string")]
        name: String,
        #[serde(default, deserialize_with = "opt_int")]
        parent: Option<i64>,
        #[serde(default, deserialize_with = "flag", serialize_with = "flag_as_string")]
        foreign: bool,
        #[serde(default, deserialize_with = "list")]
        items: Vec<i64>,
    }

    #[test]
    fn test_nulls_decode_to_zero_values() {
        let probe: Probe = serde_json::from_value(json!({
            "id": null, "amount": null, "name": null, "parent": null, "foreign": null, "items": null
        }))
        .unwrap();
        assert_eq!(probe.id, 0);
        assert_eq!(probe.amount, 0.0);
        assert_eq!(probe.name, "");
        assert_eq!(probe.parent, None);
        assert!(!probe.foreign);
        assert!(probe.items.is_empty());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let probe: Probe = serde_json::from_value(json!({})).unwrap();
        assert_eq!(probe.id, 0);
        assert_eq!(probe.parent, None);
    }

    #[test]
    fn test_numbers_as_strings_and_strings_as_numbers() {
        let probe: Probe = serde_json::from_value(json!({
            "id": "1103", "amount": "274.58", "name": 206322102, "parent": "7", "foreign": "true"
        }))
        .unwrap();
        assert_eq!(probe.id, 1103);
        assert_eq!(probe.amount, 274.58);
        assert_eq!(probe.name, "206322102");
        assert_eq!(probe.parent, Some(7));
        assert!(probe.foreign);
    }

    #[derive(Debug, Default, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "int")]
        id: i64,
    }

    #[derive(Debug, Default, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "string")]
        name: String,
        #[serde(default, deserialize_with = "list")]
        rows: Vec<Row>,
        #[serde(default, deserialize_with = "section")]
        inner: Row,
    }

    #[test]
    fn test_bad_rows_are_skipped_not_the_record() {
        let holder: Holder = decode(&json!({
            "name": "ok",
            "rows": [{"id": 1}, null, "junk", {"id": "2"}]
        }));
        assert_eq!(holder.name, "ok");
        assert_eq!(holder.rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_section_of_wrong_shape_is_empty() {
        for inner in [json!(""), json!([]), json!(null), json!(5)] {
            let holder: Holder = decode(&json!({"name": "kept", "inner": inner, "rows": "none"}));
            assert_eq!(holder.name, "kept");
            assert_eq!(holder.inner.id, 0);
            assert!(holder.rows.is_empty());
        }
        let holder: Holder = decode(&json!({"inner": {"id": 9}}));
        assert_eq!(holder.inner.id, 9);
    }

    #[test]
    fn test_opt_int_keeps_missing_apart_from_zero() {
        assert_eq!(value_to_opt_int(&json!(0)), Some(0));
        assert_eq!(value_to_opt_int(&json!("-3")), Some(-3));
        assert_eq!(value_to_opt_int(&json!(null)), None);
        assert_eq!(value_to_opt_int(&json!("abc")), None);
        assert_eq!(value_to_opt_int(&json!({})["CODE"]), None);
    }

    #[test]
    fn test_decode_wrong_shape_gives_default() {
        let probe: Probe = decode(&json!("not an object"));
        assert_eq!(probe.id, 0);
        let probe: Probe = decode(&json!({"id": 5}));
        assert_eq!(probe.id, 5);
    }

    #[test]
    fn test_flag_serializes_as_string() {
        let probe = Probe {
            foreign: true,
            ..Default::default()
        };
        let value = serde_json::to_value(&probe).unwrap();
        assert_eq!(value["foreign"], json!("true"));
    }
}
