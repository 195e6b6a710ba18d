//! Таблицы `Fields` / `Rows` из списочных методов eAPI.
//!
//! ```json
//! {"DATA": {"Data": {"Fields": ["ID", "INV_NUMBER"], "Rows": [[1, "ეა-1"]]}}}
//! ```

use serde_json::{Map, Value};

/// Каждая строка вместе с именами полей превращается в JSON-объект.
/// Строки длиннее или короче `Fields` обрезаются до общей длины.
pub fn zip_rows(fields: &Value, rows: &Value) -> Vec<Value> {
    let fields: Vec<&str> = fields
        .as_array()
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    rows.as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(Value::as_array)
                .map(|row| {
                    let object: Map<String, Value> = fields
                        .iter()
                        .zip(row.iter())
                        .map(|(name, value)| (name.to_string(), value.clone()))
                        .collect();
                    Value::Object(object)
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Строки таблицы из `DATA.Data` ответа eAPI
pub fn table_rows(response: &Value) -> Vec<Value> {
    let inner = &response["DATA"]["Data"];
    zip_rows(&inner["Fields"], &inner["Rows"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_zip_rows() {
        let response = json!({
            "DATA": {"Data": {
                "Fields": ["ID", "INV_NUMBER", "AMOUNT_FULL"],
                "Rows": [[1, "ეა-1", 100.5], [2, "ეა-2"]]
            }},
            "STATUS": {"ID": 0}
        });
        let rows = table_rows(&response);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["INV_NUMBER"], json!("ეა-1"));
        assert_eq!(rows[0]["AMOUNT_FULL"], json!(100.5));
        assert!(rows[1].get("AMOUNT_FULL").is_none());
    }

    #[test]
    fn test_missing_table_is_empty() {
        assert!(table_rows(&json!({"DATA": {}})).is_empty());
        assert!(table_rows(&json!({})).is_empty());
    }
}
