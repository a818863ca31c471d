use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: &str = "6379";

/// One row of the connection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSummary {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A saved Redis endpoint as edited in the connection form.
///
/// Every field is kept as text; the backend owns validation. `id` is empty
/// until the server assigns one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSetting {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub host: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub port: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub pwd: String,
}

impl ConnectionSetting {
    /// Form contents for a connection that does not exist yet.
    pub fn for_new_connection() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT.to_string(),
            ..Self::default()
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

/// The backend serializes ids and ports as JSON numbers; the console keeps
/// them as strings. `null` reads as the empty string.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(match value {
        Some(StringOrNumber::String(value)) => value,
        Some(StringOrNumber::Signed(value)) => value.to_string(),
        Some(StringOrNumber::Unsigned(value)) => value.to_string(),
        Some(StringOrNumber::Float(value)) => value.to_string(),
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_decode_as_strings() {
        let summary: ConnectionSummary =
            serde_json::from_str(r#"{"id":1,"name":"x"}"#).expect("decode");
        assert_eq!(
            summary,
            ConnectionSummary {
                id: "1".into(),
                name: "x".into()
            }
        );
    }

    #[test]
    fn setting_accepts_numeric_port_and_null_password() {
        let setting: ConnectionSetting = serde_json::from_str(
            r#"{"id":42,"name":"prod","host":"10.0.0.5","port":6380,"pwd":null}"#,
        )
        .expect("decode");
        assert_eq!(setting.id, "42");
        assert_eq!(setting.port, "6380");
        assert_eq!(setting.pwd, "");
        assert!(!setting.is_new());
    }

    #[test]
    fn new_connection_defaults_to_local_redis() {
        let setting = ConnectionSetting::for_new_connection();
        assert!(setting.is_new());
        assert_eq!(setting.host, "localhost");
        assert_eq!(setting.port, "6379");
        assert_eq!(setting.name, "");
        assert_eq!(setting.pwd, "");
    }

    #[test]
    fn setting_serializes_every_field_as_text() {
        let setting = ConnectionSetting {
            id: String::new(),
            name: "local".into(),
            host: "localhost".into(),
            port: "6379".into(),
            pwd: "secret".into(),
        };
        let value = serde_json::to_value(&setting).expect("encode");
        assert_eq!(
            value,
            serde_json::json!({
                "id": "",
                "name": "local",
                "host": "localhost",
                "port": "6379",
                "pwd": "secret"
            })
        );
    }
}
