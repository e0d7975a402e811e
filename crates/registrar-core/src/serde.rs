use serde::{Deserialize, Deserializer};

/// Deserializes an optional string, treating blank strings as absent.
///
/// Used by patch-style update DTOs: a field sent as `""` leaves the stored
/// value untouched instead of overwriting it with an empty string.
pub fn deserialize_optional_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
        name: Option<String>,
    }

    #[test]
    fn test_blank_is_none() {
        let patch: Patch = serde_json::from_str(r#"{"name":"   "}"#).unwrap();
        assert_eq!(patch.name, None);
    }

    #[test]
    fn test_missing_is_none() {
        let patch: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(patch.name, None);
    }

    #[test]
    fn test_value_is_trimmed() {
        let patch: Patch = serde_json::from_str(r#"{"name":"  Ada "}"#).unwrap();
        assert_eq!(patch.name.as_deref(), Some("Ada"));
    }
}
