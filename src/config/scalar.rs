//! Custom serde modules for scalars that may arrive as text after
//! placeholder substitution.

/// Positive integer seconds, given as a number (`1440`) or text (`"1440"`).
pub mod seconds {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Int(n) if n > 0 => Ok(n as u64),
            Raw::Int(n) => Err(D::Error::custom(format!(
                "expected a positive integer number of seconds, got {}",
                n
            ))),
            Raw::Text(s) => parse_seconds(&s).map_err(D::Error::custom),
        }
    }

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(*value)
    }

    pub(crate) fn parse_seconds(s: &str) -> Result<u64, String> {
        match s.trim().parse::<u64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(format!(
                "expected a positive integer number of seconds, got {:?}",
                s
            )),
        }
    }
}

/// Free text that may also be written as a bare number, e.g. a port.
pub mod text {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => n.to_string(),
            Raw::Text(s) => s,
        })
    }
}

/// Boolean given as `true`/`false` or as the text `"true"`/`"false"`, so a
/// switch can be driven by a placeholder.
pub mod flag {
    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Bool(b) => Ok(b),
            Raw::Text(s) => parse_flag(&s).map_err(D::Error::custom),
        }
    }

    pub(crate) fn parse_flag(s: &str) -> Result<bool, String> {
        match s.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(format!("expected true or false, got {:?}", s)),
        }
    }
}
