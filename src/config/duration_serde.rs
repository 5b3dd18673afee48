//! Human-readable `Duration` fields for the configuration model
//!
//! Accepts either a whole number of seconds or a `humantime` string such as
//! `"5s"` or `"1m 30s"`, and always writes the string form back.

use serde::{Deserialize, Deserializer, Serializer, de};
use std::time::Duration;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDuration {
    Seconds(u64),
    Text(String),
}

pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&humantime::format_duration(*duration))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    match RawDuration::deserialize(deserializer)? {
        RawDuration::Seconds(seconds) => Ok(Duration::from_secs(seconds)),
        RawDuration::Text(text) => humantime::parse_duration(text.trim())
            .map_err(|e| de::Error::custom(format!("invalid duration '{text}': {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, Serialize, Deserialize)]
    struct Holder {
        #[serde(with = "crate::config::duration_serde")]
        timeout: Duration,
    }

    #[test]
    fn test_human_readable_duration() {
        let holder: Holder = serde_json::from_str(r#"{"timeout":"250ms"}"#).unwrap();
        assert_eq!(holder.timeout, Duration::from_millis(250));

        let holder: Holder = serde_json::from_str(r#"{"timeout":3}"#).unwrap();
        assert_eq!(holder.timeout, Duration::from_secs(3));

        assert!(serde_json::from_str::<Holder>(r#"{"timeout":"soon"}"#).is_err());
        assert!(serde_json::from_str::<Holder>(r#"{"timeout":-1}"#).is_err());
    }

    #[test]
    fn test_written_as_humantime() {
        let json = serde_json::to_string(&Holder {
            timeout: Duration::from_secs(90),
        })
        .unwrap();
        assert_eq!(json, r#"{"timeout":"1m 30s"}"#);
    }
}
