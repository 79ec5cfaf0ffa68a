/// Homework record types
use crate::errors::{BotError, BotResult};
use serde_json::Value;
use std::str::FromStr;

/// Review status reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    /// Wire value used by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HomeworkStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| BotError::UnknownStatus { status: s.to_string() })
    }
}

impl std::fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The two fields of a homework record the bot reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Homework {
    pub name: String,
    pub status: HomeworkStatus,
}

impl Homework {
    /// Extract a record, checking `homework_name`, then `status`, then the status value
    pub fn from_value(record: &Value) -> BotResult<Self> {
        let map = record
            .as_object()
            .ok_or_else(|| BotError::unexpected_type("homework record", "object", record))?;

        let name = map
            .get("homework_name")
            .ok_or_else(|| BotError::missing_key("homework_name", "homework record"))?;
        let status = map
            .get("status")
            .ok_or_else(|| BotError::missing_key("status", "homework record"))?;

        let status = match status {
            Value::String(s) => s.parse::<HomeworkStatus>()?,
            other => {
                return Err(BotError::UnknownStatus {
                    status: other.to_string(),
                })
            }
        };

        Ok(Self {
            name: display_value(name),
            status,
        })
    }
}

/// Strings render bare, anything else as compact JSON
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_status_parse() {
        assert_eq!("approved".parse::<HomeworkStatus>().unwrap(), HomeworkStatus::Approved);
        assert_eq!("rejected".parse::<HomeworkStatus>().unwrap(), HomeworkStatus::Rejected);
        let err = "Approved".parse::<HomeworkStatus>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
    }

    #[test]
    fn test_from_value() {
        let hw = Homework::from_value(&json!({
            "id": 7,
            "homework_name": "user__hw_python_oop.zip",
            "status": "reviewing",
            "reviewer_comment": ""
        }))
        .unwrap();
        assert_eq!(hw.name, "user__hw_python_oop.zip");
        assert_eq!(hw.status, HomeworkStatus::Reviewing);
    }

    #[test]
    fn test_name_checked_before_status() {
        let err = Homework::from_value(&json!({ "status": "pending" })).unwrap_err();
        assert_eq!(err, BotError::missing_key("homework_name", "homework record"));
    }

    #[test]
    fn test_missing_status() {
        let err = Homework::from_value(&json!({ "homework_name": "hw1" })).unwrap_err();
        assert_eq!(err, BotError::missing_key("status", "homework record"));
    }

    #[test]
    fn test_non_string_status_is_unknown() {
        let err = Homework::from_value(&json!({ "homework_name": "hw1", "status": 3 })).unwrap_err();
        assert_eq!(err, BotError::UnknownStatus { status: "3".to_string() });
    }

    #[test]
    fn test_record_must_be_object() {
        let err = Homework::from_value(&json!(["hw1", "approved"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
    }
}
