//! Shape checks for the homework API response
//!
//! Order matters and is fail-fast: object, `homeworks`, `current_date`,
//! then the type of `homeworks`.

use crate::errors::{BotError, BotResult};
use crate::logger::{self, LogTag};
use serde_json::Value;

const CONTEXT: &str = "API response";

/// Validate a response body and return its `homeworks` sequence (possibly empty)
pub fn check_response(response: &Value) -> BotResult<&[Value]> {
    logger::debug(LogTag::Homework, "Validating API response");

    let map = response
        .as_object()
        .ok_or_else(|| BotError::unexpected_type(CONTEXT, "object", response))?;

    let homeworks = map
        .get("homeworks")
        .ok_or_else(|| BotError::missing_key("homeworks", CONTEXT))?;

    if !map.contains_key("current_date") {
        return Err(BotError::missing_key("current_date", CONTEXT));
    }

    let list = homeworks
        .as_array()
        .ok_or_else(|| BotError::unexpected_type("\"homeworks\"", "array", homeworks))?;

    logger::debug(
        LogTag::Homework,
        &format!("Response valid: {} homework record(s)", list.len()),
    );
    Ok(list.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_valid_response() {
        let body = json!({
            "homeworks": [{ "homework_name": "hw1", "status": "approved" }],
            "current_date": 1000
        });
        let list = check_response(&body).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["homework_name"], "hw1");
    }

    #[test]
    fn test_empty_homeworks_is_valid() {
        let body = json!({ "homeworks": [], "current_date": 1000 });
        assert!(check_response(&body).unwrap().is_empty());
    }

    #[test]
    fn test_not_an_object() {
        let err = check_response(&json!([{ "homeworks": [] }])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
        assert!(matches!(err, BotError::UnexpectedType { expected: "object", actual: "array", .. }));
    }

    #[test]
    fn test_missing_homeworks() {
        let err = check_response(&json!({ "current_date": 1000 })).unwrap_err();
        assert_eq!(err, BotError::missing_key("homeworks", "API response"));
    }

    #[test]
    fn test_missing_current_date() {
        let err = check_response(&json!({ "homeworks": [] })).unwrap_err();
        assert_eq!(err, BotError::missing_key("current_date", "API response"));
    }

    #[test]
    fn test_homeworks_key_checked_before_current_date() {
        let err = check_response(&json!({})).unwrap_err();
        assert_eq!(err, BotError::missing_key("homeworks", "API response"));
    }

    #[test]
    fn test_homeworks_not_a_list() {
        for bad in [json!("hw1"), json!({ "homework_name": "hw1" })] {
            let body = json!({ "homeworks": bad, "current_date": 1000 });
            let err = check_response(&body).unwrap_err();
            assert!(matches!(err, BotError::UnexpectedType { expected: "array", .. }));
        }
    }
}
