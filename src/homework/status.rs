/// Status formatting: homework record -> chat sentence
use super::types::Homework;
use crate::config::MessagesConfig;
use crate::errors::BotResult;
use crate::logger::{self, LogTag};
use serde_json::Value;

/// Format the chat message for one homework record
///
/// Fails with a shape error if `homework_name` or `status` is absent and with a
/// domain error if the status is not in the verdict table.
pub fn parse_status(record: &Value, messages: &MessagesConfig) -> BotResult<String> {
    let homework = Homework::from_value(record)?;
    logger::debug(
        LogTag::Homework,
        &format!("Homework '{}' has status '{}'", homework.name, homework.status),
    );
    Ok(status_message(&homework, messages))
}

pub fn status_message(homework: &Homework, messages: &MessagesConfig) -> String {
    fill_template(
        &messages.status_changed,
        &[
            ("name", homework.name.as_str()),
            ("verdict", messages.verdict(homework.status)),
        ],
    )
}

/// Message relayed when a cycle fails
pub fn failure_message(error: &dyn std::fmt::Display, messages: &MessagesConfig) -> String {
    fill_template(&messages.failure, &[("error", &error.to_string())])
}

/// Replace `{key}` placeholders; unknown placeholders are left as written
///
/// Substitution is single-pass, so braces inside values are never re-expanded.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match vars.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
