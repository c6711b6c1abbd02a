//! Homework review statuses and the messages sent for them.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use crate::error::{BotError, Result};
use crate::response::json_type;

pub const HOMEWORK_NAME_KEY: &str = "homework_name";
pub const STATUS_KEY: &str = "status";

/// Review status reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
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

    /// Status code as it appears on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Fixed verdict sentence shown to the user.
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }

    /// Decode a status code, rejecting anything outside the verdict table.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::deserialize(value).map_err(|_| {
            BotError::UnknownStatus(match value {
                Value::String(code) => code.clone(),
                other => other.to_string(),
            })
        })
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Message announcing a status change of one homework.
pub fn status_message(homework_name: &str, status: HomeworkStatus) -> String {
    format!(
        "Изменился статус проверки работы \"{homework_name}\". {}",
        status.verdict()
    )
}

/// Turn one homework record into the notification text.
///
/// The record must be an object with a string `homework_name` and a
/// `status` from the verdict table.
pub fn parse_status(homework: &Value) -> Result<String> {
    let record = homework.as_object().ok_or_else(|| {
        BotError::MalformedResponse(format!(
            "homework record must be an object, got {}",
            json_type(homework)
        ))
    })?;

    let missing: Vec<&str> = [HOMEWORK_NAME_KEY, STATUS_KEY]
        .into_iter()
        .filter(|key| !record.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(BotError::missing(missing));
    }

    let homework_name = record[HOMEWORK_NAME_KEY].as_str().ok_or_else(|| {
        BotError::MalformedResponse(format!(
            "`{HOMEWORK_NAME_KEY}` must be a string, got {}",
            json_type(&record[HOMEWORK_NAME_KEY])
        ))
    })?;

    let status = HomeworkStatus::from_value(&record[STATUS_KEY])?;

    Ok(status_message(homework_name, status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_approved_message() {
        let message =
            parse_status(&json!({"homework_name": "hw1", "status": "approved"})).unwrap();
        assert_eq!(
            message,
            "Изменился статус проверки работы \"hw1\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn test_reviewing_and_rejected_messages() {
        let reviewing =
            parse_status(&json!({"homework_name": "hw2", "status": "reviewing"})).unwrap();
        assert_eq!(
            reviewing,
            "Изменился статус проверки работы \"hw2\". Работа взята на проверку ревьюером."
        );

        let rejected =
            parse_status(&json!({"homework_name": "hw3", "status": "rejected"})).unwrap();
        assert_eq!(
            rejected,
            "Изменился статус проверки работы \"hw3\". Работа проверена: у ревьюера есть замечания."
        );
    }

    #[test]
    fn test_extra_fields_ignored() {
        let message = parse_status(&json!({
            "id": 124,
            "homework_name": "user__hw_python_oop.zip",
            "status": "reviewing",
            "reviewer_comment": "",
            "date_updated": "2020-02-13T16:42:47Z",
            "lesson_name": "Итоговый проект"
        }))
        .unwrap();
        assert!(message.contains("\"user__hw_python_oop.zip\""));
    }

    #[test]
    fn test_unknown_status_carries_value() {
        let err = parse_status(&json!({"homework_name": "hw1", "status": "lost"})).unwrap_err();
        match err {
            BotError::UnknownStatus(value) => assert_eq!(value, "lost"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status_codes_are_case_sensitive() {
        let err =
            parse_status(&json!({"homework_name": "hw1", "status": "Approved"})).unwrap_err();
        assert!(matches!(err, BotError::UnknownStatus(ref v) if v == "Approved"));
    }

    #[test]
    fn test_non_string_status_is_unknown() {
        let err = parse_status(&json!({"homework_name": "hw1", "status": 3})).unwrap_err();
        assert!(matches!(err, BotError::UnknownStatus(ref v) if v == "3"));
    }

    #[test]
    fn test_missing_name() {
        let err = parse_status(&json!({"status": "approved"})).unwrap_err();
        match err {
            BotError::MissingField { keys } => assert_eq!(keys, vec!["homework_name"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_both_keys() {
        let err = parse_status(&json!({"lesson_name": "x"})).unwrap_err();
        match err {
            BotError::MissingField { keys } => {
                assert_eq!(keys, vec!["homework_name", "status"])
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_record_not_an_object() {
        let err = parse_status(&json!(["hw1", "approved"])).unwrap_err();
        assert!(matches!(err, BotError::MalformedResponse(_)));
    }

    #[test]
    fn test_status_decodes_from_wire_code() {
        for status in HomeworkStatus::ALL {
            let decoded = HomeworkStatus::from_value(&json!(status.code())).unwrap();
            assert_eq!(decoded, status);
        }
    }
}
