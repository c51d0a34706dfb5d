//! Homework review statuses and the chat message for each

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{ReviewNotifierError, HOMEWORK_CONTEXT};

pub const NAME_KEY: &str = "homework_name";
pub const STATUS_KEY: &str = "status";

/// Review state of a homework submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Fixed phrase sent to the chat for this status
    pub fn verdict(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomeworkStatus::Approved => write!(f, "approved"),
            HomeworkStatus::Reviewing => write!(f, "reviewing"),
            HomeworkStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = ReviewNotifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(ReviewNotifierError::UnknownStatus(other.to_string())),
        }
    }
}

/// Render the chat message for a homework record.
pub fn parse_status(homework: &Value) -> crate::Result<String> {
    let name = required(homework, NAME_KEY)?;
    let status = required(homework, STATUS_KEY)?;

    let status: HomeworkStatus = match status {
        Value::String(s) => s.parse()?,
        other => return Err(ReviewNotifierError::UnknownStatus(other.to_string())),
    };

    let name = match name {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    tracing::debug!("Homework \"{}\" has status {}", name, status);

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        status.verdict()
    ))
}

fn required<'a>(homework: &'a Value, key: &str) -> crate::Result<&'a Value> {
    homework
        .get(key)
        .ok_or_else(|| ReviewNotifierError::missing_key(key, HOMEWORK_CONTEXT))
}
