//! Session Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Session lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

/// Session format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Individual,
    Group,
    Discovery,
}

/// Coaching session entity
///
/// `date` and `time` stay as strings on the record; temporal logic parses
/// them on demand and drops rows that fail to parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: i64,
    pub client_id: i64,
    pub client_name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    /// Duration in minutes
    pub duration: u32,
    #[serde(rename = "type")]
    pub session_type: SessionType,
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objectives: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcomes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_coach_id: Option<i64>,
}

/// Create session payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreate {
    pub client_id: i64,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    #[validate(range(min = 1))]
    pub duration: u32,
    #[serde(rename = "type")]
    pub session_type: SessionType,
    pub notes: Option<String>,
    pub assigned_coach_id: Option<i64>,
}

/// Update session payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUpdate {
    pub date: Option<String>,
    pub time: Option<String>,
    pub duration: Option<u32>,
    #[serde(rename = "type")]
    pub session_type: Option<SessionType>,
    pub status: Option<SessionStatus>,
    pub notes: Option<String>,
    pub objectives: Option<Vec<String>>,
    pub outcomes: Option<String>,
    pub next_steps: Option<String>,
    pub meeting_url: Option<String>,
    pub assigned_coach_id: Option<i64>,
}
