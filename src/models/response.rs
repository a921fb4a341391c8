// src/models/response.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// Represents the 'form_responses' table in the database.
///
/// One record per submission, immutable thereafter. References its form and
/// responder by identifier only.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub id: Uuid,
    pub form_id: Uuid,
    pub responder: i64,
    #[sqlx(json)]
    pub answers: Vec<Answer>,
    pub submitted_at: DateTime<Utc>,
}

/// One answer entry: the question it belongs to plus a type-shaped value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub qid: String,
    pub value: AnswerValue,
}

/// The value of one answer. The shape follows the question type; the union
/// is resolved once at deserialization rather than re-detected per render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Cloze: positional, index i = value placed in the i-th blank.
    /// Empty string = unfilled.
    Blanks(Vec<String>),
    /// Categorize: one entry per item. Empty `belongs_to` = unassigned.
    Categorized { items: Vec<ItemPlacement> },
    /// Comprehension: one entry per sub-question. Empty `answer` = unanswered.
    Choices { answers: Vec<SubAnswer> },
    /// Fallback for free-text question types.
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPlacement {
    pub id: String,
    /// Id of the category the responder dropped the item into.
    pub belongs_to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubAnswer {
    pub id: String,
    /// Selected option text.
    pub answer: String,
}

/// DTO for submitting a response to a form.
#[derive(Debug, Deserialize)]
pub struct SubmitResponseRequest {
    pub answers: Vec<Answer>,
}

/// Minimal responder identity joined from the 'users' table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ResponderInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// A recent-submission entry on the owner's dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentResponse {
    pub id: Uuid,
    pub responder: ResponderInfo,
    pub submitted_at: DateTime<Utc>,
}

/// A form summary with its latest responses, for the cross-form overview.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponsesSummary {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub response_count: i64,
    pub recent_responses: Vec<RecentResponse>,
}
