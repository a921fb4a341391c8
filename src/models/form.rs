// src/models/form.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Placeholder token marking one blank position inside cloze text.
pub const BLANK_TOKEN: &str = "_____";

/// Represents the 'forms' table in the database.
///
/// Questions are embedded: they have no identity outside their form and are
/// stored as a JSONB array in the 'questions' column.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: Uuid,

    /// User ID of the form's creator. Only the owner may mutate the form.
    pub owner: i64,

    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_image_url: Option<String>,

    #[sqlx(json)]
    pub questions: Vec<Question>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One element of a form's ordered question list.
///
/// `qid` is assigned at creation (random v4 UUID) and never reused, so
/// reordering questions can never invalidate answer cross-references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub qid: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Type tag plus type-specific payload, e.g.
    /// `{"type": "cloze", "config": {"textWithBlanks": ..., "options": [...]}}`.
    /// A config whose shape does not match its tag is rejected at
    /// deserialization instead of being checked ad hoc at each use site.
    #[serde(flatten)]
    pub config: QuestionConfig,
}

/// Type-tagged question configuration. Closed set; extensible by adding a
/// variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "lowercase")]
pub enum QuestionConfig {
    Categorize(CategorizeConfig),
    Cloze(ClozeConfig),
    Comprehension(ComprehensionConfig),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorizeConfig {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub label: String,
}

/// A draggable item in a categorize question. `belongs_to`, when set, holds
/// the id of the category the author pre-assigned it to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub belongs_to: Option<String>,
}

/// Fill-in-the-blank question. The number of blanks equals the number of
/// [`BLANK_TOKEN`] occurrences in `text_with_blanks`; `options` is the pool
/// of fillable values in display order (not blank order).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClozeConfig {
    #[serde(default)]
    pub text_with_blanks: String,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensionConfig {
    #[serde(default)]
    pub passage: String,
    #[serde(default)]
    pub sub_questions: Vec<SubQuestion>,
}

/// A single-choice sub-question answered from its own option list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubQuestion {
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
}

/// DTO for creating a new form. Title is required and non-empty.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFormRequest {
    #[validate(length(min = 1, max = 200, message = "Form title required"))]
    pub title: String,
    pub description: Option<String>,
    pub header_image_url: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// DTO for a full-document form update. Same shape as creation; the update
/// is scoped to `{id, owner}` at the storage layer.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFormRequest {
    #[validate(length(min = 1, max = 200, message = "Form title required"))]
    pub title: String,
    pub description: Option<String>,
    pub header_image_url: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// A form from the owner's dashboard listing, decorated with response
/// statistics. The stats are composed from independent read queries.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormWithStats {
    #[serde(flatten)]
    pub form: Form,
    pub response_count: i64,
    pub has_responded: bool,
    pub recent_responses: Vec<crate::models::response::RecentResponse>,
}
