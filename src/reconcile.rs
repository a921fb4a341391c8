// src/reconcile.rs

//! Answer reconciliation: joins a response's raw answers back against their
//! originating questions and projects each pair into a renderable structure.
//!
//! This is a pure projection. It never mutates its inputs, never scores
//! anything, and never fails: an answer whose question no longer exists is
//! paired with a synthetic placeholder question instead.

use serde::Serialize;

use crate::models::form::{
    BLANK_TOKEN, CategorizeConfig, ClozeConfig, ComprehensionConfig, Question, QuestionConfig,
};
use crate::models::response::{Answer, AnswerValue, ItemPlacement, SubAnswer};

/// One reconciled `{question, answer}` pair, in the response's original
/// order, together with its per-type rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledAnswer {
    pub question: QuestionRef,
    pub answer: AnswerValue,
    pub rendered: RenderedAnswer,
}

/// The originating question, or a placeholder when the response carries a
/// qid the form no longer knows about.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QuestionRef {
    Known(Question),
    Missing(MissingQuestion),
}

/// Synthetic stand-in for a question absent from the form's question list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingQuestion {
    pub qid: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub image_url: Option<String>,
}

impl MissingQuestion {
    fn for_qid(qid: &str) -> Self {
        MissingQuestion {
            qid: qid.to_string(),
            title: "Question not found".to_string(),
            kind: "unknown".to_string(),
            image_url: None,
        }
    }
}

/// Display projection of one answer, variant per question type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RenderedAnswer {
    Cloze(ClozeView),
    Categorize(CategorizeView),
    Comprehension(ComprehensionView),
    Text(TextView),
}

/// Cloze text split into literal segments with a blank slot between each
/// consecutive pair, plus the option pool rendered as chips.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClozeView {
    /// n blanks produce n + 1 literal segments.
    pub segments: Vec<String>,
    pub blanks: Vec<BlankSlot>,
    pub chips: Vec<Chip>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlankSlot {
    /// The value placed in this blank; `None` renders as an empty indicator.
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chip {
    pub text: String,
    /// A chip is used iff its text appears anywhere in the filled blanks.
    pub used: bool,
}

/// Items grouped into their assigned category buckets plus the leftover
/// unassigned pool. The pool and the buckets are disjoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorizeView {
    pub unassigned: Vec<PlacedItem>,
    pub buckets: Vec<Bucket>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedItem {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub category_id: String,
    pub label: String,
    pub items: Vec<PlacedItem>,
}

/// Passage plus each sub-question's option list with the chosen option
/// marked. Display only; no correctness judgment is ever made.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensionView {
    pub passage: String,
    pub sub_questions: Vec<SubQuestionView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubQuestionView {
    pub id: String,
    pub question: String,
    pub options: Vec<OptionView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionView {
    pub text: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextView {
    pub text: String,
}

/// Pairs every answer entry with its originating question, preserving the
/// record's order. A qid absent from the question list degrades to a
/// placeholder pair rather than an error, so this never fails even under
/// stale or corrupted references.
pub fn reconcile(questions: &[Question], answers: &[Answer]) -> Vec<ReconciledAnswer> {
    answers
        .iter()
        .map(|answer| match questions.iter().find(|q| q.qid == answer.qid) {
            Some(question) => ReconciledAnswer {
                question: QuestionRef::Known(question.clone()),
                answer: answer.value.clone(),
                rendered: render(question, &answer.value),
            },
            None => ReconciledAnswer {
                question: QuestionRef::Missing(MissingQuestion::for_qid(&answer.qid)),
                answer: answer.value.clone(),
                rendered: RenderedAnswer::Text(TextView {
                    text: answer_text(&answer.value),
                }),
            },
        })
        .collect()
}

/// Projects one `(config, value)` pair into its display structure. A value
/// whose shape does not match the question's type falls back to plain text.
pub fn render(question: &Question, value: &AnswerValue) -> RenderedAnswer {
    match (&question.config, value) {
        (QuestionConfig::Cloze(cfg), AnswerValue::Blanks(filled)) => {
            RenderedAnswer::Cloze(render_cloze(cfg, filled))
        }
        (QuestionConfig::Categorize(cfg), AnswerValue::Categorized { items }) => {
            RenderedAnswer::Categorize(render_categorize(cfg, items))
        }
        (QuestionConfig::Comprehension(cfg), AnswerValue::Choices { answers }) => {
            RenderedAnswer::Comprehension(render_comprehension(cfg, answers))
        }
        _ => RenderedAnswer::Text(TextView {
            text: answer_text(value),
        }),
    }
}

/// Splits the cloze text on the blank token: n occurrences yield n + 1
/// literal segments and n blank slots. Slot i shows `filled[i]` when present
/// and non-empty.
pub fn render_cloze(config: &ClozeConfig, filled: &[String]) -> ClozeView {
    let segments: Vec<String> = config
        .text_with_blanks
        .split(BLANK_TOKEN)
        .map(str::to_string)
        .collect();

    let blanks = (0..segments.len().saturating_sub(1))
        .map(|i| BlankSlot {
            value: filled.get(i).filter(|v| !v.is_empty()).cloned(),
        })
        .collect();

    let chips = config
        .options
        .iter()
        .map(|opt| Chip {
            text: opt.clone(),
            used: filled.iter().any(|v| v == opt),
        })
        .collect();

    ClozeView {
        segments,
        blanks,
        chips,
    }
}

/// Attributes each item to its answered category, or to the unassigned pool
/// when its placement is missing or empty. Placements are matched by item id,
/// categories by category id.
pub fn render_categorize(config: &CategorizeConfig, placements: &[ItemPlacement]) -> CategorizeView {
    let placement_of = |item_id: &str| {
        placements
            .iter()
            .find(|p| p.id == item_id)
            .filter(|p| !p.belongs_to.is_empty())
    };

    let unassigned = config
        .items
        .iter()
        .filter(|item| placement_of(&item.id).is_none())
        .map(|item| PlacedItem {
            id: item.id.clone(),
            label: item.label.clone(),
        })
        .collect();

    let buckets = config
        .categories
        .iter()
        .map(|cat| Bucket {
            category_id: cat.id.clone(),
            label: cat.label.clone(),
            items: config
                .items
                .iter()
                .filter(|item| placement_of(&item.id).is_some_and(|p| p.belongs_to == cat.id))
                .map(|item| PlacedItem {
                    id: item.id.clone(),
                    label: item.label.clone(),
                })
                .collect(),
        })
        .collect();

    CategorizeView {
        unassigned,
        buckets,
    }
}

/// Marks, for each sub-question, the option equal to its selected answer.
/// Answer entries are located by sub-question id, so reordering sub-questions
/// never detaches their answers.
pub fn render_comprehension(
    config: &ComprehensionConfig,
    answers: &[SubAnswer],
) -> ComprehensionView {
    let sub_questions = config
        .sub_questions
        .iter()
        .map(|sq| {
            let chosen = answers
                .iter()
                .find(|a| a.id == sq.id)
                .map(|a| a.answer.as_str())
                .filter(|a| !a.is_empty());

            SubQuestionView {
                id: sq.id.clone(),
                question: sq.question.clone(),
                options: sq
                    .options
                    .iter()
                    .map(|opt| OptionView {
                        text: opt.clone(),
                        selected: chosen == Some(opt.as_str()),
                    })
                    .collect(),
            }
        })
        .collect();

    ComprehensionView {
        passage: config.passage.clone(),
        sub_questions,
    }
}

/// Flattens any answer value to display text, for fallback rendering.
fn answer_text(value: &AnswerValue) -> String {
    match value {
        AnswerValue::Text(s) => s.clone(),
        AnswerValue::Blanks(values) => values.join(", "),
        _ => "Not answered".to_string(),
    }
}
