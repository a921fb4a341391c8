// src/editor.rs

//! Form editing operations.
//!
//! These operate on an in-memory form draft prior to persistence and never
//! touch storage. Every operation returns a new `Form` value so callers can
//! diff old and new state cheaply.

use std::fmt;

use uuid::Uuid;

use crate::models::form::{
    CategorizeConfig, ClozeConfig, ComprehensionConfig, Form, Question, QuestionConfig,
};

/// Errors raised by draft mutations that indicate a caller bug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// A reorder index fell outside the target list. Never silently clamped.
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for list of length {}", index, len)
            }
        }
    }
}

impl std::error::Error for EditError {}

/// Which question type a new question should be created as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Categorize,
    Cloze,
    Comprehension,
}

impl QuestionKind {
    fn empty_config(self) -> QuestionConfig {
        match self {
            QuestionKind::Categorize => QuestionConfig::Categorize(CategorizeConfig::default()),
            QuestionKind::Cloze => QuestionConfig::Cloze(ClozeConfig::default()),
            QuestionKind::Comprehension => {
                QuestionConfig::Comprehension(ComprehensionConfig::default())
            }
        }
    }
}

/// Which nested config list a reorder targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Categories,
    Items,
    Options,
    SubQuestions,
}

/// Appends a new question with a freshly generated qid, a default title and
/// an empty type-appropriate config. Random v4 UUIDs keep new qids from
/// colliding with existing ones.
pub fn add_question(form: &Form, kind: QuestionKind) -> Form {
    let mut next = form.clone();
    next.questions.push(Question {
        qid: Uuid::new_v4().to_string(),
        title: "Untitled Question".to_string(),
        image_url: None,
        config: kind.empty_config(),
    });
    next
}

/// Drops the question with the given qid. Removing an absent qid leaves the
/// form unchanged (idempotent).
pub fn remove_question(form: &Form, qid: &str) -> Form {
    let mut next = form.clone();
    next.questions.retain(|q| q.qid != qid);
    next
}

/// Moves the question at `from` to position `to`, shifting the questions in
/// between. Both indices must be in range.
pub fn reorder_questions(form: &Form, from: usize, to: usize) -> Result<Form, EditError> {
    let mut next = form.clone();
    splice(&mut next.questions, from, to)?;
    Ok(next)
}

/// Reorders one entry of a question's nested config list, located by
/// `(qid, list kind)`.
///
/// Editing a stale draft must not throw: if the question is absent, or its
/// config does not carry the requested list, the form is returned unchanged.
/// Out-of-range indices against a present list are still a caller error.
pub fn reorder_config_list(
    form: &Form,
    qid: &str,
    list: ListKind,
    from: usize,
    to: usize,
) -> Result<Form, EditError> {
    let mut next = form.clone();
    let Some(question) = next.questions.iter_mut().find(|q| q.qid == qid) else {
        return Ok(next);
    };

    match (list, &mut question.config) {
        (ListKind::Categories, QuestionConfig::Categorize(cfg)) => {
            splice(&mut cfg.categories, from, to)?
        }
        (ListKind::Items, QuestionConfig::Categorize(cfg)) => splice(&mut cfg.items, from, to)?,
        (ListKind::Options, QuestionConfig::Cloze(cfg)) => splice(&mut cfg.options, from, to)?,
        (ListKind::SubQuestions, QuestionConfig::Comprehension(cfg)) => {
            splice(&mut cfg.sub_questions, from, to)?
        }
        // List kind not present on this question's config: no-op.
        _ => {}
    }

    Ok(next)
}

/// Attaches or detaches an image on a question. The upload itself is
/// delegated to the media host; only the returned URL is stored.
pub fn set_question_image(form: &Form, qid: &str, url: Option<String>) -> Form {
    let mut next = form.clone();
    if let Some(question) = next.questions.iter_mut().find(|q| q.qid == qid) {
        question.image_url = url;
    }
    next
}

/// Attaches or detaches the form's header image.
pub fn set_header_image(form: &Form, url: Option<String>) -> Form {
    let mut next = form.clone();
    next.header_image_url = url;
    next
}

/// Splice-based reorder: remove at `from`, reinsert at `to`.
fn splice<T>(list: &mut Vec<T>, from: usize, to: usize) -> Result<(), EditError> {
    let len = list.len();
    if from >= len {
        return Err(EditError::IndexOutOfRange { index: from, len });
    }
    if to >= len {
        return Err(EditError::IndexOutOfRange { index: to, len });
    }
    let moved = list.remove(from);
    list.insert(to, moved);
    Ok(())
}
