// tests/editor_tests.rs

use chrono::Utc;
use formbuilder::editor::{
    self, EditError, ListKind, QuestionKind, add_question, remove_question, reorder_config_list,
    reorder_questions,
};
use formbuilder::models::form::{
    CategorizeConfig, Category, ClozeConfig, Form, Item, Question, QuestionConfig,
};
use uuid::Uuid;

fn question(qid: &str, config: QuestionConfig) -> Question {
    Question {
        qid: qid.to_string(),
        title: format!("Question {}", qid),
        image_url: None,
        config,
    }
}

fn cloze(qid: &str) -> Question {
    question(
        qid,
        QuestionConfig::Cloze(ClozeConfig {
            text_with_blanks: "The _____ sat".to_string(),
            options: vec!["cat".to_string(), "dog".to_string(), "fox".to_string()],
        }),
    )
}

fn categorize(qid: &str) -> Question {
    question(
        qid,
        QuestionConfig::Categorize(CategorizeConfig {
            categories: vec![
                Category {
                    id: "c1".to_string(),
                    label: "Mammals".to_string(),
                },
                Category {
                    id: "c2".to_string(),
                    label: "Birds".to_string(),
                },
            ],
            items: vec![
                Item {
                    id: "i1".to_string(),
                    label: "Whale".to_string(),
                    belongs_to: Some("c1".to_string()),
                },
                Item {
                    id: "i2".to_string(),
                    label: "Owl".to_string(),
                    belongs_to: None,
                },
            ],
        }),
    )
}

fn form_with(questions: Vec<Question>) -> Form {
    let now = Utc::now();
    Form {
        id: Uuid::new_v4(),
        owner: 1,
        title: "Draft".to_string(),
        description: None,
        header_image_url: None,
        questions,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn add_question_appends_with_fresh_qid_and_empty_config() {
    let form = form_with(vec![cloze("q1")]);

    let updated = add_question(&form, QuestionKind::Categorize);

    assert_eq!(updated.questions.len(), 2);
    let added = updated.questions.last().unwrap();
    assert_eq!(added.title, "Untitled Question");
    assert_ne!(added.qid, "q1");
    assert_eq!(
        added.config,
        QuestionConfig::Categorize(CategorizeConfig::default())
    );
    // The input draft is untouched.
    assert_eq!(form.questions.len(), 1);
}

#[test]
fn add_question_never_reuses_qids() {
    let mut form = form_with(vec![]);
    for _ in 0..50 {
        form = add_question(&form, QuestionKind::Cloze);
    }

    let mut qids: Vec<&str> = form.questions.iter().map(|q| q.qid.as_str()).collect();
    qids.sort();
    qids.dedup();
    assert_eq!(qids.len(), 50);
}

#[test]
fn remove_question_drops_the_matching_question() {
    let form = form_with(vec![cloze("q1"), categorize("q2")]);

    let updated = remove_question(&form, "q1");

    assert_eq!(updated.questions.len(), 1);
    assert_eq!(updated.questions[0].qid, "q2");
}

#[test]
fn remove_question_is_idempotent_for_absent_qid() {
    let form = form_with(vec![cloze("q1"), categorize("q2")]);

    let updated = remove_question(&form, "no-such-question");

    assert_eq!(updated, form);
}

#[test]
fn reorder_questions_moves_and_shifts() {
    let form = form_with(vec![cloze("q1"), categorize("q2"), cloze("q3")]);

    let updated = reorder_questions(&form, 0, 2).unwrap();

    let order: Vec<&str> = updated.questions.iter().map(|q| q.qid.as_str()).collect();
    assert_eq!(order, ["q2", "q3", "q1"]);
}

#[test]
fn reorder_questions_round_trips() {
    let form = form_with(vec![cloze("q1"), categorize("q2"), cloze("q3")]);

    let there = reorder_questions(&form, 0, 2).unwrap();
    let back = reorder_questions(&there, 2, 0).unwrap();

    assert_eq!(back, form);
}

#[test]
fn reorder_questions_rejects_out_of_range_indices() {
    let form = form_with(vec![cloze("q1"), categorize("q2")]);

    assert_eq!(
        reorder_questions(&form, 2, 0),
        Err(EditError::IndexOutOfRange { index: 2, len: 2 })
    );
    assert_eq!(
        reorder_questions(&form, 0, 5),
        Err(EditError::IndexOutOfRange { index: 5, len: 2 })
    );
}

#[test]
fn reorder_config_list_moves_nested_entries() {
    let form = form_with(vec![categorize("q1")]);

    let updated = reorder_config_list(&form, "q1", ListKind::Items, 1, 0).unwrap();

    let QuestionConfig::Categorize(cfg) = &updated.questions[0].config else {
        panic!("question type changed");
    };
    assert_eq!(cfg.items[0].id, "i2");
    assert_eq!(cfg.items[1].id, "i1");
    // Categories are untouched.
    assert_eq!(cfg.categories[0].id, "c1");
}

#[test]
fn reorder_config_list_reorders_cloze_options() {
    let form = form_with(vec![cloze("q1")]);

    let updated = reorder_config_list(&form, "q1", ListKind::Options, 2, 0).unwrap();

    let QuestionConfig::Cloze(cfg) = &updated.questions[0].config else {
        panic!("question type changed");
    };
    assert_eq!(cfg.options, ["fox", "cat", "dog"]);
}

#[test]
fn reorder_config_list_ignores_missing_question() {
    let form = form_with(vec![cloze("q1")]);

    let updated = reorder_config_list(&form, "stale-qid", ListKind::Options, 0, 1).unwrap();

    assert_eq!(updated, form);
}

#[test]
fn reorder_config_list_ignores_list_kind_absent_from_config() {
    let form = form_with(vec![cloze("q1")]);

    // A cloze question has no categories list; editing a stale draft must
    // not throw.
    let updated = reorder_config_list(&form, "q1", ListKind::Categories, 0, 1).unwrap();

    assert_eq!(updated, form);
}

#[test]
fn reorder_config_list_rejects_out_of_range_on_present_list() {
    let form = form_with(vec![categorize("q1")]);

    assert_eq!(
        reorder_config_list(&form, "q1", ListKind::Categories, 0, 7),
        Err(EditError::IndexOutOfRange { index: 7, len: 2 })
    );
}

#[test]
fn image_attach_and_detach_are_plain_field_assignments() {
    let form = form_with(vec![cloze("q1")]);

    let with_header =
        editor::set_header_image(&form, Some("https://img.example/header.png".to_string()));
    assert_eq!(
        with_header.header_image_url.as_deref(),
        Some("https://img.example/header.png")
    );

    let with_question_image =
        editor::set_question_image(&form, "q1", Some("https://img.example/q.png".to_string()));
    assert_eq!(
        with_question_image.questions[0].image_url.as_deref(),
        Some("https://img.example/q.png")
    );

    let detached = editor::set_question_image(&with_question_image, "q1", None);
    assert_eq!(detached.questions[0].image_url, None);
}
