// tests/reconcile_tests.rs

use formbuilder::models::form::{
    CategorizeConfig, Category, ClozeConfig, ComprehensionConfig, Item, Question, QuestionConfig,
    SubQuestion,
};
use formbuilder::models::response::{Answer, AnswerValue, ItemPlacement, SubAnswer};
use formbuilder::reconcile::{QuestionRef, RenderedAnswer, reconcile, render_categorize, render_cloze};

fn question(qid: &str, config: QuestionConfig) -> Question {
    Question {
        qid: qid.to_string(),
        title: format!("Question {}", qid),
        image_url: None,
        config,
    }
}

#[test]
fn unknown_qid_degrades_to_placeholder_pair() {
    let questions = vec![question(
        "q1",
        QuestionConfig::Cloze(ClozeConfig::default()),
    )];
    let answers = vec![Answer {
        qid: "gone".to_string(),
        value: AnswerValue::Text("orphaned".to_string()),
    }];

    let pairs = reconcile(&questions, &answers);

    assert_eq!(pairs.len(), 1);
    let QuestionRef::Missing(placeholder) = &pairs[0].question else {
        panic!("expected a placeholder question");
    };
    assert_eq!(placeholder.qid, "gone");
    assert_eq!(placeholder.title, "Question not found");
    assert_eq!(placeholder.kind, "unknown");
    assert_eq!(placeholder.image_url, None);
    assert_eq!(pairs[0].answer, AnswerValue::Text("orphaned".to_string()));
}

#[test]
fn reconcile_preserves_record_order() {
    let questions = vec![
        question("q1", QuestionConfig::Cloze(ClozeConfig::default())),
        question("q2", QuestionConfig::Cloze(ClozeConfig::default())),
    ];
    let answers = vec![
        Answer {
            qid: "q2".to_string(),
            value: AnswerValue::Blanks(vec![]),
        },
        Answer {
            qid: "q1".to_string(),
            value: AnswerValue::Blanks(vec![]),
        },
    ];

    let pairs = reconcile(&questions, &answers);

    let order: Vec<&str> = pairs
        .iter()
        .map(|p| match &p.question {
            QuestionRef::Known(q) => q.qid.as_str(),
            QuestionRef::Missing(m) => m.qid.as_str(),
        })
        .collect();
    assert_eq!(order, ["q2", "q1"]);
}

#[test]
fn reconcile_is_a_pure_projection() {
    let questions = vec![question(
        "q1",
        QuestionConfig::Cloze(ClozeConfig {
            text_with_blanks: "A_____B".to_string(),
            options: vec!["x".to_string()],
        }),
    )];
    let answers = vec![Answer {
        qid: "q1".to_string(),
        value: AnswerValue::Blanks(vec!["x".to_string()]),
    }];

    let first = reconcile(&questions, &answers);
    let second = reconcile(&questions, &answers);

    assert_eq!(first, second);
}

#[test]
fn cloze_blank_count_matches_token_occurrences() {
    let config = ClozeConfig {
        text_with_blanks: "A_____B_____C".to_string(),
        options: vec![],
    };

    let view = render_cloze(&config, &[]);

    assert_eq!(view.segments, ["A", "B", "C"]);
    assert_eq!(view.blanks.len(), 2);
    assert!(view.blanks.iter().all(|b| b.value.is_none()));
}

#[test]
fn cloze_empty_string_counts_as_unfilled() {
    let config = ClozeConfig {
        text_with_blanks: "The _____ sat on the _____".to_string(),
        options: vec!["cat".to_string(), "mat".to_string()],
    };
    let filled = vec!["".to_string(), "mat".to_string()];

    let view = render_cloze(&config, &filled);

    assert_eq!(view.blanks[0].value, None);
    assert_eq!(view.blanks[1].value.as_deref(), Some("mat"));
    // Chip usage follows the filled values, not the blank positions.
    assert!(!view.chips[0].used);
    assert!(view.chips[1].used);
}

#[test]
fn categorize_splits_items_into_disjoint_pools() {
    let config = CategorizeConfig {
        categories: vec![Category {
            id: "cat1".to_string(),
            label: "Category One".to_string(),
        }],
        items: vec![
            Item {
                id: "i1".to_string(),
                label: "First".to_string(),
                belongs_to: None,
            },
            Item {
                id: "i2".to_string(),
                label: "Second".to_string(),
                belongs_to: None,
            },
        ],
    };
    let placements = vec![
        ItemPlacement {
            id: "i1".to_string(),
            belongs_to: "".to_string(),
        },
        ItemPlacement {
            id: "i2".to_string(),
            belongs_to: "cat1".to_string(),
        },
    ];

    let view = render_categorize(&config, &placements);

    let unassigned: Vec<&str> = view.unassigned.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(unassigned, ["i1"]);

    assert_eq!(view.buckets.len(), 1);
    let bucket_items: Vec<&str> = view.buckets[0].items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(bucket_items, ["i2"]);

    // Disjoint, and together they cover every item.
    let mut all: Vec<&str> = unassigned.into_iter().chain(bucket_items).collect();
    all.sort();
    assert_eq!(all, ["i1", "i2"]);
}

#[test]
fn categorize_item_without_placement_stays_unassigned() {
    let config = CategorizeConfig {
        categories: vec![Category {
            id: "cat1".to_string(),
            label: "Category One".to_string(),
        }],
        items: vec![Item {
            id: "i1".to_string(),
            label: "First".to_string(),
            belongs_to: None,
        }],
    };

    let view = render_categorize(&config, &[]);

    assert_eq!(view.unassigned.len(), 1);
    assert!(view.buckets[0].items.is_empty());
}

#[test]
fn comprehension_marks_selected_option_by_sub_question_id() {
    let questions = vec![question(
        "q1",
        QuestionConfig::Comprehension(ComprehensionConfig {
            passage: "Some passage.".to_string(),
            sub_questions: vec![
                SubQuestion {
                    id: "sq1".to_string(),
                    question: "First?".to_string(),
                    options: vec!["yes".to_string(), "no".to_string()],
                },
                SubQuestion {
                    id: "sq2".to_string(),
                    question: "Second?".to_string(),
                    options: vec!["left".to_string(), "right".to_string()],
                },
            ],
        }),
    )];
    let answers = vec![Answer {
        qid: "q1".to_string(),
        value: AnswerValue::Choices {
            answers: vec![
                SubAnswer {
                    id: "sq2".to_string(),
                    answer: "right".to_string(),
                },
                SubAnswer {
                    id: "sq1".to_string(),
                    answer: "".to_string(),
                },
            ],
        },
    }];

    let pairs = reconcile(&questions, &answers);

    let RenderedAnswer::Comprehension(view) = &pairs[0].rendered else {
        panic!("expected a comprehension rendering");
    };
    // sq1 unanswered: nothing selected.
    assert!(view.sub_questions[0].options.iter().all(|o| !o.selected));
    // sq2 answered "right", found by id despite the entries arriving out of
    // order.
    let selected: Vec<&str> = view.sub_questions[1]
        .options
        .iter()
        .filter(|o| o.selected)
        .map(|o| o.text.as_str())
        .collect();
    assert_eq!(selected, ["right"]);
}

#[test]
fn value_shape_mismatch_falls_back_to_text() {
    let questions = vec![question(
        "q1",
        QuestionConfig::Cloze(ClozeConfig {
            text_with_blanks: "A_____B".to_string(),
            options: vec![],
        }),
    )];
    let answers = vec![Answer {
        qid: "q1".to_string(),
        value: AnswerValue::Text("free text".to_string()),
    }];

    let pairs = reconcile(&questions, &answers);

    assert_eq!(
        pairs[0].rendered,
        RenderedAnswer::Text(formbuilder::reconcile::TextView {
            text: "free text".to_string()
        })
    );
}

#[test]
fn end_to_end_cloze_scenario() {
    // Form f1 owned by u1 with one cloze question; u2 responded "there".
    let questions = vec![question(
        "q1",
        QuestionConfig::Cloze(ClozeConfig {
            text_with_blanks: "Hi_____!".to_string(),
            options: vec!["there".to_string()],
        }),
    )];
    let answers = vec![Answer {
        qid: "q1".to_string(),
        value: AnswerValue::Blanks(vec!["there".to_string()]),
    }];

    let pairs = reconcile(&questions, &answers);

    assert_eq!(pairs.len(), 1);
    let QuestionRef::Known(q) = &pairs[0].question else {
        panic!("expected the real question");
    };
    assert_eq!(q.qid, "q1");

    let RenderedAnswer::Cloze(view) = &pairs[0].rendered else {
        panic!("expected a cloze rendering");
    };
    assert_eq!(view.segments, ["Hi", "!"]);
    assert_eq!(view.blanks.len(), 1);
    assert_eq!(view.blanks[0].value.as_deref(), Some("there"));
    assert_eq!(view.chips.len(), 1);
    assert!(view.chips[0].used);
}
