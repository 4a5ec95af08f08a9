use precept::{
    encode, parse_program, Engine, FactTemplate, Form, Question, QuestionKind, QueryTemplate,
    ResourceLimits, Responses, RuleTemplate, Term, NOT_APPLICABLE,
};

fn device_listing_form() -> Form {
    Form {
        questions: vec![
            Question {
                id: "registered".to_string(),
                kind: QuestionKind::Boolean,
            },
            Question {
                id: "market".to_string(),
                kind: QuestionKind::Select,
            },
            Question {
                id: "submissions".to_string(),
                kind: QuestionKind::Checkbox,
            },
            Question {
                id: "employees".to_string(),
                kind: QuestionKind::Numeric,
            },
        ],
        facts: vec![
            FactTemplate {
                question_id: "registered".to_string(),
                template: "registered({1}).".to_string(),
            },
            FactTemplate {
                question_id: "market".to_string(),
                template: "target_market({2}).".to_string(),
            },
            FactTemplate {
                question_id: "submissions".to_string(),
                template: "submitted({3}).".to_string(),
            },
            FactTemplate {
                question_id: "employees".to_string(),
                template: "employee_count({4}).".to_string(),
            },
        ],
        validations: vec![
            RuleTemplate {
                rule: r#"listing_complete :- submitted(L), member("registration", L), member("device listing", L)."#
                    .to_string(),
            },
            RuleTemplate {
                rule: "small_business :- employee_count(N), N < 500.".to_string(),
            },
        ],
        queries: vec![
            QueryTemplate {
                query: "?- registered(true)".to_string(),
                description: "Establishment is registered".to_string(),
            },
            QueryTemplate {
                query: "?- listing_complete".to_string(),
                description: "Device listing submissions are complete".to_string(),
            },
            QueryTemplate {
                query: "?- small_business".to_string(),
                description: "Qualifies for small-business fees".to_string(),
            },
            QueryTemplate {
                query: "?- target_market({2})".to_string(),
                description: "Declared market is on file".to_string(),
            },
        ],
    }
}

fn respond(pairs: &[(&str, &str)]) -> Responses {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_full_validation_run() {
    let form = device_listing_form();
    let responses = respond(&[
        ("registered", "true"),
        ("market", "US"),
        ("submissions", "registration, device listing"),
        ("employees", "120"),
    ]);
    let result = Engine::new().validate(&form, &responses).unwrap();
    assert_eq!(result.passed, vec![true, true, true, true]);
    assert_eq!(result.description.len(), 4);
}

#[test]
fn test_not_applicable_market_skips_its_query() {
    let form = device_listing_form();
    let responses = respond(&[
        ("registered", "true"),
        ("market", NOT_APPLICABLE),
        ("submissions", "registration, device listing"),
        ("employees", "120"),
    ]);
    let result = Engine::new().validate(&form, &responses).unwrap();
    // the market fact is omitted, the market query passes by default
    assert_eq!(result.passed, vec![true, true, true, true]);
}

#[test]
fn test_compiled_program_is_consultable() {
    let form = device_listing_form();
    let responses = respond(&[
        ("registered", "true"),
        ("market", "US"),
        ("submissions", "registration, device listing"),
        ("employees", "120"),
    ]);
    let compiled = Engine::new().compile(&form, &responses);
    assert!(parse_program(&compiled.program, &ResourceLimits::default()).is_ok());
}

#[test]
fn test_checkbox_answer_round_trips_through_the_parser() {
    let literal = encode("a, b's, c", QuestionKind::Checkbox);
    let source = format!("selected({}).", literal);
    let program = parse_program(&source, &ResourceLimits::default()).unwrap();

    let head = &program.clauses[0].head;
    let Term::Compound(_, args) = head else {
        panic!("expected compound head, got {:?}", head);
    };
    let mut items = Vec::new();
    let mut rest = &args[0];
    while let Term::Cons(item, tail) = rest {
        items.push(item.as_ref().clone());
        rest = tail.as_ref();
    }
    assert_eq!(rest, &Term::Nil);
    assert_eq!(
        items,
        vec![
            Term::Atom("a".to_string()),
            Term::Atom("b's".to_string()),
            Term::Atom("c".to_string()),
        ]
    );
}
