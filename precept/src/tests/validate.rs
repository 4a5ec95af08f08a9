use crate::engine::Engine;
use crate::error::PreceptError;
use crate::form::{
    FactTemplate, Form, Question, QuestionKind, QueryTemplate, Responses, RuleTemplate,
    NOT_APPLICABLE,
};
use crate::response::QueryOutcome;

fn question(id: &str, kind: QuestionKind) -> Question {
    Question {
        id: id.to_string(),
        kind,
    }
}

fn fact(question_id: &str, template: &str) -> FactTemplate {
    FactTemplate {
        question_id: question_id.to_string(),
        template: template.to_string(),
    }
}

fn rule(text: &str) -> RuleTemplate {
    RuleTemplate {
        rule: text.to_string(),
    }
}

fn query(text: &str, description: &str) -> QueryTemplate {
    QueryTemplate {
        query: text.to_string(),
        description: description.to_string(),
    }
}

fn answers(pairs: &[(&str, &str)]) -> Responses {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_ground_query_against_compiled_fact() {
    let form = Form {
        questions: vec![question("q1", QuestionKind::Boolean)],
        facts: vec![fact("q1", "has_license({1}).")],
        validations: vec![],
        queries: vec![query("?- has_license(true)", "Facility holds a license")],
    };
    let result = Engine::new()
        .validate(&form, &answers(&[("q1", "true")]))
        .unwrap();
    assert_eq!(result.passed, vec![true]);
    assert_eq!(result.outcomes, vec![QueryOutcome::Proved]);
}

#[test]
fn test_not_applicable_skips_without_touching_the_engine() {
    // q1's answered fact template is garbage; if the program were ever
    // consulted the request would fail, so an Ok result proves the skipped
    // query never reached the engine
    let form = Form {
        questions: vec![
            question("q1", QuestionKind::Boolean),
            question("q2", QuestionKind::Boolean),
        ],
        facts: vec![fact("q1", "((broken")],
        validations: vec![],
        queries: vec![query("?- has_license({2})", "License check")],
    };
    let result = Engine::new()
        .validate(&form, &answers(&[("q1", "true"), ("q2", NOT_APPLICABLE)]))
        .unwrap();
    assert_eq!(result.passed, vec![true]);
    assert_eq!(result.outcomes, vec![QueryOutcome::Skipped]);
}

#[test]
fn test_trivially_succeeding_boolean_query() {
    let form = Form {
        questions: vec![],
        facts: vec![],
        validations: vec![rule("fruit(apple).")],
        queries: vec![query("?- fruit(apple)", "Ground fact call")],
    };
    let result = Engine::new().validate(&form, &Responses::new()).unwrap();
    assert_eq!(result.passed, vec![true]);
    assert_eq!(result.outcomes, vec![QueryOutcome::Proved]);
}

#[test]
fn test_invalid_program_fails_the_whole_request() {
    let form = Form {
        questions: vec![question("q1", QuestionKind::Boolean)],
        facts: vec![fact("q1", "has_license({1}")],
        validations: vec![],
        queries: vec![query("?- has_license(true)", "License check")],
    };
    let err = Engine::new()
        .validate(&form, &answers(&[("q1", "true")]))
        .unwrap_err();
    assert!(matches!(err, PreceptError::Consult(_)));
    assert!(err.is_fatal());
}

#[test]
fn test_one_failing_query_is_isolated() {
    // query 3 references an unanswered question: its placeholder stays
    // verbatim and resolution errors on it, in isolation
    let form = Form {
        questions: vec![question("q1", QuestionKind::Boolean)],
        facts: vec![],
        validations: vec![rule("fruit(apple).\nfruit(banana).")],
        queries: vec![
            query("?- fruit(apple)", "first"),
            query("?- fruit(banana)", "second"),
            query("?- {1}", "third"),
            query("?- fruit(apple)", "fourth"),
            query("?- fruit(banana)", "fifth"),
        ],
    };
    let result = Engine::new().validate(&form, &Responses::new()).unwrap();
    assert_eq!(result.passed, vec![true, true, false, true, true]);
    assert_eq!(result.outcomes[2], QueryOutcome::Errored);
    assert_eq!(result.description.len(), 5);
}

#[test]
fn test_result_is_fully_shaped_regardless_of_skips() {
    let form = Form {
        questions: vec![
            question("q1", QuestionKind::Boolean),
            question("q2", QuestionKind::Boolean),
        ],
        facts: vec![],
        validations: vec![rule("ok.")],
        queries: vec![
            query("?- ok", "runs"),
            query("?- ok({1})", "skipped"),
            query("?- missing({2})", "errors"),
        ],
    };
    let responses = answers(&[("q1", NOT_APPLICABLE)]);
    let result = Engine::new().validate(&form, &responses).unwrap();
    assert_eq!(result.passed.len(), 3);
    assert_eq!(result.description.len(), 3);
    assert_eq!(result.outcomes.len(), 3);
    assert_eq!(
        result.description,
        vec!["runs", "skipped", "errors"]
    );
}

#[test]
fn test_no_queries_yields_empty_result() {
    let form = Form {
        questions: vec![],
        facts: vec![],
        validations: vec![],
        queries: vec![],
    };
    let result = Engine::new().validate(&form, &Responses::new()).unwrap();
    assert!(result.passed.is_empty());
    assert!(result.description.is_empty());
}

#[test]
fn test_all_skipped_returns_before_consult() {
    let form = Form {
        questions: vec![
            question("q1", QuestionKind::Boolean),
            question("q2", QuestionKind::Boolean),
        ],
        facts: vec![fact("q1", "this is not a clause")],
        validations: vec![],
        queries: vec![
            query("?- a({2})", "first"),
            query("?- b({2})", "second"),
        ],
    };
    let result = Engine::new()
        .validate(&form, &answers(&[("q1", "true"), ("q2", NOT_APPLICABLE)]))
        .unwrap();
    assert_eq!(result.passed, vec![true, true]);
}

#[test]
fn test_checkbox_membership_end_to_end() {
    let form = Form {
        questions: vec![question("q1", QuestionKind::Checkbox)],
        facts: vec![fact("q1", "submitted({1}).")],
        validations: vec![rule(
            "complete :- submitted(L), member('registration', L), member('listing', L).",
        )],
        queries: vec![query("?- complete", "All submissions present")],
    };
    let passed = Engine::new()
        .validate(&form, &answers(&[("q1", "registration, listing")]))
        .unwrap()
        .passed;
    assert_eq!(passed, vec![true]);
}

#[test]
fn test_numeric_comparison_end_to_end() {
    let form = Form {
        questions: vec![question("q1", QuestionKind::Numeric)],
        facts: vec![fact("q1", "employee_count({1}).")],
        validations: vec![rule("large_facility :- employee_count(N), N >= 10.")],
        queries: vec![query("?- large_facility", "Facility size")],
    };
    let result = Engine::new()
        .validate(&form, &answers(&[("q1", "12")]))
        .unwrap();
    assert_eq!(result.passed, vec![true]);
    assert_eq!(result.outcomes, vec![QueryOutcome::Proved]);
}

#[test]
fn test_limit_exhaustion_is_inconclusive_not_fatal() {
    let mut limits = crate::ResourceLimits::default();
    limits.max_inference_steps = 25;
    let form = Form {
        questions: vec![],
        facts: vec![],
        validations: vec![rule("loop :- loop.\nfruit(apple).")],
        queries: vec![
            query("?- loop", "diverges"),
            query("?- fruit(apple)", "still runs"),
        ],
    };
    let result = Engine::with_limits(limits)
        .validate(&form, &Responses::new())
        .unwrap();
    assert_eq!(result.passed, vec![false, true]);
    assert_eq!(
        result.outcomes,
        vec![QueryOutcome::LimitExceeded, QueryOutcome::Proved]
    );
}

#[test]
fn test_binding_answers_do_not_count_as_success() {
    let form = Form {
        questions: vec![],
        facts: vec![],
        validations: vec![rule("fruit(apple).")],
        queries: vec![query("?- fruit(X)", "Enumerates, does not prove")],
    };
    let result = Engine::new().validate(&form, &Responses::new()).unwrap();
    assert_eq!(result.passed, vec![false]);
    assert_eq!(result.outcomes, vec![QueryOutcome::Unproven]);
}
