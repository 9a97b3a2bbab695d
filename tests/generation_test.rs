use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tour_planner::itinerary::{Generator, FAILURE_PLACEHOLDER};
use tour_planner::languages::{default_prompt, Language};
use tour_planner::session::{Action, AnswerMap, SessionState};

fn answers(entries: &[(&str, &str)]) -> AnswerMap {
    entries
        .iter()
        .map(|(q, a)| (q.to_string(), a.to_string()))
        .collect()
}

fn completion_body(text: &str) -> serde_json::Value {
    json!({
        "choices": [
            {
                "index": 0,
                "finish_reason": "stop",
                "message": { "role": "assistant", "content": text }
            }
        ]
    })
}

#[tokio::test]
async fn successful_generation_returns_the_completion_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "messages": [{ "role": "user" }]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("Day 1: Pyramids of Giza\nDay 2: Luxor")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let generator = Generator::new(server.uri(), "test-token", "test-model");
    let generation = generator
        .generate(&answers(&[("Q1", "Luxor")]), Language::English)
        .await;

    assert_eq!(generation.text, "Day 1: Pyramids of Giza\nDay 2: Luxor");
    assert!(generation.error.is_none());
}

#[tokio::test]
async fn all_skipped_answers_send_the_canned_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [{ "role": "user", "content": default_prompt(Language::Arabic) }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("جدول الرحلة")))
        .expect(1)
        .mount(&server)
        .await;

    let generator = Generator::new(server.uri(), "test-token", "test-model");
    let generation = generator
        .generate(&answers(&[("Q1", "skip"), ("Q2", "")]), Language::Arabic)
        .await;

    assert_eq!(generation.text, "جدول الرحلة");
}

#[tokio::test]
async fn server_error_yields_the_placeholder_without_panicking() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let generator = Generator::new(server.uri(), "test-token", "test-model");
    let generation = generator
        .generate(&answers(&[("Q1", "Luxor")]), Language::English)
        .await;

    assert_eq!(generation.text, FAILURE_PLACEHOLDER);
    let error = generation.error.unwrap();
    assert!(error.contains("An error occurred while generating the itinerary"));
    assert!(error.contains("500"));
}

#[tokio::test]
async fn malformed_response_body_yields_the_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let generator = Generator::new(server.uri(), "test-token", "test-model");
    let generation = generator
        .generate(&answers(&[("Q1", "Luxor")]), Language::English)
        .await;

    assert_eq!(generation.text, FAILURE_PLACEHOLDER);
    assert!(generation.error.is_some());
}

#[tokio::test]
async fn empty_choices_yield_the_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let generator = Generator::new(server.uri(), "test-token", "test-model");
    let generation = generator
        .generate(&answers(&[("Q1", "Luxor")]), Language::English)
        .await;

    assert_eq!(generation.text, FAILURE_PLACEHOLDER);
    assert!(generation.error.is_some());
}

#[tokio::test]
async fn transport_failure_still_reaches_done() {
    // Nothing listens on this port; the connect fails immediately.
    let generator = Generator::new("http://127.0.0.1:9", "test-token", "test-model");

    let mut session = SessionState::new();
    session.apply(Action::PickLanguage(Language::English));
    session.apply(Action::Escape);
    assert!(session.needs_generation());

    let generation = generator.generate(&session.answers, Language::English).await;
    assert_eq!(generation.text, FAILURE_PLACEHOLDER);
    session.store_itinerary(generation.text);

    assert!(!session.needs_generation());
    assert_eq!(session.itinerary.as_deref(), Some(FAILURE_PLACEHOLDER));
}

#[tokio::test]
async fn a_finished_session_never_generates_twice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Day 1: Cairo")))
        .expect(1)
        .mount(&server)
        .await;

    let generator = Generator::new(server.uri(), "test-token", "test-model");
    let mut session = SessionState::new();
    session.apply(Action::PickLanguage(Language::English));
    session.apply(Action::Escape);

    // Re-rendering a finished session checks the guard again; only the
    // first pass may call out.
    for _ in 0..3 {
        if session.needs_generation() {
            let generation = generator.generate(&session.answers, Language::English).await;
            session.store_itinerary(generation.text);
        }
    }

    assert_eq!(session.itinerary.as_deref(), Some("Day 1: Cairo"));
    server.verify().await;
}
