use std::sync::Arc;

use axum::{Router, http::StatusCode, routing::get};
use quiz_core::model::{LoadError, QuestionId};
use services::{
    HttpQuestionSource, QuestionSource, QuestionSourceError, QuizController, QuizSettings,
};
use tokio::net::TcpListener;
use url::Url;

const QUESTIONS: &str = r#"[
    {"id": 1, "question": "Capital of France?", "options": ["Paris", "Rome", "Oslo"], "correctOptionIndex": 0},
    {"id": 2, "question": "2 + 3?", "options": ["4", "5"], "correctOptionIndex": 1}
]"#;

async fn spawn_question_server() -> std::io::Result<Url> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let app = Router::new()
        .route("/questions", get(|| async { QUESTIONS }))
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/garbage", get(|| async { "<html>not json</html>" }));

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(Url::parse(&format!("http://{addr}/")).expect("server url"))
}

#[tokio::test]
async fn fetches_and_validates_questions() {
    let base = spawn_question_server().await.expect("spawn server");
    let source = HttpQuestionSource::new(base.join("questions").unwrap());

    let questions = source.fetch_questions().await.unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].id(), QuestionId::new(1));
    assert_eq!(questions[0].prompt(), "Capital of France?");
    assert_eq!(questions[0].option(0), Some("Paris"));
    assert!(questions[1].is_correct(1));
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let base = spawn_question_server().await.expect("spawn server");
    let source = HttpQuestionSource::new(base.join("broken").unwrap());

    let err = source.fetch_questions().await.unwrap_err();
    assert!(matches!(
        err,
        QuestionSourceError::HttpStatus(status) if status.as_u16() == 500
    ));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let base = spawn_question_server().await.expect("spawn server");
    let source = HttpQuestionSource::new(base.join("garbage").unwrap());

    let err = source.fetch_questions().await.unwrap_err();
    assert!(matches!(err, QuestionSourceError::Decode(_)));
}

#[tokio::test]
async fn controller_loads_from_http_and_reports_failures() {
    let base = spawn_question_server().await.expect("spawn server");

    let quiz = QuizController::new(
        Arc::new(HttpQuestionSource::new(base.join("questions").unwrap())),
        QuizSettings::default(),
    );
    let state = quiz.start().await;
    assert_eq!(state.total(), 2);
    assert_eq!(state.error(), None);
    assert!(quiz.is_timer_running());

    let quiz = QuizController::new(
        Arc::new(HttpQuestionSource::new(base.join("broken").unwrap())),
        QuizSettings::default(),
    );
    let state = quiz.start().await;
    assert_eq!(state.error(), Some(LoadError::FetchFailed));
    assert_eq!(state.total(), 0);
}
