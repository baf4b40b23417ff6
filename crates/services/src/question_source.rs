use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::{Question, QuestionDraft, QuestionId};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::error::QuestionSourceError;

/// Supplies the ordered question list for a quiz session.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch every question for one session.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSourceError` for transport, status, or payload failures.
    async fn fetch_questions(&self) -> Result<Vec<Question>, QuestionSourceError>;
}

//
// ─── HTTP ──────────────────────────────────────────────────────────────────────
//

/// Loads questions with a single unauthenticated GET returning a JSON array.
#[derive(Clone)]
pub struct HttpQuestionSource {
    client: Client,
    url: Url,
}

impl HttpQuestionSource {
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl QuestionSource for HttpQuestionSource {
    async fn fetch_questions(&self) -> Result<Vec<Question>, QuestionSourceError> {
        let response = self.client.get(self.url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(QuestionSourceError::HttpStatus(response.status()));
        }

        let body = response.bytes().await?;
        parse_questions(&body)
    }
}

/// Decode and validate a JSON question payload.
///
/// # Errors
///
/// Returns `QuestionSourceError::Decode` for malformed JSON and
/// `QuestionSourceError::InvalidQuestion` for records that fail validation.
pub fn parse_questions(body: &[u8]) -> Result<Vec<Question>, QuestionSourceError> {
    let records: Vec<QuestionRecord> = serde_json::from_slice(body)?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .into_draft(index)
                .validate()
                .map_err(|source| QuestionSourceError::InvalidQuestion { index, source })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionRecord {
    #[serde(default)]
    id: Option<u64>,
    question: String,
    options: Vec<String>,
    correct_option_index: usize,
}

impl QuestionRecord {
    fn into_draft(self, index: usize) -> QuestionDraft {
        // Records without an id are numbered by position, starting at 1.
        let id = self
            .id
            .unwrap_or_else(|| u64::try_from(index).map_or(u64::MAX, |i| i + 1));
        QuestionDraft {
            id: QuestionId::new(id),
            prompt: self.question,
            options: self.options,
            correct_option_index: self.correct_option_index,
        }
    }
}

//
// ─── STATIC ────────────────────────────────────────────────────────────────────
//

/// Fixed in-memory source, for tests and offline runs.
#[derive(Clone)]
pub struct StaticQuestionSource {
    questions: Option<Arc<[Question]>>,
}

impl StaticQuestionSource {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions: Some(Arc::from(questions)),
        }
    }

    /// A source whose every fetch fails.
    #[must_use]
    pub fn failing() -> Self {
        Self { questions: None }
    }
}

#[async_trait]
impl QuestionSource for StaticQuestionSource {
    async fn fetch_questions(&self) -> Result<Vec<Question>, QuestionSourceError> {
        self.questions
            .as_ref()
            .map(|questions| questions.to_vec())
            .ok_or_else(|| QuestionSourceError::Unavailable("static source has no questions".into()))
    }
}
