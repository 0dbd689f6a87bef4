use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct KnowledgeQueryRequest {
    pub trainer_id: i64,
    pub question: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerSource {
    Faq,
    Fallback,
}

#[derive(Debug, Serialize)]
pub struct KnowledgeAnswer {
    pub answer: String,
    pub source: AnswerSource,
}

#[derive(Debug, Deserialize)]
pub struct NewEntryRequest {
    pub question: String,
    pub answer: String,
    pub embeddings: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NewEntryResponse {
    pub status: &'static str,
    pub entry_id: i64,
}
