use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{ApiError, ApiResult};

use super::dto::{AnswerSource, KnowledgeAnswer, NewEntryRequest};
use super::repo;

pub const FALLBACK_ANSWER: &str = "No answer found. Please contact your trainer.";

/// Looks the question up in the trainer's FAQ. Anything without an exact
/// match gets the fixed fallback answer.
pub async fn answer(db: &SqlitePool, trainer_id: i64, question: &str) -> ApiResult<KnowledgeAnswer> {
    match repo::find_answer(db, trainer_id, question).await? {
        Some(answer) => Ok(KnowledgeAnswer {
            answer,
            source: AnswerSource::Faq,
        }),
        None => {
            debug!(trainer_id, "faq miss, using fallback");
            Ok(KnowledgeAnswer {
                answer: FALLBACK_ANSWER.to_string(),
                source: AnswerSource::Fallback,
            })
        }
    }
}

pub async fn add_entry(db: &SqlitePool, trainer_id: i64, req: &NewEntryRequest) -> ApiResult<i64> {
    if req.question.trim().is_empty() || req.answer.trim().is_empty() {
        return Err(ApiError::invalid("question and answer must not be empty"));
    }
    let id = repo::insert_entry(
        db,
        trainer_id,
        &req.question,
        &req.answer,
        req.embeddings.as_deref(),
    )
    .await?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use crate::testing::seed_trainer;

    fn entry(question: &str, answer: &str) -> NewEntryRequest {
        NewEntryRequest {
            question: question.into(),
            answer: answer.into(),
            embeddings: Some("[0.1, 0.2]".into()),
        }
    }

    #[tokio::test]
    async fn exact_match_hits_faq() {
        let state = AppState::for_tests().await;
        let trainer = seed_trainer(&state.db, "t1", "ABC").await;
        let other = seed_trainer(&state.db, "t2", "XYZ").await;
        add_entry(&state.db, trainer, &entry("How much water?", "Two liters."))
            .await
            .unwrap();

        let hit = answer(&state.db, trainer, "How much water?").await.unwrap();
        assert_eq!(hit.source, AnswerSource::Faq);
        assert_eq!(hit.answer, "Two liters.");

        for (who, question) in [
            (trainer, "how much water?"),
            (trainer, "How much water? "),
            (other, "How much water?"),
        ] {
            let miss = answer(&state.db, who, question).await.unwrap();
            assert_eq!(miss.source, AnswerSource::Fallback);
            assert_eq!(miss.answer, FALLBACK_ANSWER);
        }
    }

    #[tokio::test]
    async fn duplicate_question_conflicts() {
        let state = AppState::for_tests().await;
        let trainer = seed_trainer(&state.db, "t1", "ABC").await;
        add_entry(&state.db, trainer, &entry("Q", "A")).await.unwrap();
        let err = add_entry(&state.db, trainer, &entry("Q", "B")).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn blank_entries_are_rejected() {
        let state = AppState::for_tests().await;
        let trainer = seed_trainer(&state.db, "t1", "ABC").await;
        let err = add_entry(&state.db, trainer, &entry(" ", "A")).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }
}
