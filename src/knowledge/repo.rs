use sqlx::sqlite::SqliteExecutor;

/// Exact, case-sensitive match on the question text within one trainer.
pub async fn find_answer<'e>(
    db: impl SqliteExecutor<'e>,
    trainer_id: i64,
    question: &str,
) -> sqlx::Result<Option<String>> {
    let row: Option<(String,)> = sqlx::query_as(
        r#"
        SELECT answer
        FROM knowledge_base
        WHERE trainer_id = $1 AND question = $2
        "#,
    )
    .bind(trainer_id)
    .bind(question)
    .fetch_optional(db)
    .await?;
    Ok(row.map(|(answer,)| answer))
}

/// `embeddings` is stored verbatim and not used for lookups.
pub async fn insert_entry<'e>(
    db: impl SqliteExecutor<'e>,
    trainer_id: i64,
    question: &str,
    answer: &str,
    embeddings: Option<&str>,
) -> sqlx::Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO knowledge_base (trainer_id, question, answer, embeddings)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(trainer_id)
    .bind(question)
    .bind(answer)
    .bind(embeddings)
    .fetch_one(db)
    .await?;
    Ok(id)
}
