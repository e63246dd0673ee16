//! Optional PostgreSQL audit log of screened batches.

use sqlx::PgPool;
use tracing::{info, warn};

use crate::fips_tests::{all_tests, FipsTest, TestVerdict};
use crate::{ScreenRequest, ScreenResponse};

/// Who asked for a screening and how long it took.
#[derive(Debug, Clone)]
pub struct BatchContext<'a> {
    pub batch_id: uuid::Uuid,
    pub client_ip: &'a str,
    pub user_agent: &'a str,
    pub processing_time_ms: i32,
}

/// Log a screened batch and every per-key verdict.
/// Individual verdict failures are warned about and skipped
pub async fn log_batch_to_database(
    pool: &PgPool,
    context: &BatchContext<'_>,
    request: &ScreenRequest,
    response: &ScreenResponse,
) -> Result<(), sqlx::Error> {
    let error_message = if response.matrix.is_none() {
        Some(response.message.as_str())
    } else {
        None
    };

    sqlx::query(
        r#"
        INSERT INTO batches (
            batch_id, created_at, analyzed_at, client_ip, user_agent,
            encoding, profile, key_count, valid,
            processing_time_ms, error_message
        ) VALUES (
            $1, NOW(), $2, $3, $4,
            $5, $6, $7, $8,
            $9, $10
        )
        "#,
    )
    .bind(context.batch_id)
    .bind(response.analyzed_at)
    .bind(context.client_ip)
    .bind(context.user_agent)
    .bind(request.encoding.name())
    .bind(request.profile.name())
    .bind(response.key_count as i32)
    .bind(response.valid)
    .bind(context.processing_time_ms)
    .bind(error_message)
    .execute(pool)
    .await?;

    if let Some(ref matrix) = response.matrix {
        for row in &matrix.rows {
            for verdict in &row.verdicts {
                if let Err(e) =
                    log_verdict_to_database(pool, context.batch_id, row.key, verdict).await
                {
                    warn!(
                        "Failed to log {} verdict for key {} in batch {}: {}",
                        verdict.test.name(),
                        row.key,
                        context.batch_id,
                        e
                    );
                }
            }
        }
    }

    info!("Batch logged to database: batch_id={}", context.batch_id);
    Ok(())
}

fn describe(test: FipsTest) -> &'static str {
    all_tests()
        .iter()
        .find(|definition| definition.test == test)
        .map(|definition| definition.description)
        .unwrap_or("")
}

/// Log one (key, test) verdict
pub async fn log_verdict_to_database(
    pool: &PgPool,
    batch_id: uuid::Uuid,
    key_index: usize,
    verdict: &TestVerdict,
) -> Result<(), sqlx::Error> {
    // Get or create the test definition
    let test_id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO test_definitions (test_name, description)
        VALUES ($1, $2)
        ON CONFLICT (test_name) DO UPDATE SET test_name = EXCLUDED.test_name
        RETURNING id
        "#,
    )
    .bind(verdict.test.name())
    .bind(describe(verdict.test))
    .fetch_one(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO key_results (batch_id, key_index, test_id, passed, statistic, detail)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (batch_id, key_index, test_id) DO UPDATE SET
            passed = EXCLUDED.passed,
            statistic = EXCLUDED.statistic,
            detail = EXCLUDED.detail
        "#,
    )
    .bind(batch_id)
    .bind(key_index as i32)
    .bind(test_id)
    .bind(verdict.passed)
    .bind(verdict.statistic)
    .bind(&verdict.detail)
    .execute(pool)
    .await?;

    Ok(())
}
