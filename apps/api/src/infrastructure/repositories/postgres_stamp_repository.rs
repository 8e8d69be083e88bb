use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::repositories::{RepositoryError, StampRepository};
use crate::domain::stamp::{HexColor, NewStamp, Stamp};

/// PostgreSQL implementation of StampRepository
#[derive(Clone)]
pub struct PostgresStampRepository {
    pool: PgPool,
}

impl PostgresStampRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct StampRow {
    id: i64,
    text: String,
    language: String,
    text_color: String,
    background_color: String,
    selected_effect: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<StampRow> for Stamp {
    type Error = RepositoryError;

    fn try_from(row: StampRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = |e: String| RepositoryError::Corrupt(format!("stamp {}: {}", id, e));

        Ok(Stamp {
            id,
            language: row.language.parse().map_err(corrupt)?,
            text_color: HexColor::new(&row.text_color).map_err(corrupt)?,
            background_color: HexColor::new(&row.background_color).map_err(corrupt)?,
            selected_effect: row.selected_effect.parse().map_err(corrupt)?,
            created_at: row.created_at,
            text: row.text,
        })
    }
}

#[async_trait]
impl StampRepository for PostgresStampRepository {
    async fn create(&self, stamp: NewStamp) -> Result<Stamp, RepositoryError> {
        let row = sqlx::query_as::<_, StampRow>(
            r#"
            INSERT INTO stamps (
                text, language, text_color, background_color, selected_effect, created_at
            )
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING id, text, language, text_color, background_color, selected_effect, created_at
            "#,
        )
        .bind(stamp.text())
        .bind(stamp.language().as_str())
        .bind(stamp.text_color().as_str())
        .bind(stamp.background_color().as_str())
        .bind(stamp.selected_effect().as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Stamp>, RepositoryError> {
        let rows = sqlx::query_as::<_, StampRow>(
            r#"
            SELECT id, text, language, text_color, background_color, selected_effect, created_at
            FROM stamps
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Stamp::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Stamp>, RepositoryError> {
        let row = sqlx::query_as::<_, StampRow>(
            r#"
            SELECT id, text, language, text_color, background_color, selected_effect, created_at
            FROM stamps
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Stamp::try_from).transpose()
    }
}
