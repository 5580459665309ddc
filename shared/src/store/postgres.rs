use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, QueryBuilder};

use crate::filter::{escape_like, SearchFilter};
use crate::models::MeetingRecord;
use crate::store::{MeetingStore, StoreError};

const SELECT_COLUMNS: &str = "id, organizer, participants, meeting_date, meeting_time, \
                              recording_url, transcript, summary";

/// sqlx-backed store; the backend-native evaluator of [`SearchFilter`].
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }

    /// Connects lazily so a backend that is down at startup degrades to the
    /// fallback path instead of failing the whole service.
    pub fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.into()))?;
        Ok(())
    }
}

#[async_trait]
impl MeetingStore for PostgresStore {
    async fn insert(&self, record: MeetingRecord) -> Result<MeetingRecord, StoreError> {
        let inserted = sqlx::query_as::<_, MeetingRecord>(
            r#"
            INSERT INTO meetings (id, organizer, participants, meeting_date, meeting_time,
                                  recording_url, transcript, summary)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, organizer, participants, meeting_date, meeting_time,
                      recording_url, transcript, summary
            "#,
        )
        .bind(&record.id)
        .bind(&record.organizer)
        .bind(&record.participants)
        .bind(record.meeting_date)
        .bind(&record.meeting_time)
        .bind(&record.recording_url)
        .bind(&record.transcript)
        .bind(&record.summary)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateId(record.id.clone())
            }
            _ => StoreError::from(e),
        })?;

        Ok(inserted)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<MeetingRecord>, StoreError> {
        let record = sqlx::query_as::<_, MeetingRecord>(&format!(
            "SELECT {SELECT_COLUMNS} FROM meetings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list(&self, descending: bool) -> Result<Vec<MeetingRecord>, StoreError> {
        let direction = if descending { "DESC" } else { "ASC" };
        let records = sqlx::query_as::<_, MeetingRecord>(&format!(
            "SELECT {SELECT_COLUMNS} FROM meetings ORDER BY meeting_date {direction}, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn list_filtered(
        &self,
        filter: &SearchFilter,
    ) -> Result<Vec<MeetingRecord>, StoreError> {
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new(format!("SELECT {SELECT_COLUMNS} FROM meetings WHERE TRUE"));

        if let Some(query) = &filter.query {
            let pattern = format!("%{}%", escape_like(query));
            builder
                .push(" AND (summary ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR transcript ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        if let Some(organizer) = &filter.organizer {
            builder
                .push(" AND organizer ILIKE ")
                .push_bind(format!("%{}%", escape_like(organizer)));
        }

        if let Some(from) = filter.date_from {
            builder.push(" AND meeting_date >= ").push_bind(from);
        }

        if let Some(to) = filter.date_to {
            builder.push(" AND meeting_date <= ").push_bind(to);
        }

        builder.push(" ORDER BY meeting_date DESC, id ASC");

        let records = builder
            .build_query_as::<MeetingRecord>()
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }
}
