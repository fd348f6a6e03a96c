//! SQLite implementation of the CoachStore port.
//!
//! Local-first storage in a single database file. The schema is created by
//! the store itself on connect, and `reset` drops and recreates it. Profiles
//! are stored as a JSON payload column plus record metadata columns; plans
//! and reviews are plain rows referencing their owning profile.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use crate::domain::artifacts::{DailyPlan, WeeklyReview};
use crate::domain::foundation::{DomainError, PlanId, ProfileId, ReviewId, Timestamp};
use crate::domain::profile::{ProfileRecord, UserProfile};
use crate::ports::{CoachStore, StoreStats};

/// Schema version written to the metadata table.
const DB_VERSION: i32 = 1;

/// SQLite implementation of CoachStore.
#[derive(Clone)]
pub struct SqliteCoachStore {
    pool: SqlitePool,
}

impl SqliteCoachStore {
    /// Opens (creating if missing) the database file at `path` and
    /// initializes the schema.
    pub async fn connect(path: &str) -> Result<Self, DomainError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| DomainError::database(format!("Failed to open database: {}", e)))?;

        let store = Self { pool };
        store.init().await?;
        Ok(store)
    }

    /// Opens a fresh in-memory database. Used by tests and ephemeral runs.
    pub async fn connect_in_memory() -> Result<Self, DomainError> {
        // A single connection keeps every query on the same in-memory
        // database; separate connections would each get their own.
        let options = SqliteConnectOptions::new().filename(":memory:");

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| DomainError::database(format!("Failed to open database: {}", e)))?;

        let store = Self { pool };
        store.init().await?;
        Ok(store)
    }

    /// Creates the schema if it does not exist and records the version.
    async fn init(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_profiles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                profile_data TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to create user_profiles: {}", e)))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS daily_plans (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                date TEXT NOT NULL,
                plan_content TEXT NOT NULL,
                available_hours REAL,
                created_at TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES user_profiles (id)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to create daily_plans: {}", e)))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS weekly_reviews (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                week_start TEXT NOT NULL,
                week_end TEXT NOT NULL,
                review_content TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES user_profiles (id)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to create weekly_reviews: {}", e)))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS app_metadata (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to create app_metadata: {}", e)))?;

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO app_metadata (key, value, updated_at)
            VALUES ('db_version', ?1, ?2)
            "#,
        )
        .bind(DB_VERSION.to_string())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to record db version: {}", e)))?;

        Ok(())
    }

    /// Reads a metadata value.
    pub async fn metadata(&self, key: &str) -> Result<Option<String>, DomainError> {
        let row = sqlx::query("SELECT value FROM app_metadata WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to read metadata: {}", e)))?;

        Ok(row.map(|r| r.get("value")))
    }

    fn profile_record_from_row(row: &SqliteRow) -> Result<ProfileRecord, DomainError> {
        let id: i64 = row.get("id");
        let payload: String = row.get("profile_data");
        let profile: UserProfile = serde_json::from_str(&payload).map_err(|e| {
            DomainError::database(format!("Failed to deserialize profile {}: {}", id, e))
        })?;

        let created_at: DateTime<Utc> = row.get("created_at");
        let updated_at: DateTime<Utc> = row.get("updated_at");
        let is_active: bool = row.get("is_active");

        Ok(ProfileRecord {
            id: ProfileId::from_i64(id),
            is_active,
            created_at: Timestamp::from_datetime(created_at),
            updated_at: Timestamp::from_datetime(updated_at),
            profile,
        })
    }

    fn daily_plan_from_row(row: &SqliteRow) -> DailyPlan {
        let created_at: DateTime<Utc> = row.get("created_at");
        DailyPlan {
            id: PlanId::from_i64(row.get("id")),
            profile_id: ProfileId::from_i64(row.get("user_id")),
            date: row.get("date"),
            content: row.get("plan_content"),
            available_hours: row.get("available_hours"),
            created_at: Timestamp::from_datetime(created_at),
        }
    }

    fn weekly_review_from_row(row: &SqliteRow) -> WeeklyReview {
        let created_at: DateTime<Utc> = row.get("created_at");
        WeeklyReview {
            id: ReviewId::from_i64(row.get("id")),
            profile_id: ProfileId::from_i64(row.get("user_id")),
            week_start: row.get("week_start"),
            week_end: row.get("week_end"),
            content: row.get("review_content"),
            created_at: Timestamp::from_datetime(created_at),
        }
    }

    async fn count(&self, sql: &str) -> Result<u64, DomainError> {
        let row = sqlx::query(sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to count rows: {}", e)))?;
        let count: i64 = row.get(0);
        Ok(count as u64)
    }
}

#[async_trait]
impl CoachStore for SqliteCoachStore {
    async fn save_profile(&self, profile: &UserProfile) -> Result<ProfileId, DomainError> {
        let payload = serde_json::to_string(profile)
            .map_err(|e| DomainError::database(format!("Failed to serialize profile: {}", e)))?;
        let now = Utc::now();

        // Deactivate-then-insert runs in one transaction so the
        // single-active-profile invariant holds even if the insert fails.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to begin transaction: {}", e)))?;

        sqlx::query("UPDATE user_profiles SET is_active = 0 WHERE is_active = 1")
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database(format!("Failed to deactivate profiles: {}", e)))?;

        let result = sqlx::query(
            r#"
            INSERT INTO user_profiles (profile_data, created_at, updated_at, is_active)
            VALUES (?1, ?2, ?3, 1)
            "#,
        )
        .bind(&payload)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert profile: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit profile: {}", e)))?;

        let id = ProfileId::from_i64(result.last_insert_rowid());
        tracing::debug!(profile_id = %id, "profile saved as active");
        Ok(id)
    }

    async fn active_profile(&self) -> Result<Option<ProfileRecord>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, profile_data, created_at, updated_at, is_active
            FROM user_profiles
            WHERE is_active = 1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load active profile: {}", e)))?;

        row.as_ref().map(Self::profile_record_from_row).transpose()
    }

    async fn all_profiles(&self) -> Result<Vec<ProfileRecord>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, profile_data, created_at, updated_at, is_active
            FROM user_profiles
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load profiles: {}", e)))?;

        rows.iter().map(Self::profile_record_from_row).collect()
    }

    async fn update_profile(&self, id: ProfileId, profile: &UserProfile) -> Result<bool, DomainError> {
        let payload = serde_json::to_string(profile)
            .map_err(|e| DomainError::database(format!("Failed to serialize profile: {}", e)))?;

        let result = sqlx::query(
            r#"
            UPDATE user_profiles
            SET profile_data = ?1, updated_at = ?2
            WHERE id = ?3
            "#,
        )
        .bind(&payload)
        .bind(Utc::now())
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update profile: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn save_daily_plan(
        &self,
        owner: ProfileId,
        date: NaiveDate,
        content: &str,
        available_hours: f64,
    ) -> Result<PlanId, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO daily_plans (user_id, date, plan_content, available_hours, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(owner.as_i64())
        .bind(date)
        .bind(content)
        .bind(available_hours)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert daily plan: {}", e)))?;

        let id = PlanId::from_i64(result.last_insert_rowid());
        tracing::debug!(plan_id = %id, %date, "daily plan saved");
        Ok(id)
    }

    async fn plan_for(&self, owner: ProfileId, date: NaiveDate) -> Result<Option<DailyPlan>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, date, plan_content, available_hours, created_at
            FROM daily_plans
            WHERE user_id = ?1 AND date = ?2
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(owner.as_i64())
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load daily plan: {}", e)))?;

        Ok(row.as_ref().map(Self::daily_plan_from_row))
    }

    async fn recent_plans(&self, owner: ProfileId, limit: u32) -> Result<Vec<DailyPlan>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, date, plan_content, available_hours, created_at
            FROM daily_plans
            WHERE user_id = ?1
            ORDER BY date DESC, created_at DESC, id DESC
            LIMIT ?2
            "#,
        )
        .bind(owner.as_i64())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load recent plans: {}", e)))?;

        Ok(rows.iter().map(Self::daily_plan_from_row).collect())
    }

    async fn save_weekly_review(
        &self,
        owner: ProfileId,
        week_start: NaiveDate,
        week_end: NaiveDate,
        content: &str,
    ) -> Result<ReviewId, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO weekly_reviews (user_id, week_start, week_end, review_content, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(owner.as_i64())
        .bind(week_start)
        .bind(week_end)
        .bind(content)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert weekly review: {}", e)))?;

        let id = ReviewId::from_i64(result.last_insert_rowid());
        tracing::debug!(review_id = %id, %week_start, "weekly review saved");
        Ok(id)
    }

    async fn review_for(
        &self,
        owner: ProfileId,
        week_start: NaiveDate,
    ) -> Result<Option<WeeklyReview>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, week_start, week_end, review_content, created_at
            FROM weekly_reviews
            WHERE user_id = ?1 AND week_start = ?2
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(owner.as_i64())
        .bind(week_start)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load weekly review: {}", e)))?;

        Ok(row.as_ref().map(Self::weekly_review_from_row))
    }

    async fn all_reviews(&self, owner: ProfileId) -> Result<Vec<WeeklyReview>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, week_start, week_end, review_content, created_at
            FROM weekly_reviews
            WHERE user_id = ?1
            ORDER BY week_start DESC, created_at DESC, id DESC
            "#,
        )
        .bind(owner.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load weekly reviews: {}", e)))?;

        Ok(rows.iter().map(Self::weekly_review_from_row).collect())
    }

    async fn stats(&self) -> Result<StoreStats, DomainError> {
        let total_profiles = self.count("SELECT COUNT(*) FROM user_profiles").await?;
        let active_profiles = self
            .count("SELECT COUNT(*) FROM user_profiles WHERE is_active = 1")
            .await?;
        let total_daily_plans = self.count("SELECT COUNT(*) FROM daily_plans").await?;
        let total_weekly_reviews = self.count("SELECT COUNT(*) FROM weekly_reviews").await?;

        let page_count: i64 = sqlx::query("PRAGMA page_count")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to read page count: {}", e)))?
            .get(0);
        let page_size: i64 = sqlx::query("PRAGMA page_size")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to read page size: {}", e)))?
            .get(0);

        Ok(StoreStats {
            total_profiles,
            active_profiles,
            total_daily_plans,
            total_weekly_reviews,
            size_bytes: (page_count * page_size) as u64,
        })
    }

    async fn reset(&self) -> Result<(), DomainError> {
        for table in ["daily_plans", "weekly_reviews", "user_profiles", "app_metadata"] {
            sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::database(format!("Failed to drop {}: {}", table, e)))?;
        }

        self.init().await?;
        tracing::debug!("store reset to empty schema");
        Ok(())
    }
}
