//! Profile repository implementation.
//!
//! Multi-row writes (creation, interest replacement) run in one
//! transaction; dropping the transaction on any error rolls it back.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use kuconnect_core::result::AppResult;
use kuconnect_core::types::{InterestId, PageRequest, ProfileId, UserId};
use kuconnect_entity::profile::{Embedding, Profile, ProfileFields, RankedProfile};
use kuconnect_entity::settings::Settings;

use super::{PROFILE_COLUMNS, PROFILE_COLUMNS_P};
use crate::errors::map_sqlx;
use crate::store::ProfileStore;

/// Repository for profiles, their interests and embeddings.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_interests(
        tx: &mut Transaction<'_, Postgres>,
        user_id: UserId,
        interest_ids: &[InterestId],
    ) -> AppResult<()> {
        if interest_ids.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO user_interests (user_id, interest_id) \
             SELECT $1, unnest($2::uuid[]) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(interest_ids)
        .execute(&mut **tx)
        .await
        .map_err(map_sqlx("insert user interests"))?;
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for ProfileRepository {
    async fn create_profile(
        &self,
        user_id: UserId,
        fields: ProfileFields,
        interest_ids: &[InterestId],
        embedding: &Embedding,
    ) -> AppResult<Profile> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(map_sqlx("begin transaction"))?;

        let sql = format!(
            "INSERT INTO profiles (id, user_id, display_name, bio, image, birthdate, faculty, \
             department, year, line, facebook, instagram, other, embedding, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14::text::vector, $15, $15) \
             RETURNING {PROFILE_COLUMNS}"
        );
        let profile = sqlx::query_as::<_, Profile>(&sql)
            .bind(ProfileId::new())
            .bind(user_id)
            .bind(&fields.display_name)
            .bind(&fields.bio)
            .bind(&fields.image)
            .bind(fields.birthdate)
            .bind(&fields.faculty)
            .bind(&fields.department)
            .bind(fields.year)
            .bind(&fields.line)
            .bind(&fields.facebook)
            .bind(&fields.instagram)
            .bind(&fields.other)
            .bind(embedding.to_pg_literal())
            .bind(now)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx("insert profile"))?;

        Self::insert_interests(&mut tx, user_id, interest_ids).await?;

        let settings = Settings::defaults_for(user_id, now);
        sqlx::query(
            "INSERT INTO settings (user_id, profile_visibility, contact_info_visibility, \
             noti_new_message, noti_new_connection_request, noti_new_connection_request_accept, \
             created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $7) \
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(settings.user_id)
        .bind(settings.profile_visibility)
        .bind(settings.contact_info_visibility)
        .bind(settings.noti_new_message)
        .bind(settings.noti_new_connection_request)
        .bind(settings.noti_new_connection_request_accept)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx("insert default settings"))?;

        tx.commit().await.map_err(map_sqlx("commit profile creation"))?;
        debug!(user_id = %user_id, profile_id = %profile.id, "Profile created");
        Ok(profile)
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        fields: ProfileFields,
    ) -> AppResult<Option<Profile>> {
        let sql = format!(
            "UPDATE profiles SET display_name = $2, bio = $3, image = $4, birthdate = $5, \
             faculty = $6, department = $7, year = $8, line = $9, facebook = $10, \
             instagram = $11, other = $12, updated_at = $13 \
             WHERE user_id = $1 RETURNING {PROFILE_COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&sql)
            .bind(user_id)
            .bind(&fields.display_name)
            .bind(&fields.bio)
            .bind(&fields.image)
            .bind(fields.birthdate)
            .bind(&fields.faculty)
            .bind(&fields.department)
            .bind(fields.year)
            .bind(&fields.line)
            .bind(&fields.facebook)
            .bind(&fields.instagram)
            .bind(&fields.other)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx("update profile"))
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<Profile>> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx("find profile by user"))
    }

    async fn find_by_users(&self, user_ids: &[UserId]) -> AppResult<Vec<Profile>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = ANY($1)");
        sqlx::query_as::<_, Profile>(&sql)
            .bind(user_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx("find profiles by users"))
    }

    async fn replace_interests(
        &self,
        user_id: UserId,
        interest_ids: &[InterestId],
        embedding: Option<&Embedding>,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx("begin transaction"))?;

        sqlx::query("DELETE FROM user_interests WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx("clear user interests"))?;

        Self::insert_interests(&mut tx, user_id, interest_ids).await?;

        if let Some(embedding) = embedding {
            sqlx::query(
                "UPDATE profiles SET embedding = $2::text::vector, updated_at = $3 \
                 WHERE user_id = $1",
            )
            .bind(user_id)
            .bind(embedding.to_pg_literal())
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx("refresh profile embedding"))?;
        }

        tx.commit().await.map_err(map_sqlx("commit interest replacement"))?;
        Ok(())
    }

    async fn rank_candidates(
        &self,
        viewer: UserId,
        page: PageRequest,
    ) -> AppResult<Vec<RankedProfile>> {
        let sql = format!(
            "SELECT {PROFILE_COLUMNS_P}, s.contact_info_visibility, \
                    1 - (p.embedding <=> v.embedding) AS similarity \
             FROM profiles p \
             JOIN settings s ON s.user_id = p.user_id \
             LEFT JOIN profiles v ON v.user_id = $1 \
             WHERE p.user_id <> $1 \
               AND s.profile_visibility = 'public' \
               AND NOT EXISTS ( \
                   SELECT 1 FROM interactions i \
                   WHERE i.from_user_id = $1 AND i.to_user_id = p.user_id) \
             ORDER BY similarity DESC NULLS LAST, p.user_id \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, RankedProfile>(&sql)
            .bind(viewer)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx("rank candidate profiles"))
    }
}
