use async_trait::async_trait;
use error_stack::{Report, ResultExt};
use std::collections::HashMap;

use super::{StoreError, StoreResult, UserStore};
use crate::database::{ErrorExt, Pool, PoolConnection};
use crate::types::{Followee, InsertUser, User, UserId};

const USER_COLUMNS: &str = "id, name, email, password, profile_image";

/// A [`UserStore`] backed by the `users` and `user_followees` tables.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: Pool,
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: UserId,
    name: String,
    email: String,
    password: String,
    profile_image: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct FolloweeRow {
    owner_id: UserId,
    #[sqlx(flatten)]
    user: UserRow,
}

impl From<UserRow> for Followee {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            password: row.password.into(),
            profile_image: row.profile_image,
        }
    }
}

impl PgUserStore {
    #[must_use]
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    async fn connection(&self) -> StoreResult<PoolConnection> {
        self.pool
            .get()
            .await
            .change_context(StoreError)
            .attach_printable("could not obtain database connection")
    }

    /// Attaches followee lists to freshly queried rows, keeping the
    /// order of `rows` and the follow order inside each list.
    async fn with_followees(
        conn: &mut PoolConnection,
        rows: Vec<UserRow>,
    ) -> StoreResult<Vec<User>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids = rows.iter().map(|row| row.id.0).collect::<Vec<_>>();
        let followees = sqlx::query_as::<_, FolloweeRow>(
            r"SELECT f.user_id AS owner_id, u.id, u.name, u.email, u.password, u.profile_image
            FROM user_followees f
            JOIN users u ON u.id = f.followee_id
            WHERE f.user_id = ANY($1)
            ORDER BY f.user_id, f.position",
        )
        .bind(&ids)
        .fetch_all(&mut **conn)
        .await
        .into_db_error()
        .change_context(StoreError)
        .attach_printable("could not load followees")?;

        let mut lists: HashMap<UserId, Vec<Followee>> = HashMap::new();
        for row in followees {
            lists.entry(row.owner_id).or_default().push(row.user.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| User {
                followees: lists.remove(&row.id).unwrap_or_default(),
                id: row.id,
                name: row.name,
                email: row.email,
                password: row.password.into(),
                profile_image: row.profile_image,
            })
            .collect())
    }

    async fn fetch_users(
        &self,
        query: sqlx::query::QueryAs<'_, sqlx::Postgres, UserRow, sqlx::postgres::PgArguments>,
    ) -> StoreResult<Vec<User>> {
        let mut conn = self.connection().await?;
        let rows = query
            .fetch_all(&mut *conn)
            .await
            .into_db_error()
            .change_context(StoreError)?;

        Self::with_followees(&mut conn, rows).await
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[tracing::instrument(skip_all, name = "db.users.find_by_email_exact")]
    async fn find_by_email_exact(&self, email: &str) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1 ORDER BY id LIMIT 1");
        let users = self
            .fetch_users(sqlx::query_as(&sql).bind(email))
            .await
            .attach_printable("could not find user by email")?;

        Ok(users.into_iter().next())
    }

    #[tracing::instrument(skip_all, name = "db.users.find_by_id")]
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let users = self
            .fetch_users(sqlx::query_as(&sql).bind(id))
            .await
            .attach_printable("could not find user by id")?;

        Ok(users.into_iter().next())
    }

    #[tracing::instrument(skip_all, name = "db.users.insert")]
    async fn insert(&self, user: &InsertUser) -> StoreResult<User> {
        let mut conn = self.connection().await?;
        let sql = format!(
            "INSERT INTO users (name, email, password, profile_image) \
            VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.password.as_str())
            .bind(user.profile_image.as_deref())
            .fetch_one(&mut *conn)
            .await
            .into_db_error()
            .change_context(StoreError)
            .attach_printable("could not insert user")?;

        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            password: row.password.into(),
            profile_image: row.profile_image,
            followees: Vec::new(),
        })
    }

    #[tracing::instrument(skip_all, name = "db.users.save")]
    async fn save(&self, user: &User) -> StoreResult<User> {
        let mut tx = self.pool.begin().await.change_context(StoreError)?;

        let updated = sqlx::query(
            r"UPDATE users SET name = $2, email = $3, password = $4, profile_image = $5
            WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.password.as_str())
        .bind(user.profile_image.as_deref())
        .execute(&mut *tx)
        .await
        .into_db_error()
        .change_context(StoreError)
        .attach_printable("could not update user")?;

        if updated.rows_affected() == 0 {
            return Err(Report::new(StoreError)
                .attach_printable(format!("user {} does not exist", user.id)));
        }

        let followees = user
            .followees
            .iter()
            .map(|followee| followee.id.0)
            .collect::<Vec<_>>();

        // edges to deleted users are invisible to callers, so only
        // edges to existing users are dropped here
        sqlx::query(
            r"DELETE FROM user_followees
            WHERE user_id = $1
                AND followee_id <> ALL($2::BIGINT[])
                AND followee_id IN (SELECT id FROM users)",
        )
        .bind(user.id)
        .bind(&followees)
        .execute(&mut *tx)
        .await
        .into_db_error()
        .change_context(StoreError)
        .attach_printable("could not remove followees")?;

        sqlx::query(
            r"INSERT INTO user_followees (user_id, followee_id, position)
            SELECT $1, f.id, (
                SELECT COALESCE(MAX(position), -1) FROM user_followees WHERE user_id = $1
            ) + f.ord::INTEGER
            FROM UNNEST($2::BIGINT[]) WITH ORDINALITY AS f(id, ord)
            ON CONFLICT (user_id, followee_id) DO NOTHING",
        )
        .bind(user.id)
        .bind(&followees)
        .execute(&mut *tx)
        .await
        .into_db_error()
        .change_context(StoreError)
        .attach_printable("could not store followees")?;

        tx.commit()
            .await
            .into_db_error()
            .change_context(StoreError)
            .attach_printable("could not commit user")?;

        Ok(user.clone())
    }

    #[tracing::instrument(skip_all, name = "db.users.delete")]
    async fn delete(&self, user: &User) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user.id)
            .execute(&mut *conn)
            .await
            .into_db_error()
            .change_context(StoreError)
            .attach_printable("could not delete user")?;

        Ok(())
    }

    #[tracing::instrument(skip_all, name = "db.users.search_containing_name")]
    async fn search_containing_name(&self, pattern: &str) -> StoreResult<Vec<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE name LIKE $1 ESCAPE '' ORDER BY id"
        );
        self.fetch_users(sqlx::query_as(&sql).bind(pattern))
            .await
            .attach_printable("could not search users by name")
    }

    #[tracing::instrument(skip_all, name = "db.users.find_all_following")]
    async fn find_all_following(&self, target: UserId) -> StoreResult<Vec<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id IN \
            (SELECT user_id FROM user_followees WHERE followee_id = $1) ORDER BY id"
        );
        self.fetch_users(sqlx::query_as(&sql).bind(target))
            .await
            .attach_printable("could not find followers")
    }
}
