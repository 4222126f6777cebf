//! User database operations for authentication

use super::AppState;
use crate::auth::model::User;
use uuid::Uuid;

const USER_COLUMNS: &str =
    "id, username, email, password_hash, role, refresh_token, created_at";

impl AppState {
    /// Get count of users in database
    pub async fn count_users(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
    }

    /// Get count of users holding the admin role
    pub async fn count_admins(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = 'admin'")
            .fetch_one(&self.pool)
            .await
    }

    /// Get user by username
    pub async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }

    /// Get user by refresh token
    pub async fn get_user_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE refresh_token = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(refresh_token)
            .fetch_optional(&self.pool)
            .await
    }

    /// Create new user
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, username, email, password_hash, role) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(Uuid::new_v4())
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .bind(role)
            .fetch_one(&self.pool)
            .await
    }

    /// Update user's refresh token (invalidates previous sessions)
    pub async fn update_user_refresh_token(
        &self,
        user_id: &Uuid,
        refresh_token: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET refresh_token = $1 WHERE id = $2")
            .bind(refresh_token)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires database connection"]
    async fn test_user_count_empty() {
        // Placeholder for integration test against a real PostgreSQL instance.
    }

    #[test]
    fn test_user_model_clone() {
        let user = User {
            id: Uuid::new_v4(),
            username: "test".to_string(),
            email: "test@example.org".to_string(),
            password_hash: "hash".to_string(),
            role: "employee".to_string(),
            refresh_token: None,
            created_at: None,
        };

        let cloned = user.clone();
        assert_eq!(user.id, cloned.id);
        assert_eq!(user.username, cloned.username);
    }
}
