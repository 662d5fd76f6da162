use chrono::Utc;

use super::Store;
use crate::error::Result;
use crate::models::{NewUser, Page, PageRequest, User};

impl Store {
    /// Append a user and return its id
    pub async fn insert_user(&self, user: &NewUser) -> Result<i64> {
        let id = sqlx::query(
            "INSERT INTO users (username, email, time, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.time)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(id)
    }

    pub async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, time, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Most recently inserted users first
    pub async fn list_users(&self, page: PageRequest) -> Result<Page<User>> {
        let mut tx = self.pool.begin().await?;

        let records = sqlx::query_as::<_, User>(
            "SELECT id, username, email, time, created_at FROM users \
             ORDER BY id DESC LIMIT ? OFFSET ?",
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&mut *tx)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Page { records, total })
    }
}

#[cfg(test)]
mod tests {
    use crate::db::test_support::temp_store;
    use crate::models::{NewUser, PageRequest};

    fn new_user(name: &str) -> NewUser {
        NewUser {
            username: name.to_string(),
            email: format!("{}@example.com", name),
            time: "01:23".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_user() {
        let (_dir, store) = temp_store().await;

        let id = store.insert_user(&new_user("ana")).await.unwrap();
        let user = store.get_user(id).await.unwrap().unwrap();

        assert_eq!(user.username, "ana");
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.time, "01:23");
    }

    #[tokio::test]
    async fn test_list_users_offset_past_end() {
        let (_dir, store) = temp_store().await;
        store.insert_user(&new_user("ana")).await.unwrap();
        store.insert_user(&new_user("beto")).await.unwrap();

        let page = store
            .list_users(PageRequest {
                limit: 10,
                offset: 5,
            })
            .await
            .unwrap();

        assert!(page.records.is_empty());
        assert_eq!(page.total, 2);
    }
}
