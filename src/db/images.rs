use chrono::Utc;

use super::Store;
use crate::error::Result;
use crate::models::{Image, Page, PageRequest};

impl Store {
    /// Append an image and return its id
    pub async fn insert_image(&self, image_data: &str) -> Result<i64> {
        let id = sqlx::query("INSERT INTO images (image_data, created_at) VALUES (?, ?)")
            .bind(image_data)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        Ok(id)
    }

    pub async fn get_image(&self, id: i64) -> Result<Option<Image>> {
        let image =
            sqlx::query_as::<_, Image>("SELECT id, image_data, created_at FROM images WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(image)
    }

    /// Most recently inserted images first
    pub async fn list_images(&self, page: PageRequest) -> Result<Page<Image>> {
        // Page and count read from the same snapshot
        let mut tx = self.pool.begin().await?;

        let records = sqlx::query_as::<_, Image>(
            "SELECT id, image_data, created_at FROM images \
             ORDER BY id DESC LIMIT ? OFFSET ?",
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&mut *tx)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM images")
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Page { records, total })
    }
}

#[cfg(test)]
mod tests {
    use crate::db::test_support::temp_store;
    use crate::models::PageRequest;

    #[tokio::test]
    async fn test_insert_then_get_round_trips_payload() {
        let (_dir, store) = temp_store().await;
        let data = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAAB";

        let id = store.insert_image(data).await.unwrap();
        assert_eq!(id, 1);

        let image = store.get_image(id).await.unwrap().unwrap();
        assert_eq!(image.id, id);
        assert_eq!(image.image_data, data);
    }

    #[tokio::test]
    async fn test_get_missing_image() {
        let (_dir, store) = temp_store().await;
        assert!(store.get_image(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_images_newest_first_with_total() {
        let (_dir, store) = temp_store().await;
        for i in 0..5 {
            store.insert_image(&format!("payload-{}", i)).await.unwrap();
        }

        let page = store
            .list_images(PageRequest {
                limit: 2,
                offset: 1,
            })
            .await
            .unwrap();

        assert_eq!(page.total, 5);
        let ids: Vec<i64> = page.records.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![4, 3]);
    }

    #[tokio::test]
    async fn test_list_order_ignores_clock_skew() {
        let (_dir, store) = temp_store().await;
        store.insert_image("first").await.unwrap();
        store.insert_image("second").await.unwrap();
        // Clock stepped back between the two inserts
        sqlx::query("UPDATE images SET created_at = '2099-01-01T00:00:00+00:00' WHERE id = 1")
            .execute(&store.pool)
            .await
            .unwrap();

        let page = store
            .list_images(PageRequest {
                limit: 10,
                offset: 0,
            })
            .await
            .unwrap();

        let ids: Vec<i64> = page.records.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
