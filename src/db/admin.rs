use std::path::Path;

use super::{RecordKind, Store};
use crate::error::Result;
use crate::models::{format_bytes, DatabaseStats};

impl Store {
    /// Delete every row of one kind and restart its id counter
    ///
    /// Returns the number of rows deleted.
    pub async fn clear(&self, kind: RecordKind) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let deleted = clear_in(&mut tx, kind).await?;
        tx.commit().await?;

        tracing::info!("Cleared {} rows from {}", deleted, kind.table());
        Ok(deleted)
    }

    /// Delete every row of every kind and restart all id counters
    ///
    /// Returns the rows deleted per kind.
    pub async fn clear_all(&self) -> Result<Vec<(RecordKind, u64)>> {
        let mut tx = self.pool.begin().await?;
        let mut deleted = Vec::with_capacity(RecordKind::ALL.len());
        for kind in RecordKind::ALL {
            deleted.push((kind, clear_in(&mut tx, kind).await?));
        }
        tx.commit().await?;

        tracing::info!("Cleared all tables");
        Ok(deleted)
    }

    /// Drop and recreate the whole schema
    ///
    /// Returns the rows each table held when it was dropped.
    pub async fn reset_all(&self) -> Result<Vec<(RecordKind, u64)>> {
        let mut tx = self.pool.begin().await?;
        let mut dropped = Vec::with_capacity(RecordKind::ALL.len());
        for kind in RecordKind::ALL {
            // Tolerate a table removed by hand
            let exists: bool = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?)",
            )
            .bind(kind.table())
            .fetch_one(&mut *tx)
            .await?;
            let rows = if exists {
                let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
                sqlx::query_scalar::<_, i64>(&sql).fetch_one(&mut *tx).await?
            } else {
                0
            };
            dropped.push((kind, rows as u64));
        }
        for kind in RecordKind::ALL {
            let sql = format!("DROP TABLE IF EXISTS {}", kind.table());
            sqlx::query(&sql).execute(&mut *tx).await?;
        }
        for kind in RecordKind::ALL {
            sqlx::query(kind.create_sql()).execute(&mut *tx).await?;
        }
        tx.commit().await?;

        tracing::warn!("Database schema dropped and recreated");
        Ok(dropped)
    }

    pub async fn stats(&self) -> Result<DatabaseStats> {
        let mut tx = self.pool.begin().await?;
        let mut counts = [0i64; 3];
        for (count, kind) in counts.iter_mut().zip(RecordKind::ALL) {
            let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
            *count = sqlx::query_scalar::<_, i64>(&sql).fetch_one(&mut *tx).await?;
        }
        tx.commit().await?;

        let database_size_bytes = on_disk_size(&self.path).await;
        let [images_count, users_count, leaderboard_count] = counts;

        Ok(DatabaseStats {
            images_count,
            users_count,
            leaderboard_count,
            database_size_bytes,
            database_size_human: format_bytes(database_size_bytes),
            database_path: self.path.display().to_string(),
        })
    }
}

async fn clear_in(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    kind: RecordKind,
) -> Result<u64> {
    let sql = format!("DELETE FROM {}", kind.table());
    let deleted = sqlx::query(&sql).execute(&mut **tx).await?.rows_affected();

    sqlx::query("DELETE FROM sqlite_sequence WHERE name = ?")
        .bind(kind.table())
        .execute(&mut **tx)
        .await?;

    Ok(deleted)
}

/// Main file plus write-ahead log; missing files count as zero
async fn on_disk_size(path: &Path) -> u64 {
    let mut wal = path.as_os_str().to_owned();
    wal.push("-wal");

    let mut total = 0;
    for file in [path.to_path_buf(), wal.into()] {
        total += tokio::fs::metadata(&file).await.map(|m| m.len()).unwrap_or(0);
    }
    total
}

#[cfg(test)]
mod tests {
    use crate::db::test_support::temp_store;
    use crate::db::{RecordKind, Store};
    use crate::models::{NewLeaderboardEntry, NewUser};

    async fn seed(store: &Store, images: usize, users: usize, entries: usize) {
        for i in 0..images {
            store.insert_image(&format!("image-{}", i)).await.unwrap();
        }
        for i in 0..users {
            store
                .insert_user(&NewUser {
                    username: format!("user{}", i),
                    email: format!("user{}@example.com", i),
                    time: "00:10".to_string(),
                })
                .await
                .unwrap();
        }
        for i in 0..entries {
            store
                .insert_leaderboard_entry(&NewLeaderboardEntry {
                    game: "X".to_string(),
                    position: i as i64 + 1,
                    name: format!("player{}", i),
                    score: 100 * i as i64,
                    date: "2025-10-30".to_string(),
                    timestamp: "2025-10-30T20:00:00Z".to_string(),
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_stats_counts() {
        let (_dir, store) = temp_store().await;
        seed(&store, 5, 3, 2).await;

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.images_count, 5);
        assert_eq!(stats.users_count, 3);
        assert_eq!(stats.leaderboard_count, 2);
        assert!(stats.database_size_bytes > 0);
    }

    #[tokio::test]
    async fn test_reset_all_restarts_ids() {
        let (_dir, store) = temp_store().await;
        seed(&store, 5, 3, 2).await;

        let dropped = store.reset_all().await.unwrap();
        assert_eq!(
            dropped,
            vec![
                (RecordKind::Images, 5),
                (RecordKind::Users, 3),
                (RecordKind::Leaderboard, 2)
            ]
        );

        let stats = store.stats().await.unwrap();
        assert_eq!(
            (stats.images_count, stats.users_count, stats.leaderboard_count),
            (0, 0, 0)
        );
        assert_eq!(store.insert_image("fresh").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_clear_one_kind_leaves_others() {
        let (_dir, store) = temp_store().await;
        seed(&store, 2, 2, 0).await;

        assert_eq!(store.clear(RecordKind::Images).await.unwrap(), 2);

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.images_count, 0);
        assert_eq!(stats.users_count, 2);
        assert_eq!(store.insert_image("again").await.unwrap(), 1);
        assert_eq!(
            store
                .insert_user(&NewUser {
                    username: "next".to_string(),
                    email: "next@example.com".to_string(),
                    time: "00:01".to_string(),
                })
                .await
                .unwrap(),
            3
        );
    }

    #[tokio::test]
    async fn test_clear_all_on_empty_store() {
        let (_dir, store) = temp_store().await;
        let deleted = store.clear_all().await.unwrap();
        assert!(deleted.iter().all(|(_, count)| *count == 0));

        seed(&store, 1, 2, 3).await;
        let deleted = store.clear_all().await.unwrap();
        assert_eq!(
            deleted,
            vec![
                (RecordKind::Images, 1),
                (RecordKind::Users, 2),
                (RecordKind::Leaderboard, 3)
            ]
        );

        let stats = store.stats().await.unwrap();
        assert_eq!(
            (stats.images_count, stats.users_count, stats.leaderboard_count),
            (0, 0, 0)
        );
        let id = store
            .insert_user(&NewUser {
                username: "u".to_string(),
                email: "e".to_string(),
                time: "t".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);
    }

    #[tokio::test]
    async fn test_reset_recreates_missing_table() {
        let (_dir, store) = temp_store().await;
        seed(&store, 2, 0, 0).await;
        sqlx::query("DROP TABLE users")
            .execute(&store.pool)
            .await
            .unwrap();

        let dropped = store.reset_all().await.unwrap();
        assert_eq!(dropped[0], (RecordKind::Images, 2));
        assert_eq!(dropped[1], (RecordKind::Users, 0));
        assert_eq!(store.stats().await.unwrap().users_count, 0);
    }
}
