use futures::future::BoxFuture;
use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, PgPool, Postgres};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::DataError;

/// Request-scoped database handle.
///
/// One pooled connection is acquired on first use and held until the
/// request finishes, so the error-translation middleware can roll back the
/// same connection the handler used.
#[derive(Clone)]
pub struct DbSession {
    pool: PgPool,
    conn: Arc<Mutex<Option<PoolConnection<Postgres>>>>,
}

impl DbSession {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            conn: Arc::new(Mutex::new(None)),
        }
    }

    /// Run `op` on the session connection, acquiring it if needed.
    pub async fn run<T, F>(&self, op: F) -> Result<T, DataError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, sqlx::Error>>,
    {
        let mut guard = self.conn.lock().await;
        if guard.is_none() {
            *guard = Some(self.pool.acquire().await?);
        }
        let Some(conn) = guard.as_mut() else {
            return Err(DataError::from(sqlx::Error::PoolClosed));
        };

        Ok(op(&mut **conn).await?)
    }

    pub async fn is_connected(&self) -> bool {
        self.conn.lock().await.is_some()
    }

    /// Roll back whatever the held connection has open. Returns false when
    /// no connection was ever acquired. A connection whose rollback fails is
    /// detached from the pool instead of being returned to it.
    pub async fn rollback(&self) -> Result<bool, DataError> {
        let mut guard = self.conn.lock().await;
        let Some(conn) = guard.as_mut() else {
            return Ok(false);
        };

        match sqlx::query("ROLLBACK").execute(&mut **conn).await {
            Ok(_) => Ok(true),
            Err(e) => {
                if let Some(conn) = guard.take() {
                    drop(conn.detach());
                }
                Err(e.into())
            }
        }
    }
}

impl std::fmt::Debug for DbSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbSession").finish_non_exhaustive()
    }
}
