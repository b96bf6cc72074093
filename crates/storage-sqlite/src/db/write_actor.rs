use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use log::error;
use spendcap_core::errors::{DatabaseError, Error, Result};
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

// A job runs against the writer's connection inside an immediate transaction.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type ErasedReply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, ErasedReply)>,
}

fn writer_gone() -> Error {
    Error::Database(DatabaseError::Internal(
        "Database writer is not running".to_string(),
    ))
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// The job runs inside `BEGIN IMMEDIATE`, so every read it performs sees
    /// the state its writes will commit against. Returning `Err` rolls the
    /// transaction back.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| writer_gone())?;

        ret_rx.await.map_err(|_| writer_gone())?.and_then(|boxed| {
            boxed.downcast::<T>().map(|v| *v).map_err(|_| {
                Error::Database(DatabaseError::Internal(
                    "Writer returned an unexpected result type".to_string(),
                ))
            })
        })
    }
}

/// Spawns a background Tokio task that acts as the single writer to the database.
/// The actor owns one connection from the pool and processes write jobs serially.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    // Bounded; senders wait when the writer falls behind.
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, ErasedReply)>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                let message = e.to_string();
                error!("Writer actor could not acquire a database connection: {}", message);
                while let Some((_, reply_tx)) = rx.recv().await {
                    let _ = reply_tx.send(Err(Error::Database(
                        DatabaseError::PoolCreationFailed(message.clone()),
                    )));
                }
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(Error::from);

            // The requester may have gone away; nothing to do then.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
