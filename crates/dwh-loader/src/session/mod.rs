//! Execution sessions: the connection surface the batch runner depends on.
//!
//! The runner only ever needs connect, execute, commit, and close. Both
//! traits exist so tests can substitute a recording session for the real
//! warehouse connection.

use crate::config::ClusterConfig;
use crate::error::{LoadError, Result};
use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_postgres::{Config as PgConfig, NoTls};
use tracing::{debug, info, warn};

/// One live database session, owned by a single runner invocation.
///
/// `close` consumes the session, so a session cannot be released twice and
/// cannot be used after release.
#[async_trait]
pub trait Session: Send {
    /// Execute one statement's text.
    async fn execute(&mut self, sql: &str) -> Result<()>;

    /// Commit work executed since the last commit.
    async fn commit(&mut self) -> Result<()>;

    /// Release the session.
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Opens execution sessions from cluster connection parameters.
#[async_trait]
pub trait Connect: Send + Sync {
    async fn connect(&self, cluster: &ClusterConfig) -> Result<Box<dyn Session>>;
}

/// Connector for the warehouse's PostgreSQL wire protocol.
#[derive(Debug, Default)]
pub struct PgConnector;

#[async_trait]
impl Connect for PgConnector {
    async fn connect(&self, cluster: &ClusterConfig) -> Result<Box<dyn Session>> {
        let mut pg_config = PgConfig::new();
        pg_config.host(&cluster.host);
        pg_config.port(cluster.port);
        pg_config.dbname(&cluster.db_name);
        pg_config.user(&cluster.user);
        pg_config.password(&cluster.password);

        let (client, connection) = pg_config
            .connect(NoTls)
            .await
            .map_err(|e| LoadError::ConnectionFailed(e.to_string()))?;

        // The connection object drives the socket; it resolves once the
        // client is dropped.
        let connection_task = tokio::spawn(async move {
            if let Err(e) = connection.await {
                warn!("connection terminated with error: {}", e);
            }
        });

        info!(
            "Connected to warehouse: {}:{}/{}",
            cluster.host, cluster.port, cluster.db_name
        );

        Ok(Box::new(PgSession {
            client,
            connection_task,
            in_transaction: false,
        }))
    }
}

/// Session over a single tokio-postgres client.
///
/// `execute` opens an explicit transaction on first use and `commit` ends
/// it, so each statement's effects become durable exactly when the runner
/// commits them.
pub struct PgSession {
    client: tokio_postgres::Client,
    connection_task: JoinHandle<()>,
    in_transaction: bool,
}

#[async_trait]
impl Session for PgSession {
    async fn execute(&mut self, sql: &str) -> Result<()> {
        if !self.in_transaction {
            self.client.batch_execute("BEGIN").await?;
            self.in_transaction = true;
        }
        self.client.batch_execute(sql).await?;
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        if self.in_transaction {
            self.client.batch_execute("COMMIT").await?;
            self.in_transaction = false;
        }
        Ok(())
    }

    async fn close(self: Box<Self>) -> Result<()> {
        // Dropping the client hangs up; an open transaction rolls back
        // server-side.
        drop(self.client);
        if let Err(e) = self.connection_task.await {
            warn!("connection task failed during close: {}", e);
        }
        debug!("session closed");
        Ok(())
    }
}
