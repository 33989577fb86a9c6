//! Batch runner: ordered execution of a statement group.
//!
//! One runner invocation owns one execution session. Statements run in the
//! group's insertion order with a commit after each, so a batch that fails
//! partway leaves every earlier statement durably applied and the failure
//! names the exact statement that stopped it. The session is released on
//! every exit path.

use crate::catalog::StatementGroup;
use crate::config::Config;
use crate::error::{LoadError, Result};
use crate::session::{Connect, PgConnector, Session};
use std::sync::Arc;
use tracing::{info, warn};

/// Executes statement groups against the warehouse.
pub struct BatchRunner {
    config: Config,
    connector: Arc<dyn Connect>,
}

impl BatchRunner {
    /// Create a runner that connects over the PostgreSQL wire protocol.
    pub fn new(config: Config) -> Self {
        Self::with_connector(config, Arc::new(PgConnector))
    }

    /// Create a runner with a custom connector.
    pub fn with_connector(config: Config, connector: Arc<dyn Connect>) -> Self {
        Self { config, connector }
    }

    /// Run every statement in the group, in order, committing after each.
    ///
    /// Stops at the first failure and propagates it as
    /// [`LoadError::ExecutionFailed`] naming the statement. Connection
    /// parameters are resolved before any connection attempt, and the
    /// session is closed whether the batch succeeds, fails partway, or
    /// never gets past connecting.
    pub async fn run(&self, group: &StatementGroup) -> Result<()> {
        let cluster = self.config.cluster()?;
        let mut session = self.connector.connect(&cluster).await?;

        info!("{} batch: {} statements", group.name(), group.len());
        let result = Self::execute_group(session.as_mut(), group).await;

        if let Err(close_err) = session.close().await {
            match &result {
                Ok(()) => return Err(close_err),
                Err(first) => warn!("session close failed after '{}': {}", first, close_err),
            }
        }

        result
    }

    async fn execute_group(session: &mut dyn Session, group: &StatementGroup) -> Result<()> {
        for (name, sql) in group.iter() {
            info!("{}: working on {}", group.name(), name);
            session
                .execute(sql)
                .await
                .map_err(|e| LoadError::execution(name, e.to_string()))?;
            session
                .commit()
                .await
                .map_err(|e| LoadError::execution(name, e.to_string()))?;
        }
        Ok(())
    }
}
