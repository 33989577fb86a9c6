//! Command orchestrator: maps command keywords onto statement pipelines.
//!
//! Two terminal pipelines exist. Schema (re)creation runs the drop batch
//! then the create batch; the load runs the copy batch then the insert
//! batch. If the first batch of a pipeline fails, the second never starts.

use crate::catalog;
use crate::config::Config;
use crate::error::Result;
use crate::runner::BatchRunner;
use crate::session::{Connect, PgConnector};
use std::sync::Arc;
use tracing::info;

/// Drives the fixed command pipelines against the warehouse.
pub struct Orchestrator {
    config: Config,
    runner: BatchRunner,
}

impl Orchestrator {
    /// Create an orchestrator that talks to the configured warehouse.
    pub fn new(config: Config) -> Self {
        Self::with_connector(config, Arc::new(PgConnector))
    }

    /// Create an orchestrator with a custom connector.
    pub fn with_connector(config: Config, connector: Arc<dyn Connect>) -> Self {
        let runner = BatchRunner::with_connector(config.clone(), connector);
        Self { config, runner }
    }

    /// (Re)create the star schema: drop every table, then create them.
    pub async fn create_schema(&self) -> Result<()> {
        self.runner.run(&catalog::drop_group()).await?;
        self.runner.run(&catalog::create_group()).await?;
        info!("schema created");
        Ok(())
    }

    /// Run the two-phase load: bulk-copy into staging, then insert into
    /// the fact and dimension tables.
    ///
    /// The copy group is templated from configuration before any database
    /// work, so a missing S3 or IAM_ROLE key aborts without connecting.
    pub async fn do_etl(&self) -> Result<()> {
        let copy = catalog::copy_group(&self.config)?;
        self.runner.run(&copy).await?;
        self.runner.run(&catalog::insert_group()).await?;
        info!("load finished");
        Ok(())
    }

    /// Probe warehouse connectivity with a single throwaway statement.
    pub async fn health_check(&self) -> Result<()> {
        let probe =
            catalog::StatementGroup::new("health_check").with_statement("connectivity_probe", "select 1;");
        self.runner.run(&probe).await
    }
}
