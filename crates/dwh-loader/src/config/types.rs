//! Configuration type definitions.

use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;

/// Loaded configuration: a two-level mapping of section name to key/value
/// pairs, kept raw so that key lookups stay lazy. A command that never
/// touches the S3 section must not fail because that section is absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Config {
    pub(crate) sections: BTreeMap<String, BTreeMap<String, Value>>,
}

/// Warehouse connection parameters from the CLUSTER section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterConfig {
    /// Cluster endpoint host.
    pub host: String,

    /// Database name.
    pub db_name: String,

    /// Username.
    pub user: String,

    /// Password.
    pub password: String,

    /// Port (Redshift default is 5439).
    pub port: u16,
}

impl ClusterConfig {
    /// Build a connection string for tokio-postgres.
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} dbname={} user={} password={}",
            self.host, self.port, self.db_name, self.user, self.password
        )
    }
}

/// Object-storage locations from the S3 section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Location of the raw event (log) JSON records.
    pub log_data: String,

    /// Location of the raw song JSON records.
    pub song_data: String,

    /// JSONPaths file describing the event record layout.
    pub log_jsonpath: String,
}
