//! Configuration loading and lookup.

mod types;

pub use types::*;

use crate::error::{LoadError, Result};
use serde_yaml::Value;
use std::path::Path;

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "dwh.yaml";

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Look up a single value by section and key.
    ///
    /// Lookup is lazy: a missing section or key only fails the operation
    /// that asked for it. Scalar values (string, number, bool) coerce to
    /// `String`.
    pub fn get(&self, section: &str, key: &str) -> Result<String> {
        let value = self
            .sections
            .get(section)
            .and_then(|keys| keys.get(key))
            .ok_or_else(|| LoadError::incomplete(section, key))?;

        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            _ => Err(LoadError::ConfigUnreadable(format!(
                "{}.{} is not a scalar value",
                section, key
            ))),
        }
    }

    /// Resolve the CLUSTER section into connection parameters.
    pub fn cluster(&self) -> Result<ClusterConfig> {
        let port_raw = self.get("CLUSTER", "DB_PORT")?;
        let port = port_raw.parse::<u16>().map_err(|_| {
            LoadError::ConfigUnreadable(format!(
                "CLUSTER.DB_PORT is not a valid port: {}",
                port_raw
            ))
        })?;

        Ok(ClusterConfig {
            host: self.get("CLUSTER", "HOST")?,
            db_name: self.get("CLUSTER", "DB_NAME")?,
            user: self.get("CLUSTER", "DB_USER")?,
            password: self.get("CLUSTER", "DB_PASSWORD")?,
            port,
        })
    }

    /// Resolve the S3 section into storage locations.
    pub fn storage(&self) -> Result<StorageConfig> {
        Ok(StorageConfig {
            log_data: self.get("S3", "LOG_DATA")?,
            song_data: self.get("S3", "SONG_DATA")?,
            log_jsonpath: self.get("S3", "LOG_JSONPATH")?,
        })
    }

    /// Resolve the IAM role the cluster assumes for bulk copies.
    pub fn iam_role_arn(&self) -> Result<String> {
        self.get("IAM_ROLE", "ARN")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
CLUSTER:
  HOST: redshift.example.com
  DB_NAME: dwh
  DB_USER: loader
  DB_PASSWORD: secret
  DB_PORT: 5439
S3:
  LOG_DATA: s3://bucket/log_data
  SONG_DATA: s3://bucket/song_data
  LOG_JSONPATH: s3://bucket/log_json_path.json
IAM_ROLE:
  ARN: arn:aws:iam::123456789012:role/dwhRole
"#;

    #[test]
    fn test_load_is_deterministic() {
        let a = Config::from_yaml(SAMPLE).unwrap();
        let b = Config::from_yaml(SAMPLE).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_cluster_section() {
        let config = Config::from_yaml(SAMPLE).unwrap();
        let cluster = config.cluster().unwrap();
        assert_eq!(cluster.host, "redshift.example.com");
        assert_eq!(cluster.db_name, "dwh");
        assert_eq!(cluster.user, "loader");
        assert_eq!(cluster.password, "secret");
        assert_eq!(cluster.port, 5439);
        assert_eq!(
            cluster.connection_string(),
            "host=redshift.example.com port=5439 dbname=dwh user=loader password=secret"
        );
    }

    #[test]
    fn test_storage_section() {
        let config = Config::from_yaml(SAMPLE).unwrap();
        let storage = config.storage().unwrap();
        assert_eq!(storage.log_data, "s3://bucket/log_data");
        assert_eq!(storage.song_data, "s3://bucket/song_data");
        assert_eq!(storage.log_jsonpath, "s3://bucket/log_json_path.json");
        assert_eq!(
            config.iam_role_arn().unwrap(),
            "arn:aws:iam::123456789012:role/dwhRole"
        );
    }

    #[test]
    fn test_missing_key_is_incomplete() {
        let config = Config::from_yaml("CLUSTER:\n  HOST: h\n").unwrap();
        let err = config.get("CLUSTER", "DB_NAME").unwrap_err();
        assert!(matches!(
            err,
            LoadError::ConfigIncomplete { ref section, ref key }
                if section == "CLUSTER" && key == "DB_NAME"
        ));
    }

    #[test]
    fn test_missing_section_is_incomplete() {
        let config = Config::from_yaml("CLUSTER:\n  HOST: h\n").unwrap();
        let err = config.storage().unwrap_err();
        assert!(matches!(err, LoadError::ConfigIncomplete { ref section, .. } if section == "S3"));
    }

    #[test]
    fn test_lookup_is_lazy() {
        // No S3 or IAM_ROLE sections: cluster resolution still works.
        let config = Config::from_yaml(
            "CLUSTER:\n  HOST: h\n  DB_NAME: d\n  DB_USER: u\n  DB_PASSWORD: p\n  DB_PORT: 5439\n",
        )
        .unwrap();
        assert!(config.cluster().is_ok());
        assert!(config.storage().is_err());
    }

    #[test]
    fn test_malformed_yaml_is_unreadable() {
        assert!(matches!(
            Config::from_yaml("CLUSTER: [not: a: mapping").unwrap_err(),
            LoadError::Yaml(_)
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Config::load("no_such_dwh_config.yaml").unwrap_err(),
            LoadError::Io(_)
        ));
    }

    #[test]
    fn test_bad_port_is_unreadable() {
        let config = Config::from_yaml(
            "CLUSTER:\n  HOST: h\n  DB_NAME: d\n  DB_USER: u\n  DB_PASSWORD: p\n  DB_PORT: not-a-port\n",
        )
        .unwrap();
        assert!(matches!(
            config.cluster().unwrap_err(),
            LoadError::ConfigUnreadable(_)
        ));
    }

    #[test]
    fn test_numeric_scalars_coerce() {
        let config = Config::from_yaml("CLUSTER:\n  DB_PORT: 5439\n").unwrap();
        assert_eq!(config.get("CLUSTER", "DB_PORT").unwrap(), "5439");
    }
}
