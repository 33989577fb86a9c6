//! Named, ordered SQL statement groups.
//!
//! The catalog is pure construction: given a loaded [`Config`], it produces
//! the four statement groups the orchestrator runs (drop, create, copy,
//! insert). Only the copy group touches configuration; everything else is
//! static text. No database access happens here.

mod sql;

use crate::config::Config;
use crate::error::Result;
use indexmap::IndexMap;

/// An ordered mapping of statement name to fully-resolved statement text.
///
/// Iteration order is insertion order and is significant: the runner
/// executes statements in exactly this order, and a failure report names
/// the statement that stopped the batch.
#[derive(Debug, Clone)]
pub struct StatementGroup {
    name: &'static str,
    statements: IndexMap<String, String>,
}

impl StatementGroup {
    /// Create an empty group.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            statements: IndexMap::new(),
        }
    }

    /// Append a named statement, preserving insertion order.
    pub fn with_statement(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.statements.insert(name.into(), text.into());
        self
    }

    /// Group name, used in progress output.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of statements in the group.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Whether the group holds no statements.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Iterate `(name, text)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.statements
            .iter()
            .map(|(name, text)| (name.as_str(), text.as_str()))
    }
}

/// Drop statements for every warehouse table, staging first.
pub fn drop_group() -> StatementGroup {
    StatementGroup::new("drop")
        .with_statement("s_events_table_drop", sql::S_EVENTS_DROP)
        .with_statement("s_songs_table_drop", sql::S_SONGS_DROP)
        .with_statement("f_songplay_table_drop", sql::F_SONGPLAY_DROP)
        .with_statement("d_user_table_drop", sql::D_USER_DROP)
        .with_statement("d_song_table_drop", sql::D_SONG_DROP)
        .with_statement("d_artist_table_drop", sql::D_ARTIST_DROP)
        .with_statement("d_time_table_drop", sql::D_TIME_DROP)
}

/// Create statements for every warehouse table.
pub fn create_group() -> StatementGroup {
    StatementGroup::new("create")
        .with_statement("s_events_table_create", sql::S_EVENTS_CREATE)
        .with_statement("s_songs_table_create", sql::S_SONGS_CREATE)
        .with_statement("f_songplay_table_create", sql::F_SONGPLAY_CREATE)
        .with_statement("d_user_table_create", sql::D_USER_CREATE)
        .with_statement("d_song_table_create", sql::D_SONG_CREATE)
        .with_statement("d_artist_table_create", sql::D_ARTIST_CREATE)
        .with_statement("d_time_table_create", sql::D_TIME_CREATE)
}

/// Bulk-copy statements, templated from the S3 and IAM_ROLE sections.
///
/// Fails with `ConfigIncomplete` when a required key is missing; this is
/// the only catalog constructor that needs configuration.
pub fn copy_group(config: &Config) -> Result<StatementGroup> {
    let storage = config.storage()?;
    let iam_role_arn = config.iam_role_arn()?;

    Ok(StatementGroup::new("copy")
        .with_statement("s_events_copy", sql::s_events_copy(&storage, &iam_role_arn))
        .with_statement("s_songs_copy", sql::s_songs_copy(&storage, &iam_role_arn)))
}

/// Staging-to-final insert statements, fact table first.
pub fn insert_group() -> StatementGroup {
    StatementGroup::new("insert")
        .with_statement("f_songplay_table_insert", sql::F_SONGPLAY_INSERT)
        .with_statement("d_user_table_insert", sql::D_USER_INSERT)
        .with_statement("d_song_table_insert", sql::D_SONG_INSERT)
        .with_statement("d_artist_table_insert", sql::D_ARTIST_INSERT)
        .with_statement("d_time_table_insert", sql::D_TIME_INSERT)
}
