//! Table source abstraction.
//!
//! The seed runner only ever needs one capability from the remote database:
//! "list every row of table T ordered by key". Anything that can do that
//! implements [`TableSource`].

use std::future::Future;

use super::{DbError, DbResult, MySqlSource, SqliteSource};

/// One row as a flat, column-ordered mapping of column name to value.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Ordered, chunked row listing.
pub trait TableSource {
    /// Name of the database rows come from, for progress output.
    fn describe(&self) -> &str;

    /// Fetch all rows of `table` ordered ascending by `order_by`.
    ///
    /// Rows are read `chunk_size` at a time and returned in order.
    fn fetch_ordered(
        &self,
        table: &str,
        order_by: &str,
        chunk_size: usize,
    ) -> impl Future<Output = DbResult<Vec<Record>>> + Send;
}

/// Source selected from a connection URL at startup.
pub enum RemoteSource {
    MySql(MySqlSource),
    Sqlite(SqliteSource),
}

impl RemoteSource {
    /// Connect using the URL scheme to pick the backend.
    pub async fn connect(url: &str) -> DbResult<Self> {
        if url.starts_with("mysql://") || url.starts_with("mariadb://") {
            Ok(Self::MySql(MySqlSource::connect(url).await?))
        } else if url.starts_with("sqlite:") {
            Ok(Self::Sqlite(SqliteSource::connect(url).await?))
        } else {
            Err(DbError::UnsupportedUrl {
                url: redact_url(url),
            })
        }
    }
}

impl TableSource for RemoteSource {
    fn describe(&self) -> &str {
        match self {
            Self::MySql(source) => source.describe(),
            Self::Sqlite(source) => source.describe(),
        }
    }

    async fn fetch_ordered(
        &self,
        table: &str,
        order_by: &str,
        chunk_size: usize,
    ) -> DbResult<Vec<Record>> {
        match self {
            Self::MySql(source) => source.fetch_ordered(table, order_by, chunk_size).await,
            Self::Sqlite(source) => source.fetch_ordered(table, order_by, chunk_size).await,
        }
    }
}

/// Database name from a connection URL: the last path segment without
/// query string or file extension.
pub fn database_name(url: &str) -> String {
    let without_query = url.split('?').next().unwrap_or(url);
    let without_scheme = without_query
        .split_once("://")
        .map(|(_, rest)| rest)
        .or_else(|| without_query.strip_prefix("sqlite:"))
        .unwrap_or(without_query);

    let segment = without_scheme
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty() && !without_scheme.ends_with('/'))
        .unwrap_or(without_scheme);

    match segment.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => segment.to_string(),
    }
}

/// Strip credentials from a URL before it is shown to the operator.
pub fn redact_url(url: &str) -> String {
    match url.split_once("://") {
        Some((scheme, rest)) => match rest.split_once('@') {
            Some((_, host)) => format!("{}://***@{}", scheme, host),
            None => url.to_string(),
        },
        None => url.to_string(),
    }
}
