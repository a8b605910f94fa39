//! Snapshot loading for the bot and builder JSON dumps
//!
//! Both snapshots are JSON arrays of objects. Records are kept as generic
//! key-value maps and only the fields a query actually touches are checked,
//! so an odd record that is filtered out early never fails a run.

use crate::error::{InventoryError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Default file name of the bot snapshot
pub const DEFAULT_BOTMAP: &str = "botmap.json";

/// Default file name of the builder snapshot
pub const DEFAULT_BUILDERMAP: &str = "buildermap.json";

/// Operating system value that marks a bot as a mac bot
pub const MAC_OS: &str = "mac";

/// A single snapshot entry
pub type Record = Map<String, Value>;

/// Load a snapshot file as a sequence of records
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| InventoryError::Load {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "read snapshot");

    let records = parse_records(&contents).map_err(|source| InventoryError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), records = records.len(), "parsed snapshot");
    Ok(records)
}

/// Parse snapshot contents as a JSON array of objects
pub fn parse_records(contents: &str) -> std::result::Result<Vec<Record>, serde_json::Error> {
    serde_json::from_str(contents)
}

fn str_field<'a>(record: &'a Record, key: &str) -> Result<&'a str> {
    match record.get(key) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(InventoryError::Lookup(format!(
            "field '{}' is not a string: {}",
            key, other
        ))),
        None => Err(InventoryError::Lookup(format!("missing field '{}'", key))),
    }
}

fn str_list_field<'a>(record: &'a Record, key: &str) -> Result<Vec<&'a str>> {
    let values = match record.get(key) {
        Some(Value::Array(values)) => values,
        Some(other) => {
            return Err(InventoryError::Lookup(format!(
                "field '{}' is not a list: {}",
                key, other
            )))
        }
        None => return Err(InventoryError::Lookup(format!("missing field '{}'", key))),
    };

    values
        .iter()
        .map(|v| {
            v.as_str().ok_or_else(|| {
                InventoryError::Lookup(format!("field '{}' has a non-string entry: {}", key, v))
            })
        })
        .collect()
}

/// Borrowed view of a bot record
#[derive(Debug, Clone, Copy)]
pub struct Bot<'a> {
    record: &'a Record,
}

impl<'a> Bot<'a> {
    pub fn new(record: &'a Record) -> Self {
        Self { record }
    }

    /// The bot's operating system, if the record carries a string `os`
    pub fn os(&self) -> Option<&'a str> {
        self.record.get("os").and_then(Value::as_str)
    }

    pub fn is_mac(&self) -> bool {
        self.os() == Some(MAC_OS)
    }

    pub fn mastername(&self) -> Result<&'a str> {
        str_field(self.record, "mastername")
    }

    /// Names of the builders this bot runs
    pub fn builders(&self) -> Result<Vec<&'a str>> {
        str_list_field(self.record, "builder")
    }
}

/// Borrowed view of a builder-to-hostname record
#[derive(Debug, Clone, Copy)]
pub struct BuilderHost<'a> {
    record: &'a Record,
}

impl<'a> BuilderHost<'a> {
    pub fn new(record: &'a Record) -> Self {
        Self { record }
    }

    pub fn mastername(&self) -> Result<&'a str> {
        str_field(self.record, "mastername")
    }

    pub fn builder(&self) -> Result<&'a str> {
        str_field(self.record, "builder")
    }

    pub fn hostnames(&self) -> Result<Vec<&'a str>> {
        str_list_field(self.record, "hostname")
    }
}
