use std::{collections::BTreeMap, str::FromStr};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::{
    config::CommandConfig,
    error::{Error, Result},
    pid::extract_pid,
    platform::{ListingSource, Platform, listing_source},
    table::{PortTable, port_suffix},
};

/// Answers port-to-PID questions, running the platform utility once per query.
pub struct Resolver {
    source: Box<dyn ListingSource>,
}

impl Resolver {
    pub fn new(source: impl ListingSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Resolver backed by the stock adapter for `platform`.
    #[must_use]
    pub fn for_platform(platform: Platform, commands: &CommandConfig) -> Self {
        Self {
            source: listing_source(platform, commands),
        }
    }

    /// Runs the utility and parses its output into a fresh table.
    ///
    /// # Errors
    ///
    /// Returns an execution error if the utility fails.
    pub fn table(&self) -> Result<PortTable> {
        let raw = self.source.fetch_raw_listing()?;
        Ok(PortTable::parse(&raw, self.source.columns()))
    }

    /// PID of the process owning `port`.
    ///
    /// `Ok(None)` means the port is in use but its owner could not be read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PortNotFound`] if no row uses `port`, or an execution
    /// error if the utility fails.
    pub fn resolve(&self, port: u16) -> Result<Option<u32>> {
        lookup(&self.table()?, port)
    }

    /// Resolves every port in `ports` against a single table, keeping
    /// request order. Repeated ports are reported once.
    ///
    /// # Errors
    ///
    /// Fails on the first port without a matching row, or if the utility fails.
    pub fn resolve_many(&self, ports: &[u16]) -> Result<Vec<(u16, Option<u32>)>> {
        let table = self.table()?;
        resolve_batch(&table, ports)
    }

    /// Every discovered port with its owner. Later rows override earlier
    /// rows for the same port.
    ///
    /// # Errors
    ///
    /// Returns an execution error if the utility fails.
    pub fn resolve_all(&self) -> Result<BTreeMap<u16, Option<u32>>> {
        let table = self.table()?;
        let mut ports = BTreeMap::new();

        for row in table.rows() {
            let Some(digits) = table.address(row).and_then(port_suffix) else {
                continue;
            };
            let Ok(port) = digits.parse::<u16>() else {
                debug!(digits, "skipping row with out-of-range port");
                continue;
            };
            ports.insert(port, extract_pid(table.owner(row)));
        }

        Ok(ports)
    }

    /// Runs a point or batch query.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`] and [`Self::resolve_many`].
    pub fn query(&self, query: &PortQuery) -> Result<QueryOutcome> {
        match query {
            PortQuery::Single(port) => self.resolve(*port).map(QueryOutcome::Single),
            PortQuery::Batch(ports) => self.resolve_many(ports).map(QueryOutcome::Batch),
        }
    }
}

fn lookup(table: &PortTable, port: u16) -> Result<Option<u32>> {
    let row = table.find_port(port).ok_or(Error::PortNotFound(port))?;
    Ok(extract_pid(table.owner(row)))
}

fn resolve_batch(table: &PortTable, ports: &[u16]) -> Result<Vec<(u16, Option<u32>)>> {
    let mut resolved: Vec<(u16, Option<u32>)> = Vec::with_capacity(ports.len());
    for &port in ports {
        if resolved.iter().any(|(seen, _)| *seen == port) {
            continue;
        }
        resolved.push((port, lookup(table, port)?));
    }
    Ok(resolved)
}

/// A point or batch query built from loosely typed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortQuery {
    Single(u16),
    Batch(Vec<u16>),
}

impl TryFrom<&Value> for PortQuery {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(port_from_value)
                .collect::<Result<Vec<_>>>()
                .map(Self::Batch),
            other => port_from_value(other).map(Self::Single),
        }
    }
}

fn port_from_value(value: &Value) -> Result<u16> {
    value
        .as_u64()
        .and_then(|n| u16::try_from(n).ok())
        .ok_or_else(|| Error::InvalidArgument(json_type_name(value).to_string()))
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number that is not a valid port",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl FromStr for PortQuery {
    type Err = Error;

    /// Parses one port, or several separated by commas or whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let ports = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|item| !item.is_empty())
            .map(|item| {
                item.parse::<u16>()
                    .map_err(|_| Error::InvalidArgument(format!("'{item}'")))
            })
            .collect::<Result<Vec<_>>>()?;

        match ports.len() {
            0 => Err(Error::InvalidArgument("an empty port list".to_string())),
            1 => Ok(Self::Single(ports[0])),
            _ => Ok(Self::Batch(ports)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryOutcome {
    Single(Option<u32>),
    Batch(Vec<(u16, Option<u32>)>),
}
