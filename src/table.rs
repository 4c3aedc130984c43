use tracing::debug;

use crate::platform::ColumnSpec;

/// Whitespace-delimited tokens of one TCP/UDP line of utility output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocketRow {
    tokens: Vec<String>,
}

impl SocketRow {
    #[must_use]
    pub fn tokenize(line: &str) -> Self {
        Self {
            tokens: line.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// Token at `index`, or `None` if the row is too short.
    #[must_use]
    pub fn column(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// True for lines that start, after optional whitespace, with `tcp` or
/// `udp` in any case (`tcp4`, `udp6`, `TCP` included).
#[must_use]
pub fn is_socket_row(line: &str) -> bool {
    line.trim_start().get(..3).is_some_and(|proto| {
        proto.eq_ignore_ascii_case("tcp") || proto.eq_ignore_ascii_case("udp")
    })
}

/// Socket rows from one utility run, in output order.
#[derive(Debug, Clone)]
pub struct PortTable {
    columns: ColumnSpec,
    rows: Vec<SocketRow>,
}

impl PortTable {
    /// Keeps only TCP/UDP lines of `raw` and tokenizes them.
    #[must_use]
    pub fn parse(raw: &str, columns: ColumnSpec) -> Self {
        let rows: Vec<SocketRow> = raw
            .lines()
            .filter(|line| is_socket_row(line))
            .map(SocketRow::tokenize)
            .collect();

        debug!(rows = rows.len(), "built port table");

        Self { columns, rows }
    }

    #[must_use]
    pub const fn columns(&self) -> ColumnSpec {
        self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[SocketRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row whose address column ends in `.<port>` or `:<port>`.
    #[must_use]
    pub fn find_port(&self, port: u16) -> Option<&SocketRow> {
        let suffix = port.to_string();
        self.rows.iter().find(|row| {
            row.column(self.columns.address)
                .is_some_and(|address| has_port_suffix(address, &suffix))
        })
    }

    /// Owner column of `row`, if the row is long enough to have one.
    #[must_use]
    pub fn owner<'a>(&self, row: &'a SocketRow) -> Option<&'a str> {
        row.column(self.columns.owner)
    }

    /// Address column of `row`.
    #[must_use]
    pub fn address<'a>(&self, row: &'a SocketRow) -> Option<&'a str> {
        row.column(self.columns.address)
    }
}

fn has_port_suffix(address: &str, port: &str) -> bool {
    address
        .strip_suffix(port)
        .is_some_and(|rest| rest.ends_with(['.', ':']))
}

/// Digits after the last `.` or `:` of an address token.
///
/// `None` when the address has no separator or the text after the last one
/// is empty or not all digits (`*.*`, `0.0.0.0:*`).
#[must_use]
pub fn port_suffix(address: &str) -> Option<&str> {
    let (_, digits) = address.rsplit_once(['.', ':'])?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits)
}
