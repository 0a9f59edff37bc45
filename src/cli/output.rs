/// Output formatting: tables, key/value views, JSON modes. TTY detection.
///
/// Rows are [`Record`]s, so API records and aggregated rows render the same
/// way. Renderers take a `Write` so they can be tested against a buffer; the
/// `write_*` wrappers send them to stdout.
use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::{self, IsTerminal, Write};

use comfy_table::{Cell, Table, presets::UTF8_BORDERS_ONLY};
use serde::Serialize;
use serde_json::Value;

use super::args::OutputFormat;
use crate::api::Record;

/// Display transform for one field.
pub type Formatter = fn(&Value) -> String;

/// Per-field display transforms. Fields without an entry render natively.
pub type Formatters = HashMap<&'static str, Formatter>;

/// Resolve the effective output format, handling `--json` flag and TTY auto-detection.
#[must_use]
pub fn resolve_format(fmt: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag {
        return OutputFormat::Json;
    }
    if fmt == OutputFormat::Auto {
        if io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        fmt
    }
}

/// Output context passed to all formatters.
pub struct OutputCtx {
    pub format: OutputFormat,
    /// `--fields` override of a command's default projection.
    pub fields: Option<Vec<String>>,
    pub no_header: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(fmt: OutputFormat, json_flag: bool, fields: Option<&str>, no_header: bool) -> Self {
        let format = resolve_format(fmt, json_flag);
        let fields = fields.map(|f| {
            f.split(',')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_owned)
                .collect()
        });
        Self {
            format,
            fields,
            no_header,
        }
    }

    /// Whether output is one of the JSON modes.
    #[must_use]
    pub fn is_json(&self) -> bool {
        matches!(
            self.format,
            OutputFormat::Json | OutputFormat::Compact | OutputFormat::Ndjson
        )
    }

    /// The projection to use: `--fields` if given, else `defaults`.
    fn projection<'a>(&'a self, defaults: &[&'a str]) -> Vec<&'a str> {
        self.fields.as_ref().map_or_else(
            || defaults.to_vec(),
            |f| f.iter().map(String::as_str).collect(),
        )
    }
}

// --- Value display and ordering ---

/// Render a JSON value for a table cell: strings unquoted, null empty.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order used for `--sortby`. A missing field sorts before everything.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x.cmp(&y)
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x.cmp(&y)
            } else {
                x.as_f64()
                    .partial_cmp(&y.as_f64())
                    .unwrap_or(Ordering::Equal)
            }
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) => type_rank(x)
            .cmp(&type_rank(y))
            .then_with(|| x.to_string().cmp(&y.to_string())),
    }
}

/// Borrow `rows` in ascending `sort_key` order. Stable; rows are not touched.
#[must_use]
pub fn sorted_rows<'a>(rows: &'a [Record], sort_key: &str) -> Vec<&'a Record> {
    let mut sorted: Vec<&Record> = rows.iter().collect();
    sorted.sort_by(|a, b| compare_values(a.get(sort_key), b.get(sort_key)));
    sorted
}

/// Human-readable byte count, for `--human-size`.
#[must_use]
pub fn format_bytes(value: &Value) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let Some(bytes) = value.as_u64() else {
        return display_value(value);
    };
    #[allow(clippy::cast_precision_loss)]
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit + 1 < UNITS.len() {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}

// --- List output ---

/// Sorted copies of `rows` holding only the projected fields, in projection
/// order. Missing fields become `null`.
#[must_use]
pub fn project_rows(
    rows: &[Record],
    fields: &[&str],
    sort_key: &str,
    ctx: &OutputCtx,
) -> Vec<Record> {
    let fields = ctx.projection(fields);
    sorted_rows(rows, sort_key)
        .into_iter()
        .map(|row| {
            fields
                .iter()
                .map(|f| ((*f).to_owned(), row.get(*f).cloned().unwrap_or(Value::Null)))
                .collect()
        })
        .collect()
}

/// Render `rows` sorted by `sort_key`, showing only `fields`, in that order.
///
/// # Errors
///
/// Any error writing to `out`.
pub fn render_list<W: Write>(
    out: &mut W,
    rows: &[Record],
    fields: &[&str],
    formatters: &Formatters,
    sort_key: &str,
    ctx: &OutputCtx,
) -> io::Result<()> {
    if ctx.is_json() {
        let projected = project_rows(rows, fields, sort_key, ctx);
        return write_json(out, &projected, ctx.format);
    }

    let fields = ctx.projection(fields);
    let sorted = sorted_rows(rows, sort_key);

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    if !ctx.no_header {
        table.set_header(fields.iter().map(Cell::new));
    }
    for row in sorted {
        table.add_row(fields.iter().map(|f| {
            let text = match (row.get(*f), formatters.get(*f)) {
                (Some(value), Some(formatter)) => formatter(value),
                (Some(value), None) => display_value(value),
                (None, _) => String::new(),
            };
            Cell::new(text)
        }));
    }
    writeln!(out, "{table}")
}

/// Write a sorted, projected list to stdout.
pub fn write_list(
    rows: &[Record],
    fields: &[&str],
    formatters: &Formatters,
    sort_key: &str,
    ctx: &OutputCtx,
) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = render_list(&mut out, rows, fields, formatters, sort_key, ctx) {
        eprintln!("Output error: {e}");
    }
}

// --- Single record output ---

/// Render every field of `record` as `key: value` lines, in record order.
///
/// # Errors
///
/// Any error writing to `out`.
pub fn render_dict<W: Write>(out: &mut W, record: &Record, ctx: &OutputCtx) -> io::Result<()> {
    if ctx.is_json() {
        return write_json(out, record, ctx.format);
    }
    for (key, value) in record {
        writeln!(out, "{key}: {}", display_value(value))?;
    }
    Ok(())
}

/// Write a single record to stdout.
pub fn write_dict(record: &Record, ctx: &OutputCtx) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = render_dict(&mut out, record, ctx) {
        eprintln!("Output error: {e}");
    }
}

// --- Messages ---

/// Render a one-line status message (`{"ok":true,...}` in JSON modes).
///
/// # Errors
///
/// Any error writing to `out`.
pub fn render_message<W: Write>(out: &mut W, message: &str, ctx: &OutputCtx) -> io::Result<()> {
    if ctx.is_json() {
        let value = serde_json::json!({ "ok": true, "message": message });
        return write_json(out, &value, OutputFormat::Compact);
    }
    writeln!(out, "{message}")
}

/// Write a status message to stdout.
pub fn write_message(message: &str, ctx: &OutputCtx) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = render_message(&mut out, message, ctx) {
        eprintln!("Output error: {e}");
    }
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &crate::types::ErrorOutput, format: OutputFormat, json_flag: bool) {
    let fmt = resolve_format(format, json_flag);
    let stderr = io::stderr();
    let mut out = stderr.lock();
    match fmt {
        OutputFormat::Json | OutputFormat::Compact | OutputFormat::Ndjson => {
            let s = serde_json::to_string_pretty(err).unwrap_or_default();
            let _ = writeln!(out, "{s}");
        }
        _ => {
            let _ = writeln!(out, "Error: {}", err.error.message);
        }
    }
}

// --- Generic JSON helpers ---

fn to_io(e: serde_json::Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

/// Serialize `value` in the given JSON mode. `Ndjson` puts each element of
/// an array on its own line.
///
/// # Errors
///
/// Any serialization or write error.
pub fn write_json<W: Write, T: Serialize + ?Sized>(
    out: &mut W,
    value: &T,
    format: OutputFormat,
) -> io::Result<()> {
    let s = match format {
        OutputFormat::Compact => serde_json::to_string(value).map_err(to_io)?,
        OutputFormat::Ndjson => {
            let value = serde_json::to_value(value).map_err(to_io)?;
            if let Value::Array(items) = &value {
                for item in items {
                    writeln!(out, "{item}")?;
                }
                return Ok(());
            }
            value.to_string()
        }
        _ => serde_json::to_string_pretty(value).map_err(to_io)?,
    };
    writeln!(out, "{s}")
}
