use colored::*;
use prettytable::{color, Attr, Cell, Row, Table};
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerSnapshot;

/// Output format for ledger reports.
///
/// # Variants
///
/// * `Text` - one `<label> #new: .. #delete: .. #bytes: ..` line per window (default)
/// * `Table` - human-readable table
/// * `Json` - compact JSON (single line)
/// * `JsonPretty` - pretty-printed JSON with indentation
#[derive(Clone, Copy, Debug, Default)]
pub enum Format {
    #[default]
    Text,
    Table,
    Json,
    JsonPretty,
}

/// One labeled measurement window: a ledger delta and the label it was
/// recorded under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    pub label: String,
    #[serde(flatten)]
    pub snapshot: LedgerSnapshot,
}

/// An ordered collection of measurement windows, ready to hand to a
/// [`Reporter`].
///
/// # Examples
///
/// ```rust
/// use memledger::{Format, Ledger, LedgerReport};
///
/// let ledger = Ledger::global();
/// let mut report = LedgerReport::new();
///
/// let before = ledger.snapshot();
/// let buf = vec![0u8; 256];
/// report.record("fill_buffer", ledger.snapshot() - before);
/// drop(buf);
///
/// report.write(Format::Text).unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerReport {
    pub windows: Vec<ReportWindow>,
}

impl LedgerReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a window. Labels are not required to be unique; windows keep
    /// their recording order.
    pub fn record(&mut self, label: impl Into<String>, snapshot: LedgerSnapshot) {
        self.windows.push(ReportWindow {
            label: label.into(),
            snapshot,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Renders the report to stdout with the built-in reporter for `format`.
    pub fn write(&self, format: Format) -> Result<(), Box<dyn std::error::Error>> {
        let reporter: &dyn Reporter = match format {
            Format::Text => &TextReporter,
            Format::Table => &TableReporter,
            Format::Json => &JsonReporter,
            Format::JsonPretty => &JsonPrettyReporter,
        };
        reporter.report(self)
    }
}

/// Trait for implementing custom report output.
///
/// Implement this to route ledger reports into logging systems, CI artifacts
/// or custom file formats instead of stdout.
///
/// # Examples
///
/// ```rust
/// use memledger::{LedgerReport, Reporter};
/// use std::error::Error;
///
/// struct CountOnly;
///
/// impl Reporter for CountOnly {
///     fn report(&self, report: &LedgerReport) -> Result<(), Box<dyn Error>> {
///         println!("{} windows measured", report.windows.len());
///         Ok(())
///     }
/// }
///
/// CountOnly.report(&LedgerReport::new()).unwrap();
/// ```
pub trait Reporter: Send + Sync {
    fn report(&self, report: &LedgerReport) -> Result<(), Box<dyn std::error::Error>>;
}

pub(crate) struct TextReporter;

impl Reporter for TextReporter {
    fn report(&self, report: &LedgerReport) -> Result<(), Box<dyn std::error::Error>> {
        for window in &report.windows {
            println!("{} {}", window.label, window.snapshot);
        }
        Ok(())
    }
}

pub(crate) struct TableReporter;

impl Reporter for TableReporter {
    fn report(&self, report: &LedgerReport) -> Result<(), Box<dyn std::error::Error>> {
        let use_colors = std::env::var("NO_COLOR").is_err();

        let mut table = Table::new();

        let header_cells: Vec<Cell> = ["Window", "#new", "#delete", "#bytes", "Size"]
            .iter()
            .map(|header| {
                if use_colors {
                    Cell::new(header)
                        .with_style(Attr::Bold)
                        .with_style(Attr::ForegroundColor(color::CYAN))
                } else {
                    Cell::new(header).with_style(Attr::Bold)
                }
            })
            .collect();

        table.add_row(Row::new(header_cells));

        for window in &report.windows {
            let snap = &window.snapshot;
            table.add_row(Row::new(vec![
                Cell::new(&window.label),
                Cell::new(&snap.allocations.to_string()),
                Cell::new(&snap.deallocations.to_string()),
                Cell::new(&snap.bytes_allocated.to_string()),
                Cell::new(&format_bytes(snap.bytes_allocated)),
            ]));
        }

        println!(
            "{} allocation ledger - {} window(s)",
            "[memledger]".blue().bold(),
            report.windows.len()
        );
        table.printstd();

        Ok(())
    }
}

pub(crate) struct JsonReporter;

impl Reporter for JsonReporter {
    fn report(&self, report: &LedgerReport) -> Result<(), Box<dyn std::error::Error>> {
        println!("{}", serde_json::to_string(report)?);
        Ok(())
    }
}

pub(crate) struct JsonPrettyReporter;

impl Reporter for JsonPrettyReporter {
    fn report(&self, report: &LedgerReport) -> Result<(), Box<dyn std::error::Error>> {
        println!("{}", serde_json::to_string_pretty(report)?);
        Ok(())
    }
}

/// Formats a byte count into a human-readable string with binary units.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let bytes_f = bytes as f64;
    let unit_index = (bytes_f.log(THRESHOLD).floor() as usize).min(UNITS.len() - 1);
    let unit_value = bytes_f / THRESHOLD.powi(unit_index as i32);

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", unit_value, UNITS[unit_index])
    }
}
