//! Console report for the benchmark and CSV output for the probe.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::provider::Classification;
use crate::runner::CaseResult;
use crate::stats::BatchStats;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write as _;
use std::io::Write;

const RULE_WIDTH: usize = 94;
const MAX_ERROR_CHARS: usize = 180;
const MAX_MISCLASSIFICATIONS: usize = 30;

pub const PROBE_HEADER: [&str; 5] = ["service_id", "service_name", "intent", "success", "error"];

// ============================================================================
// Benchmark console report
// ============================================================================

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

pub fn write_batch_header<W: Write>(
    out: &mut W,
    label: &str,
    samples: usize,
    model: &str,
    slots: usize,
    started: DateTime<Utc>,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "===== Batch: {label} =====")?;
    writeln!(
        out,
        "Samples: {samples} | Model: {model} | Calls per sample: {slots} | Started: {}",
        started.to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    writeln!(out, "{}", rule())?;

    let mut header = format!("{:<5} | {:<5} | ", "Idx", "Exp");
    for slot in 1..=slots {
        let _ = write!(header, "{:<6} | ", format!("Got#{slot}"));
    }
    for slot in 1..=slots {
        let _ = write!(header, "{:<12} | ", format!("Lat#{slot}(ms)"));
    }
    header.push_str("Intent");
    writeln!(out, "{header}")?;
    writeln!(out, "{}", rule())?;
    Ok(())
}

/// One fixed-width row plus a diagnostic line per failed call.
pub fn write_case<W: Write>(out: &mut W, case: &CaseResult) -> Result<()> {
    let mut row = format!("{:<5} | {:<5} | ", case.index, case.expected);
    for call in &case.calls {
        let _ = write!(row, "{:<6} | ", call.got());
    }
    for call in &case.calls {
        let _ = write!(row, "{:<12.2} | ", call.elapsed.as_secs_f64() * 1000.0);
    }
    row.push_str(&case.intent);
    writeln!(out, "{row}")?;

    for (slot, call) in case.calls.iter().enumerate() {
        if let Some(error) = &call.error {
            writeln!(out, "    error#{}: {}", slot + 1, truncate_error(&error.to_string()))?;
        }
    }
    Ok(())
}

pub fn write_summary<W: Write>(out: &mut W, stats: &BatchStats, catalog: &Catalog) -> Result<()> {
    let slots = stats.slots();
    writeln!(out, "{}", rule())?;

    let accuracy: Vec<String> = (0..slots)
        .map(|slot| format!("Accuracy #{}: {:.1}%", slot + 1, stats.accuracy(slot)))
        .collect();
    writeln!(out, "{}", accuracy.join(" | "))?;

    let latency: Vec<String> = (0..slots)
        .map(|slot| {
            format!(
                "Average latency #{}: {:.2} ms",
                slot + 1,
                stats.avg_latency_ms(slot)
            )
        })
        .collect();
    writeln!(out, "{}", latency.join(" | "))?;

    if let Some(rate) = stats.agreement_rate() {
        writeln!(
            out,
            "Agreement across {slots} calls: {}/{} ({rate:.1}%)",
            stats.agreeing(),
            stats.total()
        )?;
    }

    let columns: Vec<String> = (1..=slots).map(|slot| format!("ok#{slot}")).collect();
    writeln!(out)?;
    writeln!(
        out,
        "Per-service summary (ID: seen / {} / name):",
        columns.join(" / ")
    )?;
    for row in stats.service_breakdown(catalog) {
        let mut line = format!("  {:>2}: {:>3}", row.id, row.seen);
        for correct in &row.correct {
            let _ = write!(line, " / {correct:>3}");
        }
        let _ = write!(line, "  - {}", row.name);
        writeln!(out, "{line}")?;
    }

    let misses = stats.misclassifications(MAX_MISCLASSIFICATIONS);
    if !misses.is_empty() {
        writeln!(out)?;
        writeln!(out, "Misclassifications (expected -> got : count):")?;
        for miss in misses {
            writeln!(out, "  {:>3} -> {:>3} : {}", miss.expected, miss.got, miss.count)?;
        }
    }
    Ok(())
}

/// Cap a diagnostic at a fixed number of characters.
pub fn truncate_error(message: &str) -> String {
    match message.char_indices().nth(MAX_ERROR_CHARS) {
        Some((cut, _)) => format!("{}...", &message[..cut]),
        None => message.to_string(),
    }
}

// ============================================================================
// Probe CSV output
// ============================================================================

/// `;`-delimited writer for classification-service results.
pub struct ProbeWriter<W: Write> {
    csv: csv::Writer<W>,
}

impl<W: Write> ProbeWriter<W> {
    /// Wrap `inner` and write the header row.
    pub fn new(inner: W) -> Result<Self> {
        let mut csv = csv::WriterBuilder::new()
            .delimiter(b';')
            .from_writer(inner);
        csv.write_record(PROBE_HEADER)?;
        Ok(Self { csv })
    }

    pub fn write_success(&mut self, classification: &Classification, intent: &str) -> Result<()> {
        self.csv.write_record([
            classification.service_id.to_string().as_str(),
            classification.service_name.as_str(),
            intent,
            "true",
            "",
        ])?;
        Ok(())
    }

    pub fn write_failure(&mut self, intent: &str, error: &str) -> Result<()> {
        self.csv.write_record(["", "", intent, "false", error])?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.csv.flush()?;
        Ok(())
    }
}
