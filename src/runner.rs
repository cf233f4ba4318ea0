//! Sequential evaluation loops for both oracle kinds.
//!
//! Samples are processed one at a time and calls within a sample run
//! back-to-back. Row-scoped oracle failures are recorded against their row and
//! never retried; any other error (sink I/O, request encoding) aborts the run.

use crate::catalog::{Catalog, ServiceId};
use crate::error::{Error, Result};
use crate::parse::parse_service_id;
use crate::prompt::{system_prompt, user_prompt};
use crate::provider::{ChatOracle, ClassificationOracle, Completion, Usage};
use crate::report::{self, ProbeWriter};
use crate::sample::Sample;
use crate::stats::BatchStats;
use std::io::Write;
use std::time::{Duration, Instant};

// ============================================================================
// Per-call and per-case results
// ============================================================================

/// Outcome of one oracle call.
#[derive(Debug)]
pub struct CallOutcome {
    /// Raw oracle text; empty when the call itself failed.
    pub raw_text: String,
    /// `None` when the call errored or the text did not parse to a catalog id.
    pub parsed_id: Option<ServiceId>,
    pub elapsed: Duration,
    /// Model name the provider reported.
    pub model: Option<String>,
    pub finish_reason: Option<String>,
    pub usage: Usage,
    pub error: Option<Error>,
}

impl CallOutcome {
    /// Fold one call's result into an outcome; errors that are not row-scoped
    /// are handed back to abort the batch.
    fn from_completion(
        result: Result<Completion>,
        elapsed: Duration,
        catalog: &Catalog,
    ) -> Result<Self> {
        match result {
            Ok(completion) => {
                let (parsed_id, error) = match parse_service_id(&completion.text, catalog) {
                    Ok(id) => (Some(id), None),
                    Err(err) => (None, Some(err)),
                };
                Ok(Self {
                    raw_text: completion.text,
                    parsed_id,
                    elapsed,
                    model: completion.model,
                    finish_reason: completion.finish_reason,
                    usage: completion.usage,
                    error,
                })
            }
            Err(err) if err.is_row_scoped() => Ok(Self {
                raw_text: String::new(),
                parsed_id: None,
                elapsed,
                model: None,
                finish_reason: None,
                usage: Usage::default(),
                error: Some(err),
            }),
            Err(err) => Err(err),
        }
    }

    /// Id shown in the report; 0 stands for "no usable answer".
    pub fn got(&self) -> ServiceId {
        self.parsed_id.unwrap_or(0)
    }

    pub fn is_correct(&self, expected: ServiceId) -> bool {
        self.parsed_id == Some(expected)
    }
}

/// All calls made for one sample.
#[derive(Debug)]
pub struct CaseResult {
    /// 1-based position in the batch.
    pub index: usize,
    pub expected: ServiceId,
    pub intent: String,
    pub calls: Vec<CallOutcome>,
}

impl CaseResult {
    /// Every call parsed, and all parsed to the same id.
    pub fn is_unanimous(&self) -> bool {
        let mut ids = self.calls.iter().map(|call| call.parsed_id);
        match ids.next() {
            Some(Some(first)) => ids.all(|id| id == Some(first)),
            _ => false,
        }
    }
}

// ============================================================================
// Chat-completion harness
// ============================================================================

/// Parameters of one benchmark batch.
#[derive(Debug, Clone)]
pub struct BenchOptions {
    /// Shown in the batch header, typically the input file.
    pub label: String,
    /// Independent identical calls per sample (2 = dual-call probe).
    pub calls_per_sample: usize,
}

impl Default for BenchOptions {
    fn default() -> Self {
        Self {
            label: String::new(),
            calls_per_sample: 2,
        }
    }
}

/// Score every sample against `oracle`, streaming the console report to `out`.
pub fn run_benchmark<O, W>(
    oracle: &O,
    catalog: &Catalog,
    samples: &[Sample],
    options: &BenchOptions,
    out: &mut W,
) -> Result<BatchStats>
where
    O: ChatOracle + ?Sized,
    W: Write,
{
    let system = system_prompt(catalog);
    let slots = options.calls_per_sample;
    let mut stats = BatchStats::new(slots);

    tracing::info!(
        label = %options.label,
        samples = samples.len(),
        model = oracle.model_id(),
        calls = slots,
        "Starting batch"
    );
    report::write_batch_header(
        out,
        &options.label,
        samples.len(),
        oracle.model_id(),
        slots,
        chrono::Utc::now(),
    )?;

    for (offset, sample) in samples.iter().enumerate() {
        let case = evaluate_sample(oracle, catalog, &system, offset + 1, sample, slots)?;
        stats.record(&case);
        report::write_case(out, &case)?;
    }

    report::write_summary(out, &stats, catalog)?;
    out.flush()?;

    tracing::info!(
        label = %options.label,
        total = stats.total(),
        agreeing = stats.agreeing(),
        "Finished batch"
    );
    Ok(stats)
}

/// Issue `calls` identical requests for one sample and collect their outcomes.
pub fn evaluate_sample<O>(
    oracle: &O,
    catalog: &Catalog,
    system: &str,
    index: usize,
    sample: &Sample,
    calls: usize,
) -> Result<CaseResult>
where
    O: ChatOracle + ?Sized,
{
    let user = user_prompt(&sample.intent);
    let outcomes = (0..calls)
        .map(|slot| {
            let started = Instant::now();
            let result = oracle.complete(system, &user);
            let outcome = CallOutcome::from_completion(result, started.elapsed(), catalog)?;
            tracing::debug!(
                index,
                slot = slot + 1,
                expected = sample.service_id,
                got = outcome.got(),
                elapsed_ms = outcome.elapsed.as_secs_f64() * 1000.0,
                reported_model = outcome.model.as_deref().unwrap_or_default(),
                finish_reason = outcome.finish_reason.as_deref().unwrap_or_default(),
                prompt_tokens = outcome.usage.prompt_tokens,
                completion_tokens = outcome.usage.completion_tokens,
                "Oracle call finished"
            );
            Ok(outcome)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CaseResult {
        index,
        expected: sample.service_id,
        intent: sample.intent.clone(),
        calls: outcomes,
    })
}

// ============================================================================
// Classification-service harness
// ============================================================================

/// Row counts from a probe run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeSummary {
    pub rows: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Send each sample's intent once and write one output row per sample.
pub fn run_probe<C, W>(
    client: &C,
    samples: &[Sample],
    sink: &mut ProbeWriter<W>,
) -> Result<ProbeSummary>
where
    C: ClassificationOracle + ?Sized,
    W: Write,
{
    let mut summary = ProbeSummary::default();
    tracing::info!(endpoint = client.endpoint(), samples = samples.len(), "Starting probe");

    for sample in samples {
        let started = Instant::now();
        let result = client.classify(&sample.intent);
        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(classification) => {
                sink.write_success(&classification, &sample.intent)?;
                summary.succeeded += 1;
            }
            Err(err) if err.is_row_scoped() => {
                tracing::warn!(
                    latency_ms,
                    intent = %sample.intent,
                    error = %err,
                    "Classification failed"
                );
                sink.write_failure(&sample.intent, &err.row_message())?;
                summary.failed += 1;
            }
            Err(err) => return Err(err),
        }
        summary.rows += 1;
    }

    sink.flush()?;
    Ok(summary)
}
