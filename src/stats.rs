//! Batch accumulation of accuracy, latency and consistency counters.

use crate::catalog::{Catalog, ServiceId};
use crate::runner::CaseResult;
use std::collections::BTreeMap;
use std::time::Duration;

/// Counters for one batch run, one column per call slot.
#[derive(Debug, Clone)]
pub struct BatchStats {
    slots: usize,
    total: usize,
    correct: Vec<usize>,
    latency_sum: Vec<Duration>,
    agreeing: usize,
    seen_by_service: BTreeMap<ServiceId, usize>,
    correct_by_service: Vec<BTreeMap<ServiceId, usize>>,
    confusion: BTreeMap<(ServiceId, ServiceId), usize>,
}

/// Per-service row of the breakdown table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceBreakdown {
    pub id: ServiceId,
    pub name: String,
    pub seen: usize,
    /// Correct answers per call slot.
    pub correct: Vec<usize>,
}

/// An (expected, got) pair observed at least once. `got` is 0 for failed calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Misclassification {
    pub expected: ServiceId,
    pub got: ServiceId,
    pub count: usize,
}

impl BatchStats {
    pub fn new(slots: usize) -> Self {
        Self {
            slots,
            total: 0,
            correct: vec![0; slots],
            latency_sum: vec![Duration::ZERO; slots],
            agreeing: 0,
            seen_by_service: BTreeMap::new(),
            correct_by_service: vec![BTreeMap::new(); slots],
            confusion: BTreeMap::new(),
        }
    }

    /// Fold one finished case into the counters.
    ///
    /// A slot with no outcome (fewer calls than slots) counts as incorrect.
    pub fn record(&mut self, case: &CaseResult) {
        self.total += 1;
        *self.seen_by_service.entry(case.expected).or_insert(0) += 1;

        for slot in 0..self.slots {
            let Some(call) = case.calls.get(slot) else {
                *self.confusion.entry((case.expected, 0)).or_insert(0) += 1;
                continue;
            };
            self.latency_sum[slot] += call.elapsed;
            if call.is_correct(case.expected) {
                self.correct[slot] += 1;
                *self.correct_by_service[slot]
                    .entry(case.expected)
                    .or_insert(0) += 1;
            } else {
                *self.confusion.entry((case.expected, call.got())).or_insert(0) += 1;
            }
        }

        if self.slots > 1 && case.calls.len() >= self.slots && case.is_unanimous() {
            self.agreeing += 1;
        }
    }

    pub const fn slots(&self) -> usize {
        self.slots
    }

    pub const fn total(&self) -> usize {
        self.total
    }

    pub fn correct(&self, slot: usize) -> usize {
        self.correct.get(slot).copied().unwrap_or(0)
    }

    /// Percentage of samples answered correctly by `slot`; 0 on an empty batch.
    pub fn accuracy(&self, slot: usize) -> f64 {
        percent(self.correct(slot), self.total)
    }

    /// Mean latency of `slot` in milliseconds; 0 on an empty batch.
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_latency_ms(&self, slot: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let sum = self.latency_sum.get(slot).copied().unwrap_or_default();
        sum.as_secs_f64() * 1000.0 / self.total as f64
    }

    /// Samples where every slot parsed the same id.
    pub const fn agreeing(&self) -> usize {
        self.agreeing
    }

    /// Cross-slot agreement percentage, or `None` with a single slot.
    pub fn agreement_rate(&self) -> Option<f64> {
        (self.slots > 1).then(|| percent(self.agreeing, self.total))
    }

    /// Breakdown for services seen in this batch, in catalog order.
    pub fn service_breakdown(&self, catalog: &Catalog) -> Vec<ServiceBreakdown> {
        catalog
            .all()
            .iter()
            .filter_map(|service| {
                let seen = self.seen_by_service.get(&service.id).copied()?;
                if seen == 0 {
                    return None;
                }
                let correct = self
                    .correct_by_service
                    .iter()
                    .map(|per_slot| per_slot.get(&service.id).copied().unwrap_or(0))
                    .collect();
                Some(ServiceBreakdown {
                    id: service.id,
                    name: service.name.clone(),
                    seen,
                    correct,
                })
            })
            .collect()
    }

    /// Most frequent wrong answers, ties broken by (expected, got).
    pub fn misclassifications(&self, limit: usize) -> Vec<Misclassification> {
        let mut pairs: Vec<Misclassification> = self
            .confusion
            .iter()
            .map(|(&(expected, got), &count)| Misclassification {
                expected,
                got,
                count,
            })
            .collect();
        // BTreeMap iteration already orders by key; a stable sort keeps it for ties.
        pairs.sort_by(|a, b| b.count.cmp(&a.count));
        pairs.truncate(limit);
        pairs
    }
}

#[allow(clippy::cast_precision_loss)]
fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}
