//! Authoritative bar list and its decorated indicator results.

use tracing::debug;

use crate::bar::Bar;
use crate::indicator::{AnyCalculator, CalculatorRegistry, IndicatorData, IndicatorKey};

/// Owns the current bar list and its decorated indicator results as a
/// single consistent pair, replaced atomically on every update.
///
/// `install_calculator`/`remove_calculator` mutate the calculator set
/// only; callers re-issue [`update`](Self::update) (or stage a job)
/// with the current bars to refresh derived data. Every refresh is a
/// full O(n x indicators) pass; the recompute lives behind this type so
/// an incremental variant could replace it without touching the
/// calculators.
///
/// All mutation belongs on one execution context (the UI thread
/// equivalent). The staged-job path lets the expensive recompute run
/// elsewhere: results come back as values and are published through
/// [`commit`](Self::commit), which discards anything superseded by a
/// newer generation.
#[derive(Debug, Default)]
pub struct DataSource {
    bars: Vec<Bar>,
    decorated: Vec<IndicatorData>,
    calculators: CalculatorRegistry,
    /// Generation of the currently published pair
    published: u64,
    /// Generation handed to the most recent update or staged job
    staged: u64,
}

impl DataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calculators(calculators: CalculatorRegistry) -> Self {
        Self {
            calculators,
            ..Self::default()
        }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn decorated(&self) -> &[IndicatorData] {
        &self.decorated
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn install_calculator(&mut self, calculator: AnyCalculator) {
        self.calculators.install(calculator);
    }

    pub fn remove_calculator(&mut self, key: IndicatorKey) {
        self.calculators.remove(key);
    }

    pub fn has_calculator(&self, key: IndicatorKey) -> bool {
        self.calculators.contains(key)
    }

    pub fn calculator_keys(&self) -> Vec<IndicatorKey> {
        self.calculators.keys()
    }

    /// Synchronous full recompute: decorate the new bars with every
    /// registered calculator and swap in the (bars, indicators) pair.
    pub fn update(&mut self, bars: Vec<Bar>) {
        let decorated = self.calculators.decorate_parallel(&bars);
        self.staged += 1;
        self.published = self.staged;
        self.bars = bars;
        self.decorated = decorated;
    }

    /// Stage a recompute to run off the owning context. The job owns a
    /// snapshot of the calculator set and a monotonic generation stamp.
    pub fn stage(&mut self, bars: Vec<Bar>) -> RecomputeJob {
        self.staged += 1;
        RecomputeJob {
            generation: self.staged,
            bars,
            calculators: self.calculators.clone(),
        }
    }

    /// Publish the outcome of a staged job. Returns `false` when the
    /// outcome is stale (a newer pair has been published since it was
    /// staged); stale outcomes are discarded, never merged.
    pub fn commit(&mut self, outcome: RecomputeOutcome) -> bool {
        if outcome.generation <= self.published {
            debug!(
                generation = outcome.generation,
                published = self.published,
                "stale recompute discarded"
            );
            return false;
        }
        self.published = outcome.generation;
        self.bars = outcome.bars;
        self.decorated = outcome.decorated;
        true
    }
}

/// A staged full recompute. `Send`, so it can run on a worker thread or
/// inside `tokio::task::spawn_blocking`.
#[derive(Debug)]
pub struct RecomputeJob {
    generation: u64,
    bars: Vec<Bar>,
    calculators: CalculatorRegistry,
}

impl RecomputeJob {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fan the calculators out over the bars and collect the decorated
    /// result. Consumes the job; the outcome travels back to the owning
    /// context for [`DataSource::commit`].
    pub fn run(self) -> RecomputeOutcome {
        let decorated = self.calculators.decorate_parallel(&self.bars);
        RecomputeOutcome {
            generation: self.generation,
            bars: self.bars,
            decorated,
        }
    }
}

/// The result of a [`RecomputeJob`].
#[derive(Debug)]
pub struct RecomputeOutcome {
    generation: u64,
    bars: Vec<Bar>,
    decorated: Vec<IndicatorData>,
}

impl RecomputeOutcome {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
