//! Observer hooks for processing outcomes.
//!
//! Every entry point that takes an options struct reports its outcome to the configured
//! [`ProcessingObserver`], if any. Implementors can record metrics, logs, or trigger alerts.

use std::fmt;
use std::sync::Arc;

use crate::error::{FunctionName, ProcessingFailure};
use crate::types::Shape;

/// Context about a single processing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingContext {
    /// Entry point that ran.
    pub function: FunctionName,
    /// Shape of the input (`Scalar` for combine calls and unsupported inputs).
    pub shape: Shape,
    /// Mode flag in effect; only set for map inputs.
    pub mode: Option<String>,
}

/// Minimal stats reported on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    /// Number of input elements (or combine arguments).
    pub input_len: usize,
    /// Number of output elements; 1 for combine calls.
    pub output_len: usize,
}

/// Observer interface for processing outcomes.
pub trait ProcessingObserver: Send + Sync {
    /// Called when a call succeeds.
    fn on_success(&self, _ctx: &ProcessingContext, _stats: ProcessingStats) {}

    /// Called when a call fails.
    fn on_failure(&self, _ctx: &ProcessingContext, _failure: &ProcessingFailure) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ProcessingObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ProcessingObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ProcessingObserver for CompositeObserver {
    fn on_success(&self, ctx: &ProcessingContext, stats: ProcessingStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &ProcessingContext, failure: &ProcessingFailure) {
        for o in &self.observers {
            o.on_failure(ctx, failure);
        }
    }
}

/// Logs processing events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl StdErrObserver {
    fn success_line(ctx: &ProcessingContext, stats: ProcessingStats) -> String {
        format!(
            "[{}][ok] shape={:?}{} in={} out={}",
            ctx.function,
            ctx.shape,
            mode_suffix(ctx),
            stats.input_len,
            stats.output_len
        )
    }

    fn failure_line(ctx: &ProcessingContext, failure: &ProcessingFailure) -> String {
        format!(
            "[{}][err] shape={:?}{} kind={:?} err={}",
            ctx.function,
            ctx.shape,
            mode_suffix(ctx),
            failure.kind(),
            failure.message()
        )
    }
}

fn mode_suffix(ctx: &ProcessingContext) -> String {
    match &ctx.mode {
        Some(mode) => format!(" mode={mode}"),
        None => String::new(),
    }
}

impl ProcessingObserver for StdErrObserver {
    fn on_success(&self, ctx: &ProcessingContext, stats: ProcessingStats) {
        eprintln!("{}", Self::success_line(ctx, stats));
    }

    fn on_failure(&self, ctx: &ProcessingContext, failure: &ProcessingFailure) {
        eprintln!("{}", Self::failure_line(ctx, failure));
    }
}

/// Reports `result` to `observer` and hands it back unchanged.
pub(crate) fn report<T>(
    observer: Option<&Arc<dyn ProcessingObserver>>,
    ctx: ProcessingContext,
    input_len: usize,
    output_len: impl FnOnce(&T) -> usize,
    result: Result<T, ProcessingFailure>,
) -> Result<T, ProcessingFailure> {
    if let Some(obs) = observer {
        match &result {
            Ok(out) => obs.on_success(
                &ctx,
                ProcessingStats {
                    input_len,
                    output_len: output_len(out),
                },
            ),
            Err(failure) => obs.on_failure(&ctx, failure),
        }
    }
    result
}
