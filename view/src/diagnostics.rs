use log::warn;

use crate::world::error::ViewError;

/// Receives a description of every failed View operation.
///
/// The error is still returned to the caller; the sink only observes it.
pub trait DiagnosticsSink {
    fn report(&mut self, operation: &'static str, error: &ViewError);
}

/// Default sink, writes a warning through the `log` facade
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDiagnostics;

impl DiagnosticsSink for LogDiagnostics {
    fn report(&mut self, operation: &'static str, error: &ViewError) {
        warn!("{}() failed ({}): {}, ignoring.", operation, error.kind(), error);
    }
}
