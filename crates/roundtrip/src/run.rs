//! Validating many record types in one run.

use std::fmt;

use tracing::*;

use crate::context::ValidationContext;
use crate::errors::ValidationError;
use crate::record::Record;
use crate::shape::TypeShape;
use crate::validator::{RecordReport, validate};

/// Result of validating one record type.
#[derive(Debug)]
pub struct RecordOutcome {
    record: &'static str,
    result: Result<RecordReport, ValidationError>,
}

impl RecordOutcome {
    /// Record type name.
    pub fn record(&self) -> &'static str {
        self.record
    }

    /// Pass report or the failure.
    pub fn result(&self) -> &Result<RecordReport, ValidationError> {
        &self.result
    }

    /// Returns if the record passed.
    pub fn is_pass(&self) -> bool {
        self.result.is_ok()
    }
}

/// Validates record types one after another against a shared context.
///
/// Record-level failures are recorded and the run goes on.  A fatal error
/// stops the run: it is returned from [`ValidationRun::check`], and every
/// later `check` returns it again without validating anything.
#[derive(Debug)]
pub struct ValidationRun<'c> {
    ctx: &'c mut ValidationContext,
    outcomes: Vec<RecordOutcome>,

    /// Shape that aborted the run, if any.
    aborted: Option<TypeShape>,
}

impl<'c> ValidationRun<'c> {
    /// Starts a run on a context.
    pub fn new(ctx: &'c mut ValidationContext) -> Self {
        Self {
            ctx,
            outcomes: Vec::new(),
            aborted: None,
        }
    }

    /// Validates one record type.
    pub fn check<R: Record>(&mut self) -> Result<&mut Self, ValidationError> {
        if let Some(shape) = &self.aborted {
            debug!(record = R::NAME, "validation run already aborted");
            return Err(ValidationError::UnsupportedShape {
                shape: shape.clone(),
            });
        }

        match validate::<R>(self.ctx) {
            Err(ValidationError::UnsupportedShape { shape }) => {
                let e = ValidationError::UnsupportedShape {
                    shape: shape.clone(),
                };
                error!(record = R::NAME, err = %e, "aborting validation run");
                self.aborted = Some(shape);
                Err(e)
            }
            result => {
                if let Err(e) = &result {
                    warn!(record = R::NAME, err = %e, "record failed validation");
                }
                self.outcomes.push(RecordOutcome {
                    record: R::NAME,
                    result,
                });
                Ok(self)
            }
        }
    }

    /// Returns if a fatal error stopped the run.
    pub fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }

    /// Finishes the run.
    pub fn finish(self) -> RunReport {
        let report = RunReport {
            outcomes: self.outcomes,
        };
        info!(
            passed = report.passed().count(),
            failed = report.failed().count(),
            "validation run finished"
        );
        report
    }
}

/// Per-record outcomes of a finished run.
#[derive(Debug)]
pub struct RunReport {
    outcomes: Vec<RecordOutcome>,
}

impl RunReport {
    /// All outcomes, in the order records were checked.
    pub fn outcomes(&self) -> &[RecordOutcome] {
        &self.outcomes
    }

    /// Looks up the outcome for a record type.
    pub fn outcome(&self, record: &str) -> Option<&RecordOutcome> {
        self.outcomes.iter().find(|o| o.record == record)
    }

    /// Reports of the records that passed.
    pub fn passed(&self) -> impl Iterator<Item = &RecordReport> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    /// Failures, with the record they belong to.
    pub fn failed(&self) -> impl Iterator<Item = (&'static str, &ValidationError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.record, e)))
    }

    /// Returns if every record passed.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(RecordOutcome::is_pass)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passed, {} failed",
            self.passed().count(),
            self.failed().count()
        )?;
        for (record, err) in self.failed() {
            write!(f, "\n  [{record}] {err}")?;
        }
        Ok(())
    }
}
