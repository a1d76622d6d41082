//! Report generation port trait.

use crate::domain::error::PulsetraderError;
use crate::domain::evaluate::Evaluation;
use std::path::Path;

/// Port for writing evaluation reports.
pub trait ReportPort {
    fn write(&self, evaluation: &Evaluation, output_path: &Path) -> Result<(), PulsetraderError>;
}
