use similar::TextDiff;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::PatcherConfig;
use crate::error::{PatchError, PatchResult};
use crate::fixes::invoice_page_fixes;
use crate::patch::{PatchSet, StepReport};
use crate::utils::fs::{read_file_to_string, write_file, write_file_atomic};

/// Printed after a successful write. Fixed text; it does not depend on what matched.
pub const SUCCESS_REPORT: [&str; 4] = [
    "✅ All fixes applied successfully!",
    "- Added global currentInvoices variable",
    "- Removed grid-column span from Inspection Notes (now in same row)",
    "- Updated save handler to use currentInvoices",
];

/// What a run did, for callers that want more than the fixed report
#[derive(Debug, Clone)]
pub struct ApplyReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub steps: Vec<StepReport>,
    /// Patched content differs from what was read
    pub changed: bool,
    /// Output file was written (false in dry-run mode)
    pub written: bool,
}

/// Loads the page, runs the fixes in order, stores the result and reports
pub struct PatchApplier {
    config: PatcherConfig,
    fixes: PatchSet,
}

impl PatchApplier {
    /// Applier for the invoice page fixes
    pub fn new(config: PatcherConfig) -> PatchResult<Self> {
        config.validate()?;
        Ok(Self::with_fixes(config, invoice_page_fixes()?))
    }

    pub fn with_fixes(config: PatcherConfig, fixes: PatchSet) -> Self {
        Self { config, fixes }
    }

    pub fn config(&self) -> &PatcherConfig {
        &self.config
    }

    /// Run Load -> Transform -> Store -> Report, writing the report to `out`.
    ///
    /// Any file error aborts the run before the report is printed. A read
    /// failure means nothing is written. Fixes that match nothing are skipped
    /// silently; their counts are only logged.
    pub fn run(&self, out: &mut impl Write) -> PatchResult<ApplyReport> {
        let input = self.config.input.clone();
        let output = self.config.output_path().to_path_buf();

        info!("Patching {}", input.display());
        let original = read_file_to_string(&input)?;

        let outcome = self.fixes.apply(&original);
        let changed = outcome.content != original;
        info!(
            "{} match(es) across {} fixes",
            outcome.total_matches(),
            self.fixes.len()
        );

        let mut report = ApplyReport {
            input,
            output,
            steps: outcome.steps,
            changed,
            written: false,
        };

        if self.config.dry_run {
            if !changed {
                warn!("Dry run: {} would not change", report.input.display());
                return Ok(report);
            }
            let diff = unified_diff(&original, &outcome.content, &report);
            out.write_all(diff.as_bytes()).map_err(PatchError::Report)?;
            return Ok(report);
        }

        if self.config.atomic_write {
            write_file_atomic(&report.output, &outcome.content)?;
        } else {
            write_file(&report.output, &outcome.content)?;
        }
        report.written = true;
        debug!("Wrote {} bytes to {}", outcome.content.len(), report.output.display());

        for line in SUCCESS_REPORT {
            writeln!(out, "{}", line).map_err(PatchError::Report)?;
        }

        Ok(report)
    }
}

fn unified_diff(old: &str, new: &str, report: &ApplyReport) -> String {
    let old_name = report.input.display().to_string();
    let new_name = report.output.display().to_string();

    let diff = TextDiff::from_lines(old, new);
    let mut unified = diff.unified_diff();
    unified.context_radius(3).header(&old_name, &new_name);
    unified.to_string()
}
