//! validate command - Validate SysML v2 model files

use std::path::Path;

use anyhow::Result;

use crate::api::SysmlClient;
use crate::cli::Context;
use crate::core::config::load_config;
use crate::core::types::ValidateMode;
use crate::ui::output;
use crate::validate::{self as validation, ValidationReport, SERVER_TIMEOUT};

/// Validate the model file or directory at `path`.
///
/// `server` forces server validation; otherwise `validate.mode` from
/// `sysml.toml` decides. Exits 0 iff every file passed.
pub fn validate(ctx: &Context, path: &Path, server: bool) -> Result<i32> {
    let verbosity = ctx.verbosity();
    let cwd = ctx.cwd()?;
    let files = validation::collect_files(&ctx.resolve(path)?)?;

    if files.is_empty() {
        output::print("No .sysml files found.", verbosity);
        return Ok(0);
    }

    output::print(format!("Validating {} file(s)...", files.len()), verbosity);

    let config = load_config(Some(&cwd))?.config;
    let mode = if server {
        ValidateMode::Server
    } else {
        config.validate_mode()
    };
    tracing::debug!(%mode, files = files.len(), "validating");

    let client = SysmlClient::with_timeout(config.server_url(), SERVER_TIMEOUT)?;
    let report = super::runtime()?.block_on(validation::validate(&files, mode, &client));

    if report.fell_back {
        output::warn(
            format!(
                "server unreachable at {}; fell back to local validation",
                client.base_url()
            ),
            verbosity,
        );
    }

    print_report(&report, &cwd);

    if mode == ValidateMode::Local {
        output::print(
            "\nNote: local validation checks syntax and block structure only. For \
             name resolution and typing, use --server with a running API server.",
            verbosity,
        );
    }

    Ok(if report.is_success() { 0 } else { 1 })
}

fn print_report(report: &ValidationReport, cwd: &Path) {
    if !report.errors.is_empty() {
        let rows: Vec<(String, String)> = report
            .errors
            .iter()
            .map(|e| {
                let shown = e.path.strip_prefix(cwd).unwrap_or(&e.path);
                (shown.display().to_string(), e.message.clone())
            })
            .collect();
        output::always("Validation Errors");
        output::always(output::format_table(("File", "Error"), &rows));
    }

    output::always("");
    output::always(report.summary());
}
