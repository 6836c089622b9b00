//! serve command - Manage the local API server via Docker Compose

use std::path::Path;
use std::time::Duration;

use anyhow::{Context as _, Result};

use crate::api::SysmlClient;
use crate::cli::args::ServeAction;
use crate::cli::Context;
use crate::core::config::{load_config, ProjectConfig};
use crate::core::types::Backend;
use crate::process::ProcessRunner;
use crate::server::flexo::ORG_ID;
use crate::server::{
    compose_command, find_compose_file, BootstrapOutcome, ComposeAction, FlexoBootstrap,
    OrgStatus, PollPolicy,
};
use crate::ui::output::{self, Verbosity};

/// Timeout for the `serve status` API probe.
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Run a `serve` subcommand.
///
/// The backend comes from `--backend`, else from `sysml.toml`. Exit codes
/// mirror `docker compose`.
pub fn serve(
    ctx: &Context,
    runner: &dyn ProcessRunner,
    backend: Option<Backend>,
    action: ServeAction,
) -> Result<i32> {
    serve_with_policy(ctx, runner, backend, action, PollPolicy::default())
}

fn serve_with_policy(
    ctx: &Context,
    runner: &dyn ProcessRunner,
    backend: Option<Backend>,
    action: ServeAction,
    policy: PollPolicy,
) -> Result<i32> {
    let verbosity = ctx.verbosity();
    let cwd = ctx.cwd()?;
    let config = load_config(Some(&cwd))?.config;
    let backend = backend.unwrap_or(config.backend());

    let Some(file) = find_compose_file(&cwd, backend) else {
        output::error("No docker-compose file found.");
        eprintln!("  Run 'sysml init' first, or check you're in a SysML project.");
        return Ok(1);
    };

    match action {
        ServeAction::Up => up(runner, &file, backend, &config, policy, verbosity),
        ServeAction::Down => compose(runner, &file, ComposeAction::Down, backend),
        ServeAction::Logs { no_follow } => compose(
            runner,
            &file,
            ComposeAction::Logs { follow: !no_follow },
            backend,
        ),
        ServeAction::Pull => compose(runner, &file, ComposeAction::Pull, backend),
        ServeAction::Status => status(runner, &file, backend, &config, verbosity),
    }
}

/// Run one compose action and return its exit code.
fn compose(
    runner: &dyn ProcessRunner,
    file: &Path,
    action: ComposeAction,
    backend: Backend,
) -> Result<i32> {
    let spec = compose_command(file, action, backend);
    let output = runner
        .run(&spec)
        .context("could not run docker compose; is Docker installed?")?;
    Ok(output.code)
}

fn up(
    runner: &dyn ProcessRunner,
    file: &Path,
    backend: Backend,
    config: &ProjectConfig,
    policy: PollPolicy,
    verbosity: Verbosity,
) -> Result<i32> {
    output::print(
        format!("Starting server using {}...", file.display()),
        verbosity,
    );
    if backend.builds_images() {
        output::print(
            "  (first run builds from source; this may take a few minutes)",
            verbosity,
        );
    }

    let code = compose(runner, file, ComposeAction::Up, backend)?;
    if code != 0 || backend != Backend::Flexo {
        return Ok(code);
    }

    output::print("Waiting for Flexo to come up...", verbosity);
    let bootstrap = match FlexoBootstrap::from_config(config) {
        Ok(bootstrap) => bootstrap.with_policy(policy),
        Err(e) => {
            output::warn(format!("skipping flexo bootstrap: {}", e), verbosity);
            return Ok(code);
        }
    };
    let outcome = super::runtime()?.block_on(bootstrap.run());
    report_bootstrap(&outcome, config, verbosity);

    Ok(code)
}

fn report_bootstrap(outcome: &BootstrapOutcome, config: &ProjectConfig, verbosity: Verbosity) {
    if !outcome.layer1_ready {
        output::warn(
            format!(
                "Flexo did not become ready at {}; run 'sysml serve up' again to retry the setup",
                config.flexo_url()
            ),
            verbosity,
        );
        return;
    }

    match &outcome.org {
        Some(OrgStatus::Created) => {
            output::success(format!("Organization '{}' created", ORG_ID), verbosity)
        }
        Some(OrgStatus::AlreadyExists) => {
            output::success(format!("Organization '{}' already exists", ORG_ID), verbosity)
        }
        Some(OrgStatus::Failed(message)) => output::warn(
            format!("could not create organization '{}': {}", ORG_ID, message),
            verbosity,
        ),
        None => {}
    }

    if outcome.api_ready {
        output::success(
            format!("API server ready at {}", config.server_url()),
            verbosity,
        );
    } else {
        output::warn(
            format!(
                "API server not ready at {} yet; check 'sysml serve logs'",
                config.server_url()
            ),
            verbosity,
        );
    }
}

fn status(
    runner: &dyn ProcessRunner,
    file: &Path,
    backend: Backend,
    config: &ProjectConfig,
    verbosity: Verbosity,
) -> Result<i32> {
    let code = compose(runner, file, ComposeAction::Ps, backend)?;
    output::print("", verbosity);

    let url = config.server_url();
    let client = SysmlClient::with_timeout(url, STATUS_TIMEOUT)?;
    match super::runtime()?.block_on(client.ping()) {
        Ok(status) => output::success(
            format!("API server reachable at {} (HTTP {})", url, status),
            verbosity,
        ),
        Err(e) => {
            tracing::debug!(error = %e, "status probe failed");
            output::warn(format!("API server not reachable at {}", url), verbosity);
        }
    }

    Ok(code)
}
