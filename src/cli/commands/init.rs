//! init command - Scaffold a new SysML v2 project

use std::fs;
use std::path::Path;

use anyhow::{bail, Context as _, Result};

use crate::cli::Context;
use crate::core::config::{read_config, CONFIG_FILENAME};
use crate::core::paths;
use crate::core::types::Backend;
use crate::git;
use crate::process::ProcessRunner;
use crate::scaffold::{self, TemplateVars};
use crate::ui::output::{self, Verbosity};
use crate::ui::prompts::{self, PromptError};

/// Scaffold a new project.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `runner` - Runs `git clone` for the standard library
/// * `path` - Target directory; its final component names the project
/// * `backend` - API server backend written to `sysml.toml`
/// * `yes` - Skip all prompts, answering yes
/// * `no_library` - Skip the standard library clone
///
/// Only directory creation, writing the template and reading back the
/// generated `sysml.toml` are fatal. Git setup and the library clone warn and
/// continue. The clone target is `library.path` from that config.
pub fn init(
    ctx: &Context,
    runner: &dyn ProcessRunner,
    path: &Path,
    backend: Backend,
    yes: bool,
    no_library: bool,
) -> Result<i32> {
    let verbosity = ctx.verbosity();
    let dest = paths::resolve(&ctx.resolve(path)?);
    let project_name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sysml-project".to_string());

    if is_non_empty_dir(&dest)? && !yes {
        let question = format!("Directory '{}' is not empty. Continue?", dest.display());
        match prompts::confirm(&question, false, ctx.interactive) {
            Ok(true) => {}
            Ok(false) | Err(PromptError::Cancelled) => {
                output::always("Aborted.");
                return Ok(1);
            }
            Err(PromptError::NotInteractive) => bail!(
                "directory '{}' is not empty; pass --yes to initialize it without a prompt",
                dest.display()
            ),
            Err(e) => return Err(e.into()),
        }
    }

    fs::create_dir_all(&dest)
        .with_context(|| format!("failed to create directory '{}'", dest.display()))?;

    output::print(
        format!("Initializing SysML v2 project: {}", project_name),
        verbosity,
    );
    output::print(format!("  Backend: {}", backend), verbosity);
    output::print("", verbosity);

    let vars = TemplateVars {
        project_name: project_name.clone(),
        backend,
    };
    scaffold::scaffold(&dest, &vars).context("failed to write project files")?;
    output::success("Project files created", verbosity);

    match git::init_repository(&dest) {
        Ok(true) => output::success("Git repository initialized", verbosity),
        Ok(false) => tracing::debug!("git repository already present"),
        Err(e) => output::warn(format!("could not initialize git repository: {}", e), verbosity),
    }

    let config = read_config(&dest.join(CONFIG_FILENAME))
        .context("failed to read the generated sysml.toml")?;
    let library = dest.join(config.library_path());
    if no_library {
        tracing::debug!("standard library clone skipped (--no-library)");
    } else if library.exists() {
        tracing::debug!(path = %library.display(), "standard library already present");
    } else if wants_library(ctx, yes, verbosity) {
        clone_library(runner, &library, verbosity);
    }

    print_next_steps(&project_name, backend, verbosity);
    Ok(0)
}

fn is_non_empty_dir(dir: &Path) -> Result<bool> {
    if !dir.is_dir() {
        return Ok(false);
    }
    let mut entries =
        fs::read_dir(dir).with_context(|| format!("failed to read '{}'", dir.display()))?;
    Ok(entries.next().is_some())
}

/// Ask whether to clone the library. Defaults to yes, including when
/// prompting is impossible.
fn wants_library(ctx: &Context, yes: bool, verbosity: Verbosity) -> bool {
    if yes {
        return true;
    }
    match prompts::confirm(
        "Clone the SysML v2 standard library?",
        true,
        ctx.interactive,
    ) {
        Ok(answer) => answer,
        Err(PromptError::NotInteractive) => true,
        Err(PromptError::Cancelled) => false,
        Err(e) => {
            output::warn(format!("could not read answer: {}", e), verbosity);
            false
        }
    }
}

fn clone_library(runner: &dyn ProcessRunner, library: &Path, verbosity: Verbosity) {
    output::print("  Cloning standard library...", verbosity);
    match git::clone_library(runner, library) {
        Ok(()) => output::success("Standard library cloned", verbosity),
        Err(e) => {
            output::warn(format!("could not clone standard library: {}", e), verbosity);
            output::print(
                format!("  Clone manually:\n    {}", git::clone_command(library)),
                verbosity,
            );
        }
    }
}

fn print_next_steps(project_name: &str, backend: Backend, verbosity: Verbosity) {
    let up_note = if backend.builds_images() {
        "# start the API server (builds on first run)"
    } else {
        "# start the API server"
    };

    output::print("", verbosity);
    output::print("Done! Next steps:", verbosity);
    output::print(format!("  cd {}", project_name), verbosity);
    output::print("  code .                  # open in VS Code", verbosity);
    output::print(format!("  sysml serve up          {}", up_note), verbosity);
    output::print("  sysml validate models/  # validate your models", verbosity);
}
