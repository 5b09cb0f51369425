//! Routes a parsed command line to the clone, commit, update, or passthrough
//! handlers.

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::debug;

use crate::ai::create_service;
use crate::cli::Cli;
use crate::commit::{CommitArgs, GitCommitter, MessageSource, RepoDiffSource, run_commit};
use crate::config::Config;
use crate::gh::{GhCli, render_invocation};
use crate::repo::{CloneArgs, clone_repository, resolve_base_dir};
use crate::update::{RELEASE_REPO, Updater};

/// Which handler a command line is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Update,
    Clone,
    Commit,
    DryRun,
    Passthrough,
}

/// Pick the handler for a command line. The first matching rule wins.
pub fn route(cli: &Cli) -> Route {
    if cli.update {
        return Route::Update;
    }

    let command = cli.command_name();
    let is_clone = command == "repo" && cli.args().first().is_some_and(|a| a == "clone");

    if is_clone && !cli.use_default {
        Route::Clone
    } else if command == "commit" {
        Route::Commit
    } else if cli.dry_run {
        Route::DryRun
    } else {
        Route::Passthrough
    }
}

/// Execute the routed handler and return the process exit code.
pub async fn dispatch<W: Write>(
    cli: &Cli,
    config: &Config,
    gh: &GhCli,
    out: &mut W,
) -> Result<ExitCode> {
    let route = route(cli);
    debug!("Dispatching {:?}", route);

    match route {
        Route::Update => update(cli, out).await,
        Route::Clone => clone(cli, config, gh, out).await,
        Route::Commit => commit(cli, config, out).await,
        Route::DryRun => {
            writeln!(
                out,
                "Dry run: would execute `{}`",
                render_invocation(cli.command_name(), cli.args())
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Route::Passthrough => {
            let args = std::iter::once(cli.command_name())
                .chain(cli.args().iter().map(String::as_str));
            let code = gh.passthrough(args).await?;
            Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
        }
    }
}

async fn clone<W: Write>(cli: &Cli, config: &Config, gh: &GhCli, out: &mut W) -> Result<ExitCode> {
    let args = CloneArgs::parse(cli.args())?;
    let base_dir = resolve_base_dir(config, args.dir.as_deref(), cli.dir.as_deref());

    if cli.dry_run {
        writeln!(
            out,
            "Dry run: would clone {} into {}",
            args.address,
            base_dir.display()
        )?;
        return Ok(ExitCode::SUCCESS);
    }

    clone_repository(gh, &args.address, &base_dir)
        .await
        .with_context(|| format!("Failed to clone {}", args.address))?;

    Ok(ExitCode::SUCCESS)
}

async fn commit<W: Write>(cli: &Cli, config: &Config, out: &mut W) -> Result<ExitCode> {
    let source = MessageSource::from(CommitArgs::parse(cli.args()));
    let flags = cli.ai_flags();

    run_commit(
        source,
        cli.dry_run,
        &RepoDiffSource::new("."),
        &GitCommitter::new(),
        || create_service(&flags, config),
        out,
    )
    .await?;

    Ok(ExitCode::SUCCESS)
}

async fn update<W: Write>(cli: &Cli, out: &mut W) -> Result<ExitCode> {
    if cli.dry_run {
        writeln!(
            out,
            "Dry run: would update from the latest release of {RELEASE_REPO}"
        )?;
        return Ok(ExitCode::SUCCESS);
    }

    Updater::for_current_exe()?
        .run(out)
        .await
        .context("Self-update failed")?;

    Ok(ExitCode::SUCCESS)
}
