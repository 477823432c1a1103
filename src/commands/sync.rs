//! Organization sync command implementation
//!
//! Lists the organization once, decides an action for every repository on the
//! dispatching task, then runs clones and updates as independent workers gated
//! by a fixed-size slot pool. A worker's failure only ever shows up in its own
//! outcome; the run as a whole succeeds once every worker has finished.

use anyhow::{Context, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use indicatif::{MultiProgress, ProgressBar};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

use crate::core::{
    create_processing_context, prefilter, select_action, set_terminal_title,
    set_terminal_title_and_flush, Action, RepoOutcome, SkipReason, SyncConfig, SyncStatistics,
    LISTING_MESSAGE, NO_REPOS_MESSAGE,
};
use crate::git::{probe_path, GitError, GitExecutor, GitRunner, Status};
use crate::github::{RepoLister, RepositoryDescriptor};

const NO_DEFAULT_BRANCH_MESSAGE: &str = "no default branch, nothing to update";

/// One repository's resolved work, owned by the worker that executes it
#[derive(Debug, Clone)]
pub struct ReconciliationTask {
    pub descriptor: RepositoryDescriptor,
    pub action: Action,
    pub path: PathBuf,
}

/// Everything a finished run knows about its repositories
#[derive(Debug, Default)]
pub struct SyncReport {
    pub outcomes: Vec<RepoOutcome>,
    pub statistics: SyncStatistics,
}

impl SyncReport {
    pub fn outcome(&self, name: &str) -> Option<&RepoOutcome> {
        self.outcomes.iter().find(|outcome| outcome.name == name)
    }

    pub fn action_for(&self, name: &str) -> Option<Action> {
        self.outcome(name).and_then(|outcome| outcome.action)
    }
}

/// Handles the sync command: list, reconcile, summarize.
///
/// Only a listing failure is returned as an error; repository failures are
/// reported in the summary and the returned report.
pub async fn handle_sync_command(
    config: &SyncConfig,
    lister: &dyn RepoLister,
    runner: Arc<dyn GitRunner>,
    multi_progress: MultiProgress,
) -> Result<SyncReport> {
    set_terminal_title("🚀 github-org-sync");

    tracing::info!("{LISTING_MESSAGE}");
    let repos = lister
        .list_org_repositories(&config.org)
        .await
        .with_context(|| format!("failed to list repositories of {}", config.org))?;

    if repos.is_empty() {
        println!("{NO_REPOS_MESSAGE}");
        set_terminal_title_and_flush("✅ github-org-sync");
        return Ok(SyncReport::default());
    }

    let repo_word = if repos.len() == 1 {
        "repository"
    } else {
        "repositories"
    };
    tracing::info!(
        "🚀 Syncing {} {} from {} into {} ({} concurrent)",
        repos.len(),
        repo_word,
        config.org,
        config.dest_root.display(),
        config.parallelism
    );

    let start_time = Instant::now();
    let report = run(&repos, config, runner, multi_progress).await?;

    println!("{}", report.statistics.generate_summary(start_time.elapsed()));
    let detailed_summary = report.statistics.generate_detailed_summary();
    if !detailed_summary.is_empty() {
        println!("\n{}", "━".repeat(70));
        println!("{detailed_summary}");
        println!("{}", "━".repeat(70));
    }

    set_terminal_title_and_flush("✅ github-org-sync");
    Ok(report)
}

/// Reconciles every descriptor against `config.dest_root`.
///
/// Returns after all dispatched workers have finished. At most
/// `config.parallelism` git processes run at any time, probing included.
pub async fn run(
    descriptors: &[RepositoryDescriptor],
    config: &SyncConfig,
    runner: Arc<dyn GitRunner>,
    multi_progress: MultiProgress,
) -> Result<SyncReport> {
    let context =
        create_processing_context(&multi_progress, descriptors.len(), config.parallelism)?;
    let progress_bar = context.progress_bar.clone();

    let mut report = SyncReport::default();
    let mut workers = FuturesUnordered::new();

    for repo in descriptors {
        let path = config.repo_path(&repo.name);
        let action =
            match resolve_action(repo, &path, config, runner.as_ref(), &context.semaphore).await {
                Ok(action) => action,
                Err(e) => {
                    tracing::error!(repo = %repo.name, "Repo {} could not be inspected: {e:#}", repo.name);
                    let outcome = unresolved_outcome(repo, &path, format!("{e:#}"));
                    finish_progress(&progress_bar, &outcome);
                    report.statistics.update(&outcome);
                    report.outcomes.push(outcome);
                    continue;
                }
            };

        if let Action::Skip(reason) = action {
            log_skip(&repo.name, reason);
            let outcome = skipped_outcome(repo, &path, reason);
            finish_progress(&progress_bar, &outcome);
            report.statistics.update(&outcome);
            report.outcomes.push(outcome);
            continue;
        }

        let task = ReconciliationTask {
            descriptor: repo.clone(),
            action,
            path,
        };
        let name = task.descriptor.name.clone();
        let path_display = task.path.display().to_string();
        let handle = tokio::spawn(process_repository(
            task,
            Arc::clone(&context.semaphore),
            Arc::clone(&runner),
            progress_bar.clone(),
        ));

        workers.push(async move {
            match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(repo = %name, "worker aborted: {e}");
                    RepoOutcome {
                        name,
                        path: path_display,
                        action: Some(action),
                        status: Status::Error,
                        message: format!("worker aborted: {e}"),
                        stashed: false,
                    }
                }
            }
        });
    }

    // Completion barrier
    while let Some(outcome) = workers.next().await {
        report.statistics.update(&outcome);
        progress_bar.set_message(report.statistics.progress_message());
        report.outcomes.push(outcome);
    }

    progress_bar.finish_and_clear();
    Ok(report)
}

/// Descriptor filters first, then a probe of the local copy, then the selector.
///
/// Probing runs git, so it holds a slot like any other git work. An error
/// means the local state is unknown and nothing should be attempted.
async fn resolve_action(
    repo: &RepositoryDescriptor,
    path: &Path,
    config: &SyncConfig,
    runner: &dyn GitRunner,
    semaphore: &Semaphore,
) -> Result<Action> {
    if let Some(reason) = prefilter(repo, &config.filter) {
        return Ok(Action::Skip(reason));
    }

    let state = {
        let _permit = semaphore.acquire().await.context("slot pool closed")?;
        probe_path(runner, path)
            .await
            .context("could not inspect local copy")?
    };
    Ok(select_action(repo, state, &config.filter))
}

fn log_skip(name: &str, reason: SkipReason) {
    match reason {
        SkipReason::NoPullPermission => {
            tracing::warn!(repo = %name, "Not including {name} since you don't have pull permission")
        }
        SkipReason::Archived => {
            tracing::info!(repo = %name, "Not including {name} since you asked to skip archived repos")
        }
        SkipReason::EmptyRepo => {
            tracing::info!(repo = %name, "{name} is empty, skipping update")
        }
        SkipReason::NotIncluded | SkipReason::Excluded => {
            tracing::debug!(repo = %name, "Not including {name}: {reason}")
        }
    }
}

fn skipped_outcome(repo: &RepositoryDescriptor, path: &Path, reason: SkipReason) -> RepoOutcome {
    let status = if reason.is_warning() {
        Status::NoPermission
    } else {
        Status::Skip
    };
    RepoOutcome {
        name: repo.name.clone(),
        path: path.display().to_string(),
        action: Some(Action::Skip(reason)),
        status,
        message: reason.message().to_string(),
        stashed: false,
    }
}

fn unresolved_outcome(repo: &RepositoryDescriptor, path: &Path, message: String) -> RepoOutcome {
    RepoOutcome {
        name: repo.name.clone(),
        path: path.display().to_string(),
        action: None,
        status: Status::Error,
        message,
        stashed: false,
    }
}

fn finish_progress(progress_bar: &ProgressBar, outcome: &RepoOutcome) {
    progress_bar.inc(1);
    progress_bar.set_message(format!(
        "{} {} {}",
        outcome.status.symbol(),
        outcome.name,
        outcome.status.text()
    ));
}

/// Worker body: take a slot, do the work, give the slot back, report.
async fn process_repository(
    task: ReconciliationTask,
    semaphore: Arc<Semaphore>,
    runner: Arc<dyn GitRunner>,
    progress_bar: ProgressBar,
) -> RepoOutcome {
    let outcome = match semaphore.acquire_owned().await {
        Ok(permit) => {
            let executor = GitExecutor::new(runner.as_ref());
            let outcome = execute_task(&task, executor).await;
            drop(permit);
            outcome
        }
        Err(e) => failed_outcome(&task, format!("semaphore error: {e}"), false),
    };

    finish_progress(&progress_bar, &outcome);
    outcome
}

async fn execute_task(task: &ReconciliationTask, executor: GitExecutor<'_>) -> RepoOutcome {
    match task.action {
        Action::Clone => clone_repository(task, executor).await,
        Action::Update { needs_stash } => update_repository(task, executor, needs_stash).await,
        Action::Skip(reason) => skipped_outcome(&task.descriptor, &task.path, reason),
    }
}

async fn clone_repository(task: &ReconciliationTask, executor: GitExecutor<'_>) -> RepoOutcome {
    let name = &task.descriptor.name;
    let existed_before = task.path.exists();

    tracing::info!(repo = %name, "Cloning repo {name} to {}", task.path.display());
    match executor.clone_repo(&task.descriptor.clone_url, &task.path).await {
        Ok(()) => success_outcome(task, Status::Cloned, "cloned".to_string(), false),
        Err(e) => {
            tracing::error!(repo = %name, op = %e.op, "Repo {name} failed to clone: {}", e.message);
            // Only remove what this clone created
            if !existed_before && task.path.exists() {
                if let Err(rm) = std::fs::remove_dir_all(&task.path) {
                    tracing::warn!(
                        repo = %name,
                        "could not remove partial clone at {}: {rm}",
                        task.path.display()
                    );
                }
            }
            failed_outcome(task, e.to_string(), false)
        }
    }
}

async fn update_repository(
    task: &ReconciliationTask,
    executor: GitExecutor<'_>,
    needs_stash: bool,
) -> RepoOutcome {
    let name = &task.descriptor.name;

    let Some(branch) = task.descriptor.default_branch.as_deref() else {
        tracing::info!(repo = %name, "Repo {name} has no default branch, skipping update");
        return success_outcome(task, Status::Skip, NO_DEFAULT_BRANCH_MESSAGE.to_string(), false);
    };

    let mut stashed = false;
    if needs_stash {
        tracing::info!(repo = %name, "{name} is dirty, so stashing first");
        if let Err(e) = executor.stash(&task.path).await {
            tracing::error!(repo = %name, op = %e.op, "Repo {name} is dirty but failed to stash: {}", e.message);
            return failed_outcome(task, e.to_string(), false);
        }
        stashed = true;
    }

    tracing::info!(repo = %name, "Updating repo {}", task.path.display());
    match fast_forward(executor, &task.path, branch).await {
        Ok(()) => {
            let message = if stashed {
                format!("{branch} updated (local changes stashed)")
            } else {
                format!("{branch} updated")
            };
            success_outcome(task, Status::Updated, message, stashed)
        }
        Err(e) => {
            tracing::error!(repo = %name, op = %e.op, "Repo {name} failed to update: {}", e.message);
            failed_outcome(task, e.to_string(), stashed)
        }
    }
}

/// fetch origin → checkout default branch → pull --rebase; stops at the first failure
async fn fast_forward(executor: GitExecutor<'_>, path: &Path, branch: &str) -> Result<(), GitError> {
    executor.fetch_origin(path).await?;
    executor.checkout_default_branch(path, branch).await?;
    executor.pull_rebase(path).await
}

fn success_outcome(
    task: &ReconciliationTask,
    status: Status,
    message: String,
    stashed: bool,
) -> RepoOutcome {
    RepoOutcome {
        name: task.descriptor.name.clone(),
        path: task.path.display().to_string(),
        action: Some(task.action),
        status,
        message,
        stashed,
    }
}

fn failed_outcome(task: &ReconciliationTask, message: String, stashed: bool) -> RepoOutcome {
    RepoOutcome {
        name: task.descriptor.name.clone(),
        path: task.path.display().to_string(),
        action: Some(task.action),
        status: Status::Error,
        message,
        stashed,
    }
}
