//! github-org-sync: mirror every repository of a GitHub organization locally
//!
//! Missing repositories are cloned, existing ones are brought up to date with
//! their default branch, using a bounded number of concurrent git processes.

use anyhow::{Context, Result};
use clap::builder::TypedValueParser;
use clap::{ArgAction, Parser, Subcommand};
use indicatif::MultiProgress;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use github_org_sync::commands::sync::handle_sync_command;
use github_org_sync::core::{
    ensure_git_available, init_logging, prepare_destination, read_token, FilterConfig, LogLevel,
    SyncConfig, DEFAULT_PARALLELISM, GITHUB_API_BASE, GIT_OPERATION_TIMEOUT_SECS,
};
use github_org_sync::git::SystemGit;
use github_org_sync::github::GitHubClient;

#[derive(Parser, Debug)]
#[command(
    name = "github-org-sync",
    version,
    about = "Sync github org repos",
    long_about = "Clone every repository of a GitHub organization that is missing locally and \
                  update the ones that already exist. Requires GITHUB_TOKEN and git on PATH.",
    after_help = "Example: github-org-sync floorpunch -d ~/src/floorpunch -p 8",
    disable_version_flag = true,
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// GitHub organization name
    #[arg(required = true)]
    org: Option<String>,

    /// Destination path for repos
    #[arg(short = 'd', long = "destination-path", default_value = ".")]
    destination_path: PathBuf,

    /// Number of parallel git operations
    #[arg(
        short = 'p',
        long,
        default_value_t = DEFAULT_PARALLELISM,
        value_parser = clap::value_parser!(u16).range(1..).map(usize::from)
    )]
    parallelism: usize,

    /// Include only repos whose name contains this string
    #[arg(long = "include-repos", value_name = "SUBSTR")]
    include_repos: Option<String>,

    /// Exclude repos whose name contains this string
    #[arg(long = "exclude-repos", value_name = "SUBSTR")]
    exclude_repos: Option<String>,

    /// Skip archived repos
    #[arg(long)]
    skip_archived: bool,

    /// Timeout in seconds for each git invocation
    #[arg(long, value_name = "SECS", default_value_t = GIT_OPERATION_TIMEOUT_SECS)]
    timeout: u64,

    /// GitHub API root, for GitHub Enterprise
    #[arg(long, value_name = "URL", default_value = GITHUB_API_BASE)]
    api_url: String,

    /// Show every git invocation
    #[arg(long)]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Print the version number
    Version,
}

fn version_line() -> String {
    format!("github-org-sync version {}", env!("CARGO_PKG_VERSION"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Version) = cli.command {
        println!("{}", version_line());
        return Ok(());
    }
    let org = cli.org.context("organization name is required")?;

    let multi_progress = MultiProgress::new();
    init_logging(&multi_progress, LogLevel::from_flags(cli.verbose, cli.quiet))?;

    // Pre-flight: nothing below touches the network or the destination on failure
    let token = read_token()?;
    ensure_git_available()?;
    let filter = FilterConfig::new(cli.include_repos, cli.exclude_repos, cli.skip_archived)?;
    let config = SyncConfig::new(org, cli.destination_path, filter, cli.parallelism)?
        .with_git_timeout(Duration::from_secs(cli.timeout));
    prepare_destination(&config.dest_root)?;

    let client = GitHubClient::with_base_url(token, cli.api_url)?;
    let runner = Arc::new(SystemGit::new(config.git_timeout));

    // Repository failures are reported in the summary; they do not change the exit code
    handle_sync_command(&config, &client, runner, multi_progress).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["github-org-sync", "acme"]).unwrap();
        assert_eq!(cli.org.as_deref(), Some("acme"));
        assert_eq!(cli.command, None);
        assert_eq!(cli.destination_path, PathBuf::from("."));
        assert_eq!(cli.parallelism, 1);
        assert!(!cli.skip_archived);
        assert_eq!(cli.timeout, GIT_OPERATION_TIMEOUT_SECS);
        assert_eq!(cli.api_url, GITHUB_API_BASE);
    }

    #[test]
    fn test_parallelism_must_be_positive() {
        assert!(Cli::try_parse_from(["github-org-sync", "acme", "-p", "0"]).is_err());
        let cli = Cli::try_parse_from(["github-org-sync", "acme", "-p", "8"]).unwrap();
        assert_eq!(cli.parallelism, 8);
    }

    #[test]
    fn test_org_is_required() {
        assert!(Cli::try_parse_from(["github-org-sync"]).is_err());
    }

    #[test]
    fn test_version_subcommand_needs_no_org() {
        let cli = Cli::try_parse_from(["github-org-sync", "version"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Version));
        assert_eq!(cli.org, None);
        assert_eq!(version_line(), format!("github-org-sync version {}", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_version_subcommand_does_not_mix_with_sync_args() {
        assert!(Cli::try_parse_from(["github-org-sync", "version", "acme"]).is_err());
    }

    #[test]
    fn test_both_filters_parse_but_fail_validation() {
        let cli = Cli::try_parse_from([
            "github-org-sync",
            "acme",
            "--include-repos",
            "foo",
            "--exclude-repos",
            "bar",
        ])
        .unwrap();

        assert!(FilterConfig::new(cli.include_repos, cli.exclude_repos, cli.skip_archived).is_err());
    }
}
