use std::io::Write;
use std::path::PathBuf;

use analysis::summarize;
use clap::{ArgAction, Args, Parser, Subcommand};
use common::{AppError, Result};
use normalizer::table::{read_commits, read_issues, write_commits, write_issues};
use normalizer::Limit;

use crate::service::Miner;
use crate::source::{IssueState, RepoSlug, SharedSource};

#[derive(Debug, Parser)]
#[command(name = "repo-miner")]
#[command(about = "Fetch GitHub commits/issues and summarize them")]
#[command(version)]
pub struct Cli {
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "More log output (-v, -vv)"
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch commits and save to CSV
    FetchCommits(FetchCommitsArgs),
    /// Fetch issues (pull requests excluded) and save to CSV
    FetchIssues(FetchIssuesArgs),
    /// Summarize commits and issues CSV files
    Summarize(SummarizeArgs),
}

#[derive(Debug, Args)]
pub struct FetchCommitsArgs {
    #[arg(long, help = "Repository in owner/repo format")]
    pub repo: String,

    #[arg(
        long = "max",
        allow_negative_numbers = true,
        help = "Max number of commits to fetch"
    )]
    pub max: Option<String>,

    #[arg(long, help = "Path to output commits CSV")]
    pub out: PathBuf,
}

#[derive(Debug, Args)]
pub struct FetchIssuesArgs {
    #[arg(long, help = "Repository in owner/repo format")]
    pub repo: String,

    #[arg(long, value_enum, default_value_t = IssueState::All, help = "Issue state filter")]
    pub state: IssueState,

    #[arg(
        long = "max",
        allow_negative_numbers = true,
        help = "Max number of issues to fetch, pull requests included"
    )]
    pub max: Option<String>,

    #[arg(long, help = "Path to output issues CSV")]
    pub out: PathBuf,
}

#[derive(Debug, Args)]
pub struct SummarizeArgs {
    #[arg(long, help = "Path to commits CSV")]
    pub commits: PathBuf,

    #[arg(long, help = "Path to issues CSV")]
    pub issues: PathBuf,

    #[arg(long, help = "Output as JSON")]
    pub json: bool,
}

/// Runs one sub-command. `connect` is only called by the fetch commands, after
/// their arguments have been validated.
pub async fn run<C, W>(cli: Cli, connect: C, out: &mut W) -> Result<()>
where
    C: FnOnce() -> Result<SharedSource>,
    W: Write,
{
    match cli.command {
        Command::FetchCommits(args) => {
            let repo: RepoSlug = args.repo.parse()?;
            let max = Limit::parse_opt(args.max.as_deref())?;
            let miner = Miner::new(connect()?);
            let rows = miner.fetch_commits(&repo, max).await?;
            write_commits(&args.out, &rows)?;
            writeln!(out, "Saved {} commits to {}", rows.len(), args.out.display())
                .map_err(AppError::io)?;
        }
        Command::FetchIssues(args) => {
            let repo: RepoSlug = args.repo.parse()?;
            let max = Limit::parse_opt(args.max.as_deref())?;
            let miner = Miner::new(connect()?);
            let rows = miner.fetch_issues(&repo, args.state, max).await?;
            write_issues(&args.out, &rows)?;
            writeln!(out, "Saved {} issues to {}", rows.len(), args.out.display())
                .map_err(AppError::io)?;
        }
        Command::Summarize(args) => {
            let commits = read_commits(&args.commits)?;
            let issues = read_issues(&args.issues)?;
            let summary = summarize(&commits, &issues);
            if args.json {
                serde_json::to_writer_pretty(&mut *out, &summary).map_err(AppError::io)?;
                writeln!(out).map_err(AppError::io)?;
            } else {
                summary.render(out).map_err(AppError::io)?;
            }
        }
    }
    Ok(())
}
