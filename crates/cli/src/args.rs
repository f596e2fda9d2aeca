// Command-line arguments

use clap::{Args, Parser, Subcommand, ValueEnum};
use mobydick_core::application::worker::constants::DEFAULT_CONCURRENCY;
use std::path::PathBuf;

pub const DEFAULT_WORKFLOW_FILE: &str = "mobydick.yaml";
pub const DEFAULT_WORKFLOW_VERSION: &str = "v1.0.0";

#[derive(Parser, Debug)]
#[command(name = "action")]
#[command(about = "Command-line interface to manage this GitHub Action.", long_about = None)]
pub struct Cli {
    /// Name of organisation in GitHub (required by `distribute`).
    #[arg(long, env = "MOBYDICK_ORGANISATION")]
    pub organisation: Option<String>,

    /// Token used for authenticating with GitHub (required by `distribute`).
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub REST API URL (for GitHub Enterprise Server)
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Distribute this GitHub Action to all repositories in the organisation.
    Distribute(DistributeArgs),

    /// Check that every Dockerfile in a directory tree uses versioned base images.
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
pub struct DistributeArgs {
    /// Number of repositories processed in parallel.
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Workflow template to render and distribute.
    #[arg(long, default_value = DEFAULT_WORKFLOW_FILE)]
    pub file: PathBuf,

    /// Version of this GitHub Action referenced by the workflow.
    #[arg(long = "version", default_value = DEFAULT_WORKFLOW_VERSION)]
    pub workflow_version: String,

    /// Only distribute GitHub Action to private repositories.
    #[arg(long)]
    pub private: bool,

    /// Preview the target repositories without committing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Format of the final report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Directory searched recursively for Dockerfiles.
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Format of the final report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
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
    fn test_distribute_defaults() {
        let cli = Cli::try_parse_from([
            "action",
            "--organisation=pequod",
            "--token=secret",
            "distribute",
        ])
        .unwrap();

        assert_eq!(cli.organisation.as_deref(), Some("pequod"));
        assert_eq!(cli.token.as_deref(), Some("secret"));
        let Commands::Distribute(args) = cli.command else {
            panic!("expected distribute");
        };
        assert_eq!(args.concurrency, 5);
        assert_eq!(args.file, PathBuf::from("mobydick.yaml"));
        assert_eq!(args.workflow_version, "v1.0.0");
        assert!(!args.private);
        assert!(!args.dry_run);
        assert_eq!(args.output, OutputFormat::Table);
    }

    #[test]
    fn test_distribute_flags() {
        let cli = Cli::try_parse_from([
            "action",
            "--organisation=pequod",
            "--token=secret",
            "distribute",
            "--concurrency=12",
            "--file=workflows/whale.yml",
            "--version=v2.1.0",
            "--private",
            "--dry-run",
            "--output=json",
        ])
        .unwrap();

        let Commands::Distribute(args) = cli.command else {
            panic!("expected distribute");
        };
        assert_eq!(args.concurrency, 12);
        assert_eq!(args.file, PathBuf::from("workflows/whale.yml"));
        assert_eq!(args.workflow_version, "v2.1.0");
        assert!(args.private);
        assert!(args.dry_run);
        assert_eq!(args.output, OutputFormat::Json);
    }

    #[test]
    fn test_subcommand_is_required() {
        let result = Cli::try_parse_from(["action", "--organisation=pequod", "--token=secret"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_defaults() {
        let cli = Cli::try_parse_from(["action", "validate"]).unwrap();

        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.path, PathBuf::from("."));
        assert_eq!(args.output, OutputFormat::Table);
    }

    #[test]
    fn test_validate_flags() {
        let cli =
            Cli::try_parse_from(["action", "validate", "--path=services", "--output=json"]).unwrap();

        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.path, PathBuf::from("services"));
        assert_eq!(args.output, OutputFormat::Json);
    }
}
