use std::process;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use semver_next::calculator::VersionCalculator;
use semver_next::classifier::Classifier;
use semver_next::config;
use semver_next::engine::{self, Action, Options};
use semver_next::git::{GitRepository, TagMode};
use semver_next::output::VersionInfo;
use semver_next::ui;

#[derive(Parser)]
#[command(
    name = "semver-next",
    version,
    about = "Compute the next semantic version from conventional commits"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Next version, derived from the commits since the last tag
    #[command(visible_alias = "n")]
    Next,

    /// New major version
    Major,

    /// New minor version
    #[command(visible_alias = "m")]
    Minor,

    /// New patch version
    #[command(visible_alias = "p")]
    Patch,

    /// Print the current version
    #[command(visible_alias = "c")]
    Current,

    /// Next pre-release version
    #[command(name = "prerelease", visible_alias = "pr")]
    PreRelease,
}

impl Command {
    fn action(&self) -> Action {
        match self {
            Command::Next => Action::Next,
            Command::Major => Action::Major,
            Command::Minor => Action::Minor,
            Command::Patch => Action::Patch,
            Command::Current => Action::Current,
            Command::PreRelease => Action::PreRelease,
        }
    }
}

#[derive(Args)]
struct CommonArgs {
    #[arg(short, long, global = true, default_value = ".", help = "Git repository path")]
    path: String,

    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, global = true, help = "Ignore tags that do not match the glob pattern")]
    pattern: Option<String>,

    #[arg(long, global = true, default_value = "v", help = "Version tag prefix")]
    prefix: String,

    #[arg(
        long = "pre-release",
        global = true,
        help = "Pre-release suffix, e.g. 'beta' or 'alpha.1'"
    )]
    pre_release: Option<String>,

    #[arg(long, global = true, help = "Build metadata to append to the version")]
    metadata: Option<String>,

    #[arg(
        long,
        global = true,
        default_value_t = TagMode::CurrentBranch,
        help = "Which tags are considered: current-branch or all-branches"
    )]
    tag_mode: TagMode,

    #[arg(
        short,
        long,
        global = true,
        value_name = "PATH",
        help = "Only count commits that changed files under these paths"
    )]
    directory: Vec<String>,

    #[arg(
        long,
        global = true,
        help = "If no commit would bump the version, bump patch anyway"
    )]
    always: bool,

    #[arg(
        long,
        global = true,
        help = "Prevent major bumps while the current version is still 0.x"
    )]
    keep_v0: bool,

    #[arg(long, global = true, help = "Print the version as JSON")]
    json: bool,
}

fn main() {
    // Diagnostics go to stderr so pipeline consumers of stdout only ever see
    // the version itself.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run() {
        ui::display_error(&e.to_string());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = config::load_config(cli.common.config.as_deref())?;
    let classifier = Classifier::new(&config.commit_types)?;
    let calculator = VersionCalculator::new(classifier);
    let repo = GitRepository::open(&cli.common.path)?;

    let opts = Options {
        action: cli.command.action(),
        prefix: cli.common.prefix,
        pattern: cli.common.pattern,
        prerelease: cli.common.pre_release,
        metadata: cli.common.metadata,
        tag_mode: cli.common.tag_mode,
        paths: cli.common.directory,
        always: cli.common.always,
        keep_v0: cli.common.keep_v0,
    };

    let version = engine::evaluate(&repo, &calculator, &opts)?;

    if cli.common.json {
        let info = VersionInfo::new(&version, &opts.prefix);
        println!("{}", serde_json::to_string(&info)?);
    } else {
        println!("{}{}", opts.prefix, version);
    }

    Ok(())
}
