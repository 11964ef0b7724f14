use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use rtag::cli::{run_tag_workflow, WorkflowOptions, WorkflowOutcome};
use rtag::config::{self, PrettyMode};
use rtag::domain::TagPrefix;
use rtag::git::Git2Repository;
use rtag::ui::{Prompter, Style};
use rtag::RtagError;

#[derive(clap::Parser)]
#[command(
    name = "rtag",
    version,
    about = "rtag is a git tag management utility that helps making consistent release tags"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Prefix for new tags (detected from the last tag by default)")]
    prefix: Option<String>,

    #[arg(short, long, help = "Remote to push the new tag to")]
    remote: Option<String>,

    #[arg(long, help = "Allow tagging of repos that contain uncommitted changes")]
    allow_dirty: bool,

    #[arg(short, long, help = "Answer yes to every confirmation prompt")]
    yes: bool,

    #[arg(long, help = "Preview the new tag without creating it")]
    dry_run: bool,

    #[arg(long, help = "Show repository and version information and exit")]
    info: bool,

    #[arg(long, help = "Never use styled output")]
    plain: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = config::load_config(args.config.as_deref())
        .context("failed to load configuration")?;
    if args.prefix.is_some() {
        config.tag.prefix = args.prefix;
    }
    if let Some(remote) = args.remote {
        config.tag.remote = remote;
    }
    config.behavior.allow_dirty |= args.allow_dirty;
    config.behavior.assume_yes |= args.yes;
    if args.plain {
        config.behavior.pretty = PrettyMode::Never;
    }

    let style = Style::detect(config.behavior.pretty);

    let options = WorkflowOptions {
        dry_run: args.dry_run,
        info_only: args.info,
        ..WorkflowOptions::from_config(&config)
    };
    tracing::debug!(
        pretty = style.is_pretty(),
        auto_prefix = options.prefix == TagPrefix::Auto,
        remote = %options.remote,
        "workflow options"
    );

    let repo = Git2Repository::open(".").context("dir is outside of git worktree")?;

    let stdin = io::stdin();
    let mut ui = Prompter::new(stdin.lock(), io::stdout(), config.behavior.assume_yes);

    match run_tag_workflow(&repo, &mut ui, &style, &options) {
        Ok(result) => {
            if let WorkflowOutcome::Tagged { pushed: false, .. } = result.outcome {
                tracing::info!("tag was not pushed");
            }
            Ok(())
        }
        Err(RtagError::Cancelled) => {
            eprintln!("exiting");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{}", style.error(&e.to_string()));
            std::process::exit(1);
        }
    }
}
