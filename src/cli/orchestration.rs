//! Main tagging workflow
//!
//! Reads the repository state, proposes the next versions and applies the
//! chosen tag. Kept apart from argument parsing so it can run against any
//! [`Repository`] and any input/output pair.

use std::io::{BufRead, Write};

use tracing::info;

use crate::analyzer::propose_actions;
use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{
    parse_version, Description, PreReleaseChoice, SemanticVersion, Tag, TagPrefix,
};
use crate::error::{RtagError, Result};
use crate::git::{last_semantic_tag, Repository};
use crate::ui::{display_boundary_warning, display_tag_instructions, Prompter, Style};

/// Options for the tagging workflow
///
/// Built from the configuration file and overridden by command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowOptions {
    pub prefix: TagPrefix,
    pub remote: String,
    pub allow_dirty: bool,
    /// Stop before creating the tag
    pub dry_run: bool,
    /// Only print the repository and version information
    pub info_only: bool,
}

impl WorkflowOptions {
    pub fn from_config(config: &Config) -> Self {
        WorkflowOptions {
            prefix: config.tag.prefix_policy(),
            remote: config.tag.remote.clone(),
            allow_dirty: config.behavior.allow_dirty,
            dry_run: false,
            info_only: false,
        }
    }
}

/// What the workflow ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    /// Information printed, nothing changed
    Reported,
    /// Tag chosen but not created
    DryRun { tag: String },
    /// Tag created locally, and pushed if the user agreed
    Tagged { tag: String, pushed: bool },
}

/// Result of a successful workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Tag the new version was derived from, `None` for a repository without tags
    pub previous_tag: Option<String>,
    pub outcome: WorkflowOutcome,
}

/// Run the interactive tagging workflow
///
/// 1. Print repository info
/// 2. Offer a first tag if the repository has none
/// 3. Refuse dirty working trees unless allowed
/// 4. Derive the current version, falling back to an older semantic tag
/// 5. Let the user pick the next version
/// 6. Create the tag and optionally push it
pub fn run_tag_workflow<Repo, R, W>(
    repo: &Repo,
    ui: &mut Prompter<R, W>,
    style: &Style,
    options: &WorkflowOptions,
) -> Result<WorkflowResult>
where
    Repo: Repository + ?Sized,
    R: BufRead,
    W: Write,
{
    let stats = repo.stats()?;
    writeln!(ui, "repo info:")?;
    writeln!(
        ui,
        "- branch:       {}",
        stats.branch.as_deref().unwrap_or("(detached HEAD)")
    )?;
    writeln!(ui, "- author date:  {}", stats.author_date)?;
    writeln!(ui, "- hash:         {}", stats.hash)?;

    let describe = match repo.describe_head() {
        Ok(text) => text,
        Err(RtagError::NoTags) => return tag_first_version(repo, ui, style, options),
        Err(e) => return Err(e),
    };

    if stats.dirty && !options.info_only {
        if !options.allow_dirty {
            return Err(RtagError::DirtyWorktree);
        }
        display_boundary_warning(ui, style, &BoundaryWarning::DirtyWorktree)?;
    }

    let description = Description::parse(&describe)?;
    let (previous_tag, version_info) = match parse_version(&description) {
        Ok(version_info) => (description.tag.clone(), version_info),
        Err(RtagError::VersionParse { raw }) => {
            let (fallback, version_info) = match last_semantic_tag(repo) {
                Ok(found) => found,
                Err(RtagError::NoSemanticTag) => return Err(RtagError::VersionParse { raw }),
                Err(e) => return Err(e),
            };
            writeln!(ui)?;
            display_boundary_warning(
                ui,
                style,
                &BoundaryWarning::NonSemanticTag {
                    tag: raw,
                    fallback: fallback.clone(),
                },
            )?;
            ui.confirm(&format!(
                "proceed with '{}' as base {}? ",
                fallback,
                style.choices("/", &["y", "n"])
            ))?;
            (fallback, version_info)
        }
        Err(e) => return Err(e),
    };
    info!(tag = %previous_tag, version = %version_info.semantic, "current version");

    let prefix = options.prefix.resolve(Some(&Tag::new(previous_tag.as_str())));
    writeln!(ui, "- last tag:     {}", previous_tag)?;
    if options.prefix == TagPrefix::Auto {
        if prefix.is_empty() {
            writeln!(ui, "- auto prefix:  no")?;
        } else {
            writeln!(ui, "- auto prefix:  with {:?}", prefix)?;
        }
    }
    if version_info.additional_commits > 0 {
        writeln!(
            ui,
            "- additional commits: {}",
            version_info.additional_commits
        )?;
    }
    writeln!(ui, "- semantic ver: {}", version_info.semantic)?;
    match version_info.quad() {
        Ok(quad) => writeln!(ui, "- version quad: {}", quad)?,
        Err(e) => writeln!(ui, "- version quad: n/a ({})", e)?,
    }
    writeln!(ui)?;

    if options.info_only {
        return Ok(WorkflowResult {
            previous_tag: Some(previous_tag),
            outcome: WorkflowOutcome::Reported,
        });
    }

    if version_info.additional_commits == 0 {
        display_boundary_warning(
            ui,
            style,
            &BoundaryWarning::AlreadyTagged {
                tag: previous_tag.clone(),
            },
        )?;
        ui.confirm(&format!(
            "still want to proceed {}? ",
            style.choices("/", &["y", "n"])
        ))?;
    }

    let new_version = choose_next_version(ui, style, &prefix, &version_info.semantic)?;
    let tag = Tag::for_version(&prefix, &new_version);

    writeln!(ui)?;
    writeln!(
        ui,
        "ready to update tag {}->{} {}:",
        style.tag(&previous_tag),
        style.tag(&tag.name),
        style.dim(&format!("(with comment '{}')", tag.message()))
    )?;
    publish(repo, ui, style, options, Some(previous_tag), tag)
}

fn choose_next_version<R: BufRead, W: Write>(
    ui: &mut Prompter<R, W>,
    style: &Style,
    prefix: &str,
    current: &SemanticVersion,
) -> Result<SemanticVersion> {
    let actions = propose_actions(current);
    if actions.is_empty() {
        return Err(RtagError::VersionNumberTooLarge);
    }

    writeln!(ui, "available actions:")?;
    for (i, action) in actions.iter().enumerate() {
        let annotation = action
            .annotation()
            .map(|a| format!(" {}", style.dim(&format!("({})", a))))
            .unwrap_or_default();
        let continuation = if action.needs_pre_release_choice() {
            " ..."
        } else {
            ""
        };
        writeln!(
            ui,
            "{}: {} {}{}{}",
            i + 1,
            action.label(),
            style.tag(&Tag::for_version(prefix, action.candidate()).name),
            annotation,
            continuation
        )?;
    }

    let last = actions.len().to_string();
    let choice = ui.choose_number(
        &format!(
            "make a choice: type a number {}: ",
            style.choices("...", &["1", last.as_str()])
        ),
        actions.len(),
    )?;
    let action = &actions[choice - 1];

    if !action.needs_pre_release_choice() {
        return Ok(action.candidate().clone());
    }

    writeln!(ui)?;
    writeln!(ui, "select (pre-)release type")?;
    for option in PreReleaseChoice::ALL {
        let name = format!("'{}'", option);
        let tag = Tag::for_version(prefix, &option.apply(action.candidate()));
        writeln!(ui, "- {:<9} for {}", name, style.tag(&tag.name))?;
    }
    let keywords: Vec<&str> = PreReleaseChoice::ALL.iter().map(|c| c.keyword()).collect();
    let pre_release =
        ui.choose_pre_release(&format!("type {}: ", style.choices("/", &keywords)))?;

    Ok(pre_release.apply(action.candidate()))
}

fn tag_first_version<Repo, R, W>(
    repo: &Repo,
    ui: &mut Prompter<R, W>,
    style: &Style,
    options: &WorkflowOptions,
) -> Result<WorkflowResult>
where
    Repo: Repository + ?Sized,
    R: BufRead,
    W: Write,
{
    let prefix = options.prefix.resolve(None);
    let tag = Tag::for_version(&prefix, &SemanticVersion::new(0, 0, 1));

    writeln!(ui)?;
    display_boundary_warning(
        ui,
        style,
        &BoundaryWarning::NoTags {
            first_tag: tag.name.clone(),
        },
    )?;
    if options.info_only {
        return Ok(WorkflowResult {
            previous_tag: None,
            outcome: WorkflowOutcome::Reported,
        });
    }

    writeln!(ui, "you can assign the first tag manually, for example:")?;
    writeln!(ui)?;
    writeln!(ui, "    git tag -a {} -m \"{}\"", tag.name, tag.message())?;
    writeln!(ui)?;
    writeln!(ui, "or this utility can do it for you")?;
    writeln!(ui)?;
    writeln!(
        ui,
        "ready to create first tag {} {}:",
        style.tag(&tag.name),
        style.dim(&format!("(with comment '{}')", tag.message()))
    )?;
    publish(repo, ui, style, options, None, tag)
}

fn publish<Repo, R, W>(
    repo: &Repo,
    ui: &mut Prompter<R, W>,
    style: &Style,
    options: &WorkflowOptions,
    previous_tag: Option<String>,
    tag: Tag,
) -> Result<WorkflowResult>
where
    Repo: Repository + ?Sized,
    R: BufRead,
    W: Write,
{
    let yes_no = style.choices("/", &["y", "n"]);
    ui.confirm(&format!("proceed {}? ", yes_no))?;

    let message = tag.message();
    if options.dry_run {
        writeln!(
            ui,
            "dry run: would execute 'git tag -a {} -m \"{}\"'",
            tag.name, message
        )?;
        return Ok(WorkflowResult {
            previous_tag,
            outcome: WorkflowOutcome::DryRun { tag: tag.name },
        });
    }

    writeln!(ui)?;
    writeln!(ui, "executing: 'git tag -a {} -m \"{}\"'", tag.name, message)?;
    repo.create_annotated_tag(&tag.name, &message)?;

    writeln!(ui)?;
    writeln!(ui, "your local repo is now tagged as {}", style.tag(&tag.name))?;
    display_tag_instructions(ui, &tag.name, &options.remote)?;
    writeln!(ui)?;
    writeln!(ui, "this utility can push the new tag for you")?;

    let pushed = ui.ask_yes_no(&format!("proceed with push {}? ", yes_no))?;
    if pushed {
        writeln!(ui, "executing: 'git push {} {}'", options.remote, tag.name)?;
        repo.push_tag(&options.remote, &tag.name)?;
        writeln!(ui, "{}", style.success("mission accomplished"))?;
    }

    Ok(WorkflowResult {
        previous_tag,
        outcome: WorkflowOutcome::Tagged {
            tag: tag.name,
            pushed,
        },
    })
}
