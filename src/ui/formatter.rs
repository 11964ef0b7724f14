//! Pure formatting functions for UI output.
//!
//! The styling decision is made once, up front, and carried around in a
//! [`Style`] value instead of living in global state.

use std::io::{self, Write};

use console::style;

use crate::boundary::BoundaryWarning;
use crate::config::PrettyMode;

/// Output styling policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pretty: bool,
}

impl Style {
    pub fn new(pretty: bool) -> Self {
        Style { pretty }
    }

    /// Resolve the configured mode against the capabilities of stdout
    pub fn detect(mode: PrettyMode) -> Self {
        let supported = console::Term::stdout().features().colors_supported();
        Style::new(mode.enabled(supported))
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Tag names are underlined, or quoted in plain mode
    pub fn tag(&self, name: &str) -> String {
        if self.pretty {
            style(name).underlined().force_styling(true).to_string()
        } else {
            format!("'{}'", name)
        }
    }

    /// Secondary information
    pub fn dim(&self, text: &str) -> String {
        if self.pretty {
            style(text).dim().force_styling(true).to_string()
        } else {
            text.to_string()
        }
    }

    /// Accepted inputs, e.g. `[y/n]`
    pub fn choices(&self, separator: &str, options: &[&str]) -> String {
        format!("[{}]", options.join(separator))
    }

    pub fn error(&self, message: &str) -> String {
        format!("{} {}", self.colored("ERROR:", console::Color::Red), message)
    }

    pub fn warning(&self, message: &str) -> String {
        format!("{} {}", self.colored("! WARNING:", console::Color::Yellow), message)
    }

    pub fn success(&self, message: &str) -> String {
        format!("{} {}", self.colored("✓", console::Color::Green), message)
    }

    fn colored(&self, text: &str, color: console::Color) -> String {
        if self.pretty {
            style(text).fg(color).force_styling(true).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Print a boundary warning.
pub fn display_boundary_warning<W: Write>(
    out: &mut W,
    style: &Style,
    warning: &BoundaryWarning,
) -> io::Result<()> {
    writeln!(out, "{}", style.warning(&warning.to_string()))
}

/// Print the commands that undo or publish a freshly created tag.
pub fn display_tag_instructions<W: Write>(out: &mut W, tag: &str, remote: &str) -> io::Result<()> {
    writeln!(out, "- to push it to remote:  'git push {} {}'", remote, tag)?;
    writeln!(out, "- to undo local changes: 'git tag -d {}'", tag)?;
    writeln!(out)?;
    writeln!(out, "rolling back changes after the push:")?;
    writeln!(out, "- delete local:  'git tag -d {}'", tag)?;
    writeln!(out, "- delete remote: 'git push --delete {} {}'", remote, tag)
}
