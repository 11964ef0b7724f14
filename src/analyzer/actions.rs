use crate::domain::{Identifier, PreReleaseKind, SemanticVersion};

/// Separates the primary label from its annotation in an action description
const ANNOTATION_SEPARATOR: char = '|';

/// A proposed next version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    description: String,
    candidate: SemanticVersion,
    needs_pre_release_choice: bool,
}

impl Action {
    fn new(
        description: impl Into<String>,
        candidate: SemanticVersion,
        needs_pre_release_choice: bool,
    ) -> Self {
        Action {
            description: description.into(),
            candidate,
            needs_pre_release_choice,
        }
    }

    /// Full description, including the annotation if there is one
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Primary label, e.g. "increment patch"
    pub fn label(&self) -> &str {
        self.description
            .split_once(ANNOTATION_SEPARATOR)
            .map_or(self.description.as_str(), |(label, _)| label)
    }

    /// Secondary annotation, e.g. "backwards compatible bug fixes"
    pub fn annotation(&self) -> Option<&str> {
        self.description
            .split_once(ANNOTATION_SEPARATOR)
            .map(|(_, annotation)| annotation)
    }

    /// Version that results from choosing this action
    pub fn candidate(&self) -> &SemanticVersion {
        &self.candidate
    }

    /// True when a release type (alpha/beta/rc/release) still has to be picked
    pub fn needs_pre_release_choice(&self) -> bool {
        self.needs_pre_release_choice
    }
}

/// List the legal next versions for `current`, in menu order
///
/// Build metadata is ignored. Increments that would overflow are left out.
pub fn propose_actions(current: &SemanticVersion) -> Vec<Action> {
    let current = current.without_build();

    match current.pre.first() {
        None => release_actions(&current),
        Some(kind) => pre_release_actions(&current, kind),
    }
}

fn release_actions(current: &SemanticVersion) -> Vec<Action> {
    let increments = [
        (
            "increment patch|backwards compatible bug fixes",
            current.increment_patch(),
        ),
        (
            "increment minor|backwards compatible new functionality",
            current.increment_minor(),
        ),
        (
            "increment major|incompatible API changes",
            current.increment_major(),
        ),
    ];

    increments
        .into_iter()
        .filter_map(|(description, candidate)| {
            candidate
                .ok()
                .map(|candidate| Action::new(description, candidate, true))
        })
        .collect()
}

fn pre_release_actions(current: &SemanticVersion, kind: &Identifier) -> Vec<Action> {
    let iteration = current
        .pre
        .get(1)
        .and_then(Identifier::as_number)
        .unwrap_or(0);
    let upgrade = |to: PreReleaseKind| current.with_pre_release(to.identifier(), 1);

    let kind = PreReleaseKind::of(kind);
    let mut ret = Vec::new();
    if let Some(next) = iteration.checked_add(1) {
        ret.push(Action::new(
            format!("bump '{}'", kind),
            current.with_pre_release(kind.identifier(), next),
            false,
        ));
    }

    match kind {
        // going straight from alpha to release is not offered
        PreReleaseKind::Alpha => {
            ret.push(Action::new(
                "upgrade 'alpha' to 'beta'",
                upgrade(PreReleaseKind::Beta),
                false,
            ));
            ret.push(Action::new(
                "upgrade 'alpha' to 'rc'",
                upgrade(PreReleaseKind::ReleaseCandidate),
                false,
            ));
        }
        PreReleaseKind::Beta => {
            ret.push(Action::new(
                "upgrade 'beta' to 'rc'",
                upgrade(PreReleaseKind::ReleaseCandidate),
                false,
            ));
            ret.push(Action::new(
                "make release",
                current.without_pre_release(),
                false,
            ));
        }
        PreReleaseKind::ReleaseCandidate => {
            ret.push(Action::new(
                "make release",
                current.without_pre_release(),
                false,
            ));
        }
        PreReleaseKind::Other(_) => {}
    }

    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::version::MAX_COMPONENT;
    use crate::domain::PreReleaseChoice;

    fn candidates(text: &str) -> Vec<String> {
        propose_actions(&SemanticVersion::parse(text).unwrap())
            .iter()
            .map(|a| a.candidate().to_string())
            .collect()
    }

    #[test]
    fn test_release_state() {
        let actions = propose_actions(&SemanticVersion::parse("1.2.3").unwrap());
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0].candidate().to_string(), "1.2.4");
        assert_eq!(actions[1].candidate().to_string(), "1.3.0");
        assert_eq!(actions[2].candidate().to_string(), "2.0.0");
        assert!(actions.iter().all(Action::needs_pre_release_choice));
    }

    #[test]
    fn test_release_labels_and_annotations() {
        let actions = propose_actions(&SemanticVersion::parse("0.1.0").unwrap());
        let labels: Vec<_> = actions.iter().map(|a| a.label()).collect();
        assert_eq!(
            labels,
            ["increment patch", "increment minor", "increment major"]
        );
        assert_eq!(
            actions[0].annotation(),
            Some("backwards compatible bug fixes")
        );
        assert_eq!(
            actions[1].annotation(),
            Some("backwards compatible new functionality")
        );
        assert_eq!(actions[2].annotation(), Some("incompatible API changes"));
    }

    #[test]
    fn test_build_metadata_is_ignored() {
        assert_eq!(candidates("1.2.3+15.linux"), ["1.2.4", "1.3.0", "2.0.0"]);
        assert_eq!(candidates("1.2.3-rc.1+4"), ["1.2.3-rc.2", "1.2.3"]);
    }

    #[test]
    fn test_release_state_skips_overflowing_increments() {
        let v = SemanticVersion::new(MAX_COMPONENT, 0, MAX_COMPONENT);
        let actions = propose_actions(&v);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].label(), "increment minor");
    }

    #[test]
    fn test_pre_release_state_skips_overflowing_bump() {
        assert_eq!(candidates("1.0.0-rc.18446744073709551615"), ["1.0.0"]);
        assert!(candidates("1.0.0-beta.18446744073709551615")
            .iter()
            .all(|c| c != "1.0.0-beta.18446744073709551615"));
        assert!(candidates("1.0.0-4.18446744073709551615").is_empty());
    }

    #[test]
    fn test_alpha_state() {
        let actions = propose_actions(&SemanticVersion::parse("1.2.3-alpha.2").unwrap());
        let got: Vec<_> = actions
            .iter()
            .map(|a| (a.description(), a.candidate().to_string()))
            .collect();
        assert_eq!(
            got,
            [
                ("bump 'alpha'", "1.2.3-alpha.3".to_string()),
                ("upgrade 'alpha' to 'beta'", "1.2.3-beta.1".to_string()),
                ("upgrade 'alpha' to 'rc'", "1.2.3-rc.1".to_string()),
            ]
        );
        assert!(actions.iter().all(|a| !a.needs_pre_release_choice()));
        assert!(actions.iter().all(|a| a.annotation().is_none()));
    }

    #[test]
    fn test_beta_state() {
        assert_eq!(
            candidates("1.2.3-beta.4"),
            ["1.2.3-beta.5", "1.2.3-rc.1", "1.2.3"]
        );
    }

    #[test]
    fn test_rc_state() {
        let actions = propose_actions(&SemanticVersion::parse("1.2.3-rc.1").unwrap());
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].candidate().to_string(), "1.2.3-rc.2");
        assert_eq!(actions[1].description(), "make release");
        assert_eq!(actions[1].candidate().to_string(), "1.2.3");
    }

    #[test]
    fn test_missing_iteration_starts_at_one() {
        assert_eq!(
            candidates("1.0.0-alpha"),
            ["1.0.0-alpha.1", "1.0.0-beta.1", "1.0.0-rc.1"]
        );
        assert_eq!(candidates("1.0.0-rc.final"), ["1.0.0-rc.1", "1.0.0"]);
    }

    #[test]
    fn test_unknown_kind_is_bump_only() {
        let actions = propose_actions(&SemanticVersion::parse("3.0.0-dev.7").unwrap());
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].description(), "bump 'dev'");
        assert_eq!(actions[0].candidate().to_string(), "3.0.0-dev.8");

        assert_eq!(candidates("1.0.0-a.1"), ["1.0.0-a.2"]);
    }

    #[test]
    fn test_numeric_kind_is_bump_only() {
        assert_eq!(candidates("1.0.0-4"), ["1.0.0-4.1"]);
    }

    #[test]
    fn test_candidates_round_trip_through_text() {
        for start in ["0.0.1", "1.2.3-alpha.2", "1.2.3-beta", "9.9.9-rc.3+7"] {
            for action in propose_actions(&SemanticVersion::parse(start).unwrap()) {
                let mut finals = vec![action.candidate().clone()];
                if action.needs_pre_release_choice() {
                    finals = PreReleaseChoice::ALL
                        .iter()
                        .map(|c| c.apply(action.candidate()))
                        .collect();
                }
                for v in finals {
                    assert_eq!(SemanticVersion::parse(&v.to_string()).unwrap(), v);
                }
            }
        }
    }
}
