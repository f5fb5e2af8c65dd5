use crate::recognition::domain::matcher::MatchResult;

/// Tagging decision for one file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Existing tags in their original order, followed by `newly_added`.
    pub tags_to_write: Vec<String>,
    /// Identified names not yet tagged, in first-observed order.
    pub newly_added: Vec<String>,
    /// Identified names the file already carries.
    pub already_tagged: Vec<String>,
    pub unknown_count: usize,
}

impl Reconciliation {
    pub fn needs_write(&self) -> bool {
        !self.newly_added.is_empty()
    }

    pub fn identified_count(&self) -> usize {
        self.newly_added.len() + self.already_tagged.len()
    }
}

/// Merges the identities matched in a file into its existing tags.
///
/// Existing tags are never removed or reordered. Several faces of the same
/// person collapse to one name; comparison is case-sensitive.
pub fn reconcile(existing_tags: &[String], match_results: &[MatchResult]) -> Reconciliation {
    let mut result = Reconciliation {
        tags_to_write: existing_tags.to_vec(),
        ..Reconciliation::default()
    };

    for match_result in match_results {
        let Some(name) = match_result.name() else {
            result.unknown_count += 1;
            continue;
        };
        if result.newly_added.iter().any(|n| n == name)
            || result.already_tagged.iter().any(|n| n == name)
        {
            continue;
        }
        if existing_tags.iter().any(|t| t == name) {
            result.already_tagged.push(name.to_string());
        } else {
            result.newly_added.push(name.to_string());
            result.tags_to_write.push(name.to_string());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn identified(name: &str) -> MatchResult {
        MatchResult::Identified {
            name: name.to_string(),
            distance: 0.3,
        }
    }

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_mixed_results() {
        let results = [
            identified("Alice"),
            identified("Bob"),
            MatchResult::Unknown,
            MatchResult::Unknown,
        ];
        let r = reconcile(&tags(&["Alice"]), &results);
        assert_eq!(r.tags_to_write, tags(&["Alice", "Bob"]));
        assert_eq!(r.newly_added, tags(&["Bob"]));
        assert_eq!(r.already_tagged, tags(&["Alice"]));
        assert_eq!(r.unknown_count, 2);
        assert_eq!(r.identified_count(), 2);
        assert!(r.needs_write());
    }

    #[rstest]
    #[case::no_tags(&[])]
    #[case::some_tags(&["Holiday", "Alice"])]
    fn test_no_results_keeps_existing(#[case] existing: &[&str]) {
        let r = reconcile(&tags(existing), &[]);
        assert_eq!(r.tags_to_write, tags(existing));
        assert!(r.newly_added.is_empty());
        assert!(r.already_tagged.is_empty());
        assert_eq!(r.unknown_count, 0);
        assert!(!r.needs_write());
    }

    #[test]
    fn test_same_person_twice_adds_one_tag() {
        let r = reconcile(&[], &[identified("Bob"), identified("Bob")]);
        assert_eq!(r.newly_added, tags(&["Bob"]));
        assert_eq!(r.tags_to_write, tags(&["Bob"]));
    }

    #[test]
    fn test_already_tagged_reported_once() {
        let r = reconcile(&tags(&["Alice"]), &[identified("Alice"), identified("Alice")]);
        assert_eq!(r.already_tagged, tags(&["Alice"]));
        assert!(!r.needs_write());
    }

    #[test]
    fn test_is_idempotent() {
        let results = [identified("Carol"), MatchResult::Unknown, identified("Dave")];
        let first = reconcile(&tags(&["Trip"]), &results);
        let second = reconcile(&first.tags_to_write, &results);
        assert!(second.newly_added.is_empty());
        assert_eq!(second.tags_to_write, first.tags_to_write);
        assert_eq!(second.already_tagged, tags(&["Carol", "Dave"]));
        assert_eq!(second.unknown_count, 1);
    }

    #[test]
    fn test_preserves_order_and_appends_in_observation_order() {
        let r = reconcile(
            &tags(&["Zeta", "Alpha"]),
            &[identified("Mia"), identified("Ann"), identified("Mia")],
        );
        assert_eq!(r.tags_to_write, tags(&["Zeta", "Alpha", "Mia", "Ann"]));
        assert_eq!(r.newly_added, tags(&["Mia", "Ann"]));
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let r = reconcile(&tags(&["alice"]), &[identified("Alice")]);
        assert_eq!(r.newly_added, tags(&["Alice"]));
        assert_eq!(r.tags_to_write, tags(&["alice", "Alice"]));
    }

    #[test]
    fn test_only_unknowns() {
        let r = reconcile(&tags(&["Alice"]), &vec![MatchResult::Unknown; 3]);
        assert_eq!(r.unknown_count, 3);
        assert_eq!(r.identified_count(), 0);
        assert!(!r.needs_write());
    }

    #[test]
    fn test_does_not_mutate_inputs() {
        let existing = tags(&["Alice"]);
        let results = vec![identified("Bob")];
        let _ = reconcile(&existing, &results);
        assert_eq!(existing, tags(&["Alice"]));
        assert_eq!(results, vec![identified("Bob")]);
    }
}
