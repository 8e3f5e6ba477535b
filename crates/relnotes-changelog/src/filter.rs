//! Revert filtering

use std::collections::HashSet;

use tracing::debug;

use crate::types::ParsedCommit;

/// Drop reverted commits together with the commits that revert them.
///
/// A commit is reverted when its trimmed header or subject equals the
/// `revert.header` of another commit. Matching is textual, so the revert may
/// come before or after its target. Reverts whose target is not in the set
/// stay, and survivors keep their input order.
pub fn filter_reverted(commits: Vec<ParsedCommit>) -> Vec<ParsedCommit> {
    let reverts: Vec<(usize, &str)> = commits
        .iter()
        .enumerate()
        .filter_map(|(i, c)| {
            let header = c.revert.as_ref()?.header()?.trim();
            Some((i, header)).filter(|(_, h)| !h.is_empty())
        })
        .collect();

    if reverts.is_empty() {
        return commits;
    }

    let mut removed = HashSet::new();
    for (revert_index, target) in &reverts {
        let matched: Vec<usize> = commits
            .iter()
            .enumerate()
            .filter(|(i, c)| {
                i != revert_index
                    && (c.header.trim() == *target
                        || c.subject.as_deref().map(str::trim) == Some(*target))
            })
            .map(|(i, _)| i)
            .collect();

        if !matched.is_empty() {
            removed.insert(*revert_index);
            removed.extend(matched);
        }
    }

    debug!(removed = removed.len(), "filtered reverted commits");

    commits
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !removed.contains(i))
        .map(|(_, c)| c)
        .collect()
}
