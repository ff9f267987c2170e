//! Grouping of PRs by the package version they update

use super::{Pr, TitleParser};
use std::collections::BTreeMap;

/// PRs keyed by `package@version`, ordered by key
pub type Groups = BTreeMap<String, Vec<Pr>>;

/// Put every PR into exactly one group, keeping discovery order within a group
pub fn group_prs(prs: &[Pr], parser: &TitleParser) -> Groups {
    let mut groups = Groups::new();
    for pr in prs {
        groups
            .entry(parser.group_key(&pr.title))
            .or_default()
            .push(pr.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_models::title_parser::UNKNOWN_GROUP;
    use crate::domain_models::Repository;

    #[test]
    fn test_every_pr_in_exactly_one_group() {
        let repo = Repository::new("a", "b");
        let prs = vec![
            Pr::new(repo.clone(), 1, "Bump serde from 1.0.1 to 1.0.2"),
            Pr::new(repo.clone(), 2, "Bump tokio from 1.0 to 1.1"),
            Pr::new(repo.clone(), 3, "Bump serde from 1.0.0 to 1.0.2"),
            Pr::new(repo, 4, "Refactor everything"),
        ];

        let groups = group_prs(&prs, &TitleParser::default());

        assert_eq!(groups.len(), 3);
        let serde: Vec<u64> = groups["serde@1.0.2"].iter().map(|pr| pr.number).collect();
        assert_eq!(serde, vec![1, 3]);
        assert_eq!(groups["tokio@1.1"].len(), 1);
        assert_eq!(groups[UNKNOWN_GROUP][0].number, 4);

        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, prs.len());
    }
}
