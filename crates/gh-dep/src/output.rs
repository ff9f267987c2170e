//! Plain text and JSON rendering for the non-interactive commands

use crate::domain_models::{Groups, Pr};
use serde::Serialize;
use std::collections::BTreeSet;

/// One row per PR: number, CI icon, optional repo, title
pub fn render_table(prs: &[Pr]) -> String {
    if prs.is_empty() {
        return "No pull requests found.\n".to_string();
    }

    let multi_repo = is_multi_repo(prs);
    let number_width = prs
        .iter()
        .map(|pr| pr.number.to_string().len() + 1)
        .max()
        .unwrap_or(2)
        .max(2);
    let repo_width = prs
        .iter()
        .map(|pr| pr.repo.to_string().len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut out = String::new();
    if multi_repo {
        out.push_str(&format!(
            "{:<nw$}  {:<rw$}  CI  TITLE\n",
            "#",
            "REPO",
            nw = number_width,
            rw = repo_width
        ));
    } else {
        out.push_str(&format!("{:<nw$}  CI  TITLE\n", "#", nw = number_width));
    }

    for pr in prs {
        let number = format!("#{}", pr.number);
        if multi_repo {
            out.push_str(&format!(
                "{:<nw$}  {:<rw$}  {}   {}\n",
                number,
                pr.repo.to_string(),
                pr.ci.icon(),
                pr.title,
                nw = number_width,
                rw = repo_width
            ));
        } else {
            out.push_str(&format!(
                "{:<nw$}  {}   {}\n",
                number,
                pr.ci.icon(),
                pr.title,
                nw = number_width
            ));
        }
    }
    out
}

/// Groups sorted by key, PRs sorted by repo then number
pub fn render_groups(groups: &Groups) -> String {
    if groups.is_empty() {
        return "No groups found.\n".to_string();
    }

    let all: Vec<&Pr> = groups.values().flatten().collect();
    let multi_repo = all
        .iter()
        .map(|pr| &pr.repo)
        .collect::<BTreeSet<_>>()
        .len()
        > 1;

    let mut out = String::new();
    for (key, prs) in groups {
        out.push_str(&format!("{} ({} PRs)\n", key, prs.len()));
        for pr in sorted(prs) {
            let prefix = if multi_repo {
                format!("[{}] ", pr.repo)
            } else {
                String::new()
            };
            out.push_str(&format!(
                "  {} {}#{} {}\n",
                pr.ci.icon(),
                prefix,
                pr.number,
                pr.title
            ));
        }
        out.push('\n');
    }
    out
}

/// One line per group: key, number of PRs, number of repositories
pub fn render_group_summary(groups: &Groups) -> String {
    if groups.is_empty() {
        return "No cached groups.\n".to_string();
    }

    let key_width = groups.keys().map(String::len).max().unwrap_or(5).max(5);
    let mut out = format!("{:<w$}  PRS  REPOS\n", "GROUP", w = key_width);
    for (key, prs) in groups {
        let repos = prs.iter().map(|pr| &pr.repo).collect::<BTreeSet<_>>().len();
        out.push_str(&format!(
            "{:<w$}  {:>3}  {:>5}\n",
            key,
            prs.len(),
            repos,
            w = key_width
        ));
    }
    out
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Group key with its PR count, used for `groups --json`
#[derive(Debug, Serialize)]
pub struct GroupSummary<'a> {
    pub key: &'a str,
    pub count: usize,
    pub prs: &'a [Pr],
}

pub fn group_summaries(groups: &Groups) -> Vec<GroupSummary<'_>> {
    groups
        .iter()
        .map(|(key, prs)| GroupSummary {
            key,
            count: prs.len(),
            prs,
        })
        .collect()
}

fn is_multi_repo(prs: &[Pr]) -> bool {
    prs.iter().map(|pr| &pr.repo).collect::<BTreeSet<_>>().len() > 1
}

fn sorted(prs: &[Pr]) -> Vec<&Pr> {
    let mut sorted: Vec<&Pr> = prs.iter().collect();
    sorted.sort_by(|a, b| a.repo.cmp(&b.repo).then(a.number.cmp(&b.number)));
    sorted
}
