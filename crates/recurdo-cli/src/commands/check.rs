use anyhow::Result;

use crate::commands::build_engine;
use crate::config::Config;
use crate::views::table::{display_candidates, ViewCandidate};

pub async fn check(config: &Config) -> Result<()> {
    let engine = build_engine(config)?;
    let cutoff = engine.cutoff();
    let (snapshot, candidates) = engine.check().await?;

    let rows: Vec<ViewCandidate> = candidates
        .iter()
        .map(|candidate| {
            let task = &snapshot.forest.node(candidate.node).task;
            ViewCandidate {
                content: task.content.clone(),
                due_date: candidate.due_date,
                period: candidate.rule.period,
                subtree_size: snapshot.forest.subtree(candidate.node).len(),
                due_before_cutoff: candidate.due_date < cutoff,
                url: task.url.clone(),
            }
        })
        .collect();

    display_candidates(&rows, cutoff);
    Ok(())
}
