use sprout_dag::CommitGraph;
use sprout_types::CommitId;

/// Commit negotiation: works out which commits a transfer has to move.
pub struct NegotiationEngine;

impl NegotiationEngine {
    /// Commits the remote has that we don't, in the remote's creation order.
    pub fn compute_wants(local: &CommitGraph, remote: &CommitGraph) -> Vec<CommitId> {
        ids(remote.missing_from(local))
    }
}

fn ids(commits: Vec<&sprout_dag::Commit>) -> Vec<CommitId> {
    commits.into_iter().map(|commit| commit.id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_dag::Commit;
    use sprout_types::Timestamp;

    fn graph(ids: &[(&str, Option<&str>)]) -> CommitGraph {
        let mut graph = CommitGraph::new();
        for (id, parent) in ids {
            graph
                .append(Commit::new(
                    CommitId::from_raw(*id),
                    "msg",
                    parent.map(CommitId::from_raw),
                    "you",
                    Timestamp::zero(),
                ))
                .unwrap();
        }
        graph
    }

    #[test]
    fn wants_skip_shared_and_local_only_commits() {
        let local = graph(&[("a", None), ("b", Some("a"))]);
        let remote = graph(&[("a", None), ("x", Some("a")), ("y", Some("x"))]);
        assert_eq!(
            NegotiationEngine::compute_wants(&local, &remote),
            vec![CommitId::from_raw("x"), CommitId::from_raw("y")]
        );
    }

    #[test]
    fn synced_graphs_need_nothing() {
        let local = graph(&[("a", None)]);
        assert!(NegotiationEngine::compute_wants(&local, &local.clone()).is_empty());
    }

    #[test]
    fn empty_local_wants_everything() {
        let remote = graph(&[("a", None), ("b", Some("a"))]);
        let wants = NegotiationEngine::compute_wants(&CommitGraph::new(), &remote);
        assert_eq!(wants.len(), 2);
    }
}
