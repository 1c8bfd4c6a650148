use std::sync::Arc;

use crate::error::{ReduceError, Result};
use crate::types::Rank;

/// Host-local communicator the reducer coordinates through.
///
/// The reducer never moves data over a communicator itself. It only builds a
/// sub-communicator over its peer group and asks it which member is the root
/// of the next communication phase.
pub trait Communicator: Send + Sync {
    /// This worker's local rank.
    fn local_rank(&self) -> Rank;

    /// Local ranks in this communicator, ascending.
    fn members(&self) -> &[Rank];

    /// Local rank of the member that leads this communicator.
    fn root(&self) -> Rank;

    /// Label the communicator was created with.
    fn label(&self) -> &str;

    /// Build a sub-communicator over `members`, tagged with `label`.
    ///
    /// `members` must be a subset of this communicator that contains
    /// [`local_rank`](Self::local_rank).
    fn split(&self, label: &str, members: &[Rank]) -> Result<Arc<dyn Communicator>>;
}

/// In-process communicator over the workers of one host.
///
/// The root is the highest-numbered member.
#[derive(Debug, Clone)]
pub struct LocalComm {
    label: String,
    local_rank: Rank,
    members: Vec<Rank>,
}

impl LocalComm {
    /// Communicator spanning local ranks `0..local_size`.
    pub fn world(local_rank: Rank, local_size: u32) -> Result<Self> {
        Self::with_members("world", local_rank, (0..local_size).collect())
    }

    /// Communicator over an explicit member set.
    pub fn with_members(
        label: impl Into<String>,
        local_rank: Rank,
        mut members: Vec<Rank>,
    ) -> Result<Self> {
        let label = label.into();
        members.sort_unstable();
        members.dedup();
        if members.is_empty() {
            return Err(ReduceError::peer_group(format!(
                "communicator '{label}' has no members"
            )));
        }
        if members.binary_search(&local_rank).is_err() {
            return Err(ReduceError::NotAMember {
                rank: local_rank,
                label,
            });
        }
        Ok(Self {
            label,
            local_rank,
            members,
        })
    }
}

impl Communicator for LocalComm {
    fn local_rank(&self) -> Rank {
        self.local_rank
    }

    fn members(&self) -> &[Rank] {
        &self.members
    }

    fn root(&self) -> Rank {
        // Non-empty by construction.
        self.members[self.members.len() - 1]
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn split(&self, label: &str, members: &[Rank]) -> Result<Arc<dyn Communicator>> {
        if let Some(&outside) = members
            .iter()
            .find(|r| self.members.binary_search(r).is_err())
        {
            return Err(ReduceError::peer_group(format!(
                "rank {outside} is not in parent communicator '{}'",
                self.label
            )));
        }
        let sub = LocalComm::with_members(label, self.local_rank, members.to_vec())?;
        tracing::debug!(
            parent = %self.label,
            label = %sub.label,
            members = ?sub.members,
            root = sub.root(),
            "split local communicator"
        );
        Ok(Arc::new(sub))
    }
}
