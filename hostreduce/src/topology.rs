use crate::error::{ReduceError, Result};
use crate::types::Rank;

/// Host-local placement facts for this worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTopology {
    /// This worker's rank among the workers on the host.
    pub local_rank: Rank,
    /// Number of workers on the host.
    pub local_size: u32,
    /// Number of workers sharing one locality domain (PCIe switch).
    pub pcie_switch_size: u32,
}

impl LocalTopology {
    pub fn new(local_rank: Rank, local_size: u32, pcie_switch_size: u32) -> Self {
        Self {
            local_rank,
            local_size,
            pcie_switch_size,
        }
    }

    /// Read topology from the environment.
    ///
    /// - `HOSTREDUCE_LOCAL_RANK` (required)
    /// - `HOSTREDUCE_LOCAL_SIZE` (required)
    /// - `HOSTREDUCE_PCIE_SWITCH_SIZE` (defaults to the local size)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let local_rank = required(&lookup, "HOSTREDUCE_LOCAL_RANK")?;
        let local_size = required(&lookup, "HOSTREDUCE_LOCAL_SIZE")?;
        let pcie_switch_size = match lookup("HOSTREDUCE_PCIE_SWITCH_SIZE") {
            Some(v) => parse(&v, "HOSTREDUCE_PCIE_SWITCH_SIZE")?,
            None => local_size,
        };
        let topo = Self::new(local_rank, local_size, pcie_switch_size);
        topo.validate()?;
        Ok(topo)
    }

    pub fn validate(&self) -> Result<()> {
        if self.pcie_switch_size == 0 {
            return Err(ReduceError::topology("pcie switch size must be non-zero"));
        }
        if self.local_size == 0 {
            return Err(ReduceError::topology("local size must be non-zero"));
        }
        if self.local_rank >= self.local_size {
            return Err(ReduceError::topology(format!(
                "local rank {} out of range for local size {}",
                self.local_rank, self.local_size
            )));
        }
        Ok(())
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<u32> {
    let v = lookup(var).ok_or(ReduceError::MissingEnv { var })?;
    parse(&v, var)
}

fn parse(value: &str, var: &'static str) -> Result<u32> {
    value.trim().parse().map_err(|_| ReduceError::InvalidEnv {
        var,
        value: value.to_string(),
    })
}

/// Local ranks that share this worker's locality domain.
///
/// Rank `r` belongs to the group whose smallest member is
/// `r % pcie_switch_size`; the group holds every local rank congruent to
/// that value, in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerGroup {
    members: Vec<Rank>,
}

impl PeerGroup {
    /// Compute the peer group of `topo.local_rank`.
    pub fn for_topology(topo: &LocalTopology) -> Result<Self> {
        topo.validate()?;
        let first = topo.local_rank % topo.pcie_switch_size;
        let members = (first..topo.local_size)
            .step_by(topo.pcie_switch_size as usize)
            .collect();
        Ok(Self { members })
    }

    /// Members in ascending order.
    pub fn members(&self) -> &[Rank] {
        &self.members
    }

    pub fn contains(&self, rank: Rank) -> bool {
        self.members.binary_search(&rank).is_ok()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Smallest member, which also identifies the group.
    pub fn lowest(&self) -> Option<Rank> {
        self.members.first().copied()
    }
}
