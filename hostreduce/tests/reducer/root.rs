use hostreduce::{Communicator, LocalComm, LocalTopology, ReduceError, Reducer, ReducerConfig};
use std::sync::Arc;

use super::helpers::{host, reducer};

#[test]
fn test_one_root_per_peer_group() {
    let reducers = host(8, 4);
    let roots: Vec<u32> = reducers
        .iter()
        .filter(|r| r.is_root())
        .map(|r| r.local_rank())
        .collect();
    // Groups {0,4} {1,5} {2,6} {3,7}; the highest member leads.
    assert_eq!(roots, vec![4, 5, 6, 7]);
}

#[test]
fn test_peer_groups_partition_host() {
    let reducers = host(7, 3);
    let mut seen = vec![0u32; 7];
    for r in &reducers {
        assert!(r.peer_group().contains(r.local_rank()));
        if r.peer_group().lowest() == Some(r.local_rank()) {
            for &m in r.peer_group().members() {
                seen[m as usize] += 1;
            }
        }
    }
    assert!(seen.iter().all(|&n| n == 1), "{seen:?}");
}

#[test]
fn test_members_agree_on_group_and_root() {
    let reducers = host(8, 4);
    for r in &reducers {
        for &peer in r.peer_group().members() {
            let other = &reducers[peer as usize];
            assert_eq!(other.peer_group(), r.peer_group());
            assert_eq!(other.comm().root(), r.comm().root());
        }
    }
}

#[test]
fn test_is_root_is_stable() {
    let r = reducer(5, 8, 4);
    let first = r.is_root();
    for _ in 0..100 {
        assert_eq!(r.is_root(), first);
    }
}

#[test]
fn test_sub_communicator_uses_config_label() {
    let comm = Arc::new(LocalComm::world(1, 4).unwrap());
    let cfg = ReducerConfig {
        comm_label: "cpu-reducer".into(),
        ..ReducerConfig::default()
    };
    let r = Reducer::new(comm, &LocalTopology::new(1, 4, 2), &cfg).unwrap();
    assert_eq!(r.comm().label(), "cpu-reducer");
    assert_eq!(r.comm().members(), &[1, 3]);
}

/// Communicator whose root is always its lowest member.
struct LowestRoot {
    rank: u32,
    members: Vec<u32>,
}

impl Communicator for LowestRoot {
    fn local_rank(&self) -> u32 {
        self.rank
    }
    fn members(&self) -> &[u32] {
        &self.members
    }
    fn root(&self) -> u32 {
        self.members[0]
    }
    fn label(&self) -> &str {
        "lowest"
    }
    fn split(&self, _label: &str, members: &[u32]) -> hostreduce::Result<Arc<dyn Communicator>> {
        Ok(Arc::new(LowestRoot {
            rank: self.rank,
            members: members.to_vec(),
        }))
    }
}

#[test]
fn test_root_delegated_to_communicator() {
    let comm = Arc::new(LowestRoot {
        rank: 1,
        members: (0..8).collect(),
    });
    let r = Reducer::new(comm, &LocalTopology::new(1, 8, 4), &ReducerConfig::default()).unwrap();
    assert!(r.is_root());

    let comm = Arc::new(LowestRoot {
        rank: 5,
        members: (0..8).collect(),
    });
    let r = Reducer::new(comm, &LocalTopology::new(5, 8, 4), &ReducerConfig::default()).unwrap();
    assert!(!r.is_root());
}

#[test]
fn test_invalid_topology_rejected() {
    let comm = Arc::new(LocalComm::world(0, 4).unwrap());
    let err = Reducer::new(comm, &LocalTopology::new(0, 4, 0), &ReducerConfig::default());
    assert!(err.is_err());
}

#[test]
fn test_mismatched_communicator_rank_rejected() {
    // Communicator for rank 5 handed a topology for rank 1.
    let comm = Arc::new(LocalComm::world(5, 8).unwrap());
    let err = Reducer::new(comm, &LocalTopology::new(1, 8, 4), &ReducerConfig::default())
        .unwrap_err();
    assert!(matches!(err, ReduceError::InvalidTopology { .. }), "{err}");

    let comm = Arc::new(LowestRoot {
        rank: 2,
        members: (0..8).collect(),
    });
    assert!(Reducer::new(comm, &LocalTopology::new(6, 8, 4), &ReducerConfig::default()).is_err());
}
