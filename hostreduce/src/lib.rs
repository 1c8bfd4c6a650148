pub mod comm;
pub mod config;
pub mod error;
mod kernel;
pub mod parallel;
mod reduce_simd;
pub mod reducer;
pub mod topology;
pub mod types;

pub use comm::{Communicator, LocalComm};
pub use config::ReducerConfig;
pub use error::{ReduceError, Result};
pub use parallel::ParallelFor;
pub use reducer::Reducer;
pub use topology::{LocalTopology, PeerGroup};
pub use types::{ElementType, Rank};
