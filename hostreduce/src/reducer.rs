use std::sync::Arc;

use crate::comm::Communicator;
use crate::config::ReducerConfig;
use crate::error::{ReduceError, Result};
use crate::kernel::Summable;
use crate::parallel::ParallelFor;
use crate::topology::{LocalTopology, PeerGroup};
use crate::types::{ElementType, Rank};

/// In-place element-wise summation of host buffers for one worker.
///
/// Built once per worker. Holds the peer group sharing this worker's PCIe
/// switch, the sub-communicator over that group, and a fixed-size thread pool.
/// Nothing here changes after construction, so a `Reducer` can be shared
/// across threads and used for concurrent sums on distinct buffers.
pub struct Reducer {
    comm: Arc<dyn Communicator>,
    group: PeerGroup,
    local_rank: Rank,
    pool: ParallelFor,
    min_parallel_bytes: usize,
}

impl Reducer {
    /// Build a reducer for `topology.local_rank`.
    ///
    /// Splits `comm` over the peer group, labelled with `config.comm_label`.
    /// `comm` must belong to the same worker as `topology`.
    pub fn new(
        comm: Arc<dyn Communicator>,
        topology: &LocalTopology,
        config: &ReducerConfig,
    ) -> Result<Self> {
        if comm.local_rank() != topology.local_rank {
            return Err(ReduceError::topology(format!(
                "communicator '{}' is for local rank {}, topology is for local rank {}",
                comm.label(),
                comm.local_rank(),
                topology.local_rank
            )));
        }
        let group = PeerGroup::for_topology(topology)?;
        let sub = comm.split(&config.comm_label, group.members())?;
        let pool = ParallelFor::new(config.threads)?;

        tracing::info!(
            local_rank = topology.local_rank,
            peers = ?group.members(),
            root = sub.root(),
            threads = pool.num_threads(),
            "cpu reducer ready"
        );

        Ok(Self {
            comm: sub,
            group,
            local_rank: topology.local_rank,
            pool,
            min_parallel_bytes: config.min_parallel_bytes,
        })
    }

    /// True if this worker is the root of its peer group.
    pub fn is_root(&self) -> bool {
        self.comm.root() == self.local_rank
    }

    pub fn peer_group(&self) -> &PeerGroup {
        &self.group
    }

    /// Sub-communicator over the peer group.
    pub fn comm(&self) -> &Arc<dyn Communicator> {
        &self.comm
    }

    pub fn local_rank(&self) -> Rank {
        self.local_rank
    }

    pub fn num_threads(&self) -> usize {
        self.pool.num_threads()
    }

    /// `dst[i] += src[i]` over `dst` interpreted as `dtype` elements.
    ///
    /// Only whole elements are summed: the trailing `dst.len() % width` bytes
    /// are left as they are. `F16` buffers are summed with the f32 kernel in
    /// 4-byte steps.
    pub fn sum(&self, dst: &mut [u8], src: &[u8], dtype: ElementType) -> Result<()> {
        if src.len() != dst.len() {
            return Err(ReduceError::BufferSizeMismatch {
                expected: dst.len(),
                actual: src.len(),
            });
        }

        let parallel = match dtype {
            ElementType::F32 => self.sum_typed::<f32>(dst, src),
            ElementType::F64 => self.sum_typed::<f64>(dst, src),
            // TODO: sum true half-precision values instead of reusing the f32 kernel.
            ElementType::F16 => self.sum_typed::<f32>(dst, src),
            ElementType::U8 => self.sum_typed::<u8>(dst, src),
            ElementType::I32 => self.sum_typed::<i32>(dst, src),
            ElementType::I8 => self.sum_typed::<i8>(dst, src),
            ElementType::I64 => self.sum_typed::<i64>(dst, src),
        };
        tracing::trace!(len = dst.len(), %dtype, parallel, "cpu sum");
        Ok(())
    }

    /// Pointer form of [`sum`](Self::sum) over `len` bytes.
    ///
    /// # Safety
    /// `dst_ptr` and `src_ptr` must each be valid for `len` bytes, `dst_ptr`
    /// writable, and the two regions must not overlap.
    pub unsafe fn sum_ptr(
        &self,
        dst_ptr: u64,
        src_ptr: u64,
        len: usize,
        dtype: ElementType,
    ) -> Result<()> {
        if len == 0 {
            return Ok(());
        }
        let dst = unsafe { std::slice::from_raw_parts_mut(dst_ptr as *mut u8, len) };
        let src = unsafe { std::slice::from_raw_parts(src_ptr as *const u8, len) };
        self.sum(dst, src, dtype)
    }

    /// Pointer form taking the raw element-type code.
    ///
    /// An unrecognized `code` is a broken caller contract: the diagnostic
    /// `unsupported data type: <code>` goes to stderr and the process aborts.
    ///
    /// # Safety
    /// Same as [`sum_ptr`](Self::sum_ptr).
    pub unsafe fn sum_raw(&self, dst_ptr: u64, src_ptr: u64, len: usize, code: u8) -> Result<()> {
        let dtype = match ElementType::from_code(code) {
            Ok(dtype) => dtype,
            Err(e) => {
                tracing::error!(code, "cpu reducer called with unsupported data type");
                eprintln!("{e}");
                std::process::abort();
            }
        };
        unsafe { self.sum_ptr(dst_ptr, src_ptr, len, dtype) }
    }

    fn sum_typed<T: Summable>(&self, dst: &mut [u8], src: &[u8]) -> bool {
        self.pool.run(
            dst,
            src,
            std::mem::size_of::<T>(),
            self.min_parallel_bytes,
            T::sum_chunk,
        )
    }
}

impl std::fmt::Debug for Reducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reducer")
            .field("local_rank", &self.local_rank)
            .field("peers", &self.group.members())
            .field("comm", &self.comm.label())
            .field("threads", &self.pool.num_threads())
            .finish()
    }
}
