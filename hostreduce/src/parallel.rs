//! Bounded data-parallel loop over byte buffers.
//!
//! Wraps a [`rayon::ThreadPool`] sized once at construction. Each call splits
//! the buffers into index-disjoint chunks and blocks until every chunk has
//! been processed.

use rayon::prelude::*;

use crate::error::Result;

/// Elements per chunk are rounded up to a multiple of this.
const CHUNK_ALIGN_ELEMS: usize = 64;

pub struct ParallelFor {
    pool: rayon::ThreadPool,
    threads: usize,
}

impl ParallelFor {
    /// Build a pool with `threads` workers (at least one).
    pub fn new(threads: usize) -> Result<Self> {
        let threads = threads.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|idx| format!("hostreduce-cpu-{idx}"))
            .build()?;
        Ok(Self { pool, threads })
    }

    pub fn num_threads(&self) -> usize {
        self.threads
    }

    /// Chunk length in bytes for `count` elements of `width` bytes.
    fn chunk_bytes(&self, count: usize, width: usize) -> usize {
        let per_thread = count.div_ceil(self.threads).max(1);
        per_thread.next_multiple_of(CHUNK_ALIGN_ELEMS) * width
    }

    /// Run `kernel` over the whole-element prefix of `dst` and `src`.
    ///
    /// Only the first `count * width` bytes are handed out, where
    /// `count = dst.len() / width`; trailing bytes are never touched.
    /// `width` must be non-zero and `src` must be at least as long as that
    /// prefix. Returns whether the pool was used.
    pub fn run<F>(
        &self,
        dst: &mut [u8],
        src: &[u8],
        width: usize,
        min_parallel_bytes: usize,
        kernel: F,
    ) -> bool
    where
        F: Fn(&mut [u8], &[u8]) + Send + Sync,
    {
        debug_assert!(width > 0, "element width must be non-zero");
        let count = dst.len() / width;
        let body = count * width;
        let dst = &mut dst[..body];
        let src = &src[..body];

        if self.threads == 1 || body < min_parallel_bytes.max(1) {
            kernel(dst, src);
            return false;
        }

        let chunk = self.chunk_bytes(count, width);
        self.pool.install(|| {
            dst.par_chunks_mut(chunk)
                .zip(src.par_chunks(chunk))
                .for_each(|(d, s)| kernel(d, s));
        });
        true
    }
}

impl std::fmt::Debug for ParallelFor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelFor")
            .field("threads", &self.threads)
            .finish()
    }
}
