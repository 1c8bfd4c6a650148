//! Typed element-wise sum kernels over raw byte buffers.
//!
//! Every kernel reads and writes through unaligned accesses, so the buffers
//! handed in may start at any byte offset.

use crate::reduce_simd;

/// Element types with a native in-place sum kernel.
pub(crate) trait Summable: Copy + Send + Sync + 'static {
    /// Native addition: wrapping for integers, IEEE for floats.
    fn add(a: Self, b: Self) -> Self;

    /// `dst[i] += src[i]` for every whole element of `dst`.
    ///
    /// `src` must be at least as long as `dst`.
    #[inline]
    fn sum_chunk(dst: &mut [u8], src: &[u8]) {
        sum_scalar::<Self>(dst, src);
    }
}

macro_rules! impl_summable_int {
    ($($ty:ty),*) => {
        $(
            impl Summable for $ty {
                #[inline]
                fn add(a: Self, b: Self) -> Self {
                    a.wrapping_add(b)
                }
            }
        )*
    };
}

impl_summable_int!(i8, u8, i32, i64);

impl Summable for f32 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    fn sum_chunk(dst: &mut [u8], src: &[u8]) {
        let count = dst.len() / 4;
        assert!(src.len() >= count * 4);
        // SAFETY: both buffers hold at least `count * 4` bytes.
        if unsafe { reduce_simd::sum_f32_simd(dst, src, count) } {
            return;
        }
        sum_scalar::<f32>(dst, src);
    }
}

impl Summable for f64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    fn sum_chunk(dst: &mut [u8], src: &[u8]) {
        let count = dst.len() / 8;
        assert!(src.len() >= count * 8);
        // SAFETY: both buffers hold at least `count * 8` bytes.
        if unsafe { reduce_simd::sum_f64_simd(dst, src, count) } {
            return;
        }
        sum_scalar::<f64>(dst, src);
    }
}

/// Portable loop; simple enough for the compiler to auto-vectorize.
pub(crate) fn sum_scalar<T: Summable>(dst: &mut [u8], src: &[u8]) {
    let width = std::mem::size_of::<T>();
    let count = dst.len() / width;
    assert!(src.len() >= count * width);

    let dp = dst.as_mut_ptr() as *mut T;
    let sp = src.as_ptr() as *const T;
    for i in 0..count {
        // SAFETY: `i < count` and both buffers hold `count` elements.
        unsafe {
            let a = dp.add(i).read_unaligned();
            let b = sp.add(i).read_unaligned();
            dp.add(i).write_unaligned(T::add(a, b));
        }
    }
}
