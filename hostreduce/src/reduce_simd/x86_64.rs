//! AVX2 and AVX-512 sum kernels for x86_64.
//!
//! Loads and stores are unaligned; callers may pass byte buffers at any offset.

use std::arch::x86_64::*;

// ── f32 ──────────────────────────────────────────────────────────────

#[target_feature(enable = "avx512f")]
pub(crate) unsafe fn sum_f32_avx512(dst: &mut [u8], src: &[u8], count: usize) {
    let dp = dst.as_mut_ptr() as *mut f32;
    let sp = src.as_ptr() as *const f32;
    let chunks = count / 16;
    let tail = count % 16;

    for i in 0..chunks {
        let off = i * 16;
        unsafe {
            let a = _mm512_loadu_ps(dp.add(off));
            let b = _mm512_loadu_ps(sp.add(off));
            _mm512_storeu_ps(dp.add(off), _mm512_add_ps(a, b));
        }
    }

    if tail > 0 {
        unsafe { sum_f32_avx2(&mut dst[chunks * 64..], &src[chunks * 64..], tail) };
    }
}

#[target_feature(enable = "avx2")]
pub(crate) unsafe fn sum_f32_avx2(dst: &mut [u8], src: &[u8], count: usize) {
    let dp = dst.as_mut_ptr() as *mut f32;
    let sp = src.as_ptr() as *const f32;
    let chunks = count / 8;

    for i in 0..chunks {
        let off = i * 8;
        unsafe {
            let a = _mm256_loadu_ps(dp.add(off));
            let b = _mm256_loadu_ps(sp.add(off));
            _mm256_storeu_ps(dp.add(off), _mm256_add_ps(a, b));
        }
    }

    for idx in chunks * 8..count {
        unsafe {
            let a = dp.add(idx).read_unaligned();
            let b = sp.add(idx).read_unaligned();
            dp.add(idx).write_unaligned(a + b);
        }
    }
}

// ── f64 ──────────────────────────────────────────────────────────────

#[target_feature(enable = "avx512f")]
pub(crate) unsafe fn sum_f64_avx512(dst: &mut [u8], src: &[u8], count: usize) {
    let dp = dst.as_mut_ptr() as *mut f64;
    let sp = src.as_ptr() as *const f64;
    let chunks = count / 8;
    let tail = count % 8;

    for i in 0..chunks {
        let off = i * 8;
        unsafe {
            let a = _mm512_loadu_pd(dp.add(off));
            let b = _mm512_loadu_pd(sp.add(off));
            _mm512_storeu_pd(dp.add(off), _mm512_add_pd(a, b));
        }
    }

    if tail > 0 {
        unsafe { sum_f64_avx2(&mut dst[chunks * 64..], &src[chunks * 64..], tail) };
    }
}

#[target_feature(enable = "avx2")]
pub(crate) unsafe fn sum_f64_avx2(dst: &mut [u8], src: &[u8], count: usize) {
    let dp = dst.as_mut_ptr() as *mut f64;
    let sp = src.as_ptr() as *const f64;
    let chunks = count / 4;

    for i in 0..chunks {
        let off = i * 4;
        unsafe {
            let a = _mm256_loadu_pd(dp.add(off));
            let b = _mm256_loadu_pd(sp.add(off));
            _mm256_storeu_pd(dp.add(off), _mm256_add_pd(a, b));
        }
    }

    for idx in chunks * 4..count {
        unsafe {
            let a = dp.add(idx).read_unaligned();
            let b = sp.add(idx).read_unaligned();
            dp.add(idx).write_unaligned(a + b);
        }
    }
}
