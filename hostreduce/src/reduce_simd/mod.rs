//! SIMD-accelerated sum kernels, selected at runtime per architecture.

#[cfg(target_arch = "x86_64")]
mod x86_64;

#[cfg(target_arch = "aarch64")]
mod aarch64;

/// Try SIMD-accelerated f32 sum. Returns `true` if handled.
///
/// # Safety
/// `dst` and `src` must both have at least `count * 4` bytes.
pub(crate) unsafe fn sum_f32_simd(dst: &mut [u8], src: &[u8], count: usize) -> bool {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx512f") {
            unsafe { x86_64::sum_f32_avx512(dst, src, count) };
            return true;
        }
        if is_x86_feature_detected!("avx2") {
            unsafe { x86_64::sum_f32_avx2(dst, src, count) };
            return true;
        }
    }
    #[cfg(target_arch = "aarch64")]
    {
        unsafe { aarch64::sum_f32_neon(dst, src, count) };
        return true;
    }
    #[allow(unreachable_code)]
    {
        let _ = (dst, src, count);
        false
    }
}

/// Try SIMD-accelerated f64 sum. Returns `true` if handled.
///
/// # Safety
/// `dst` and `src` must both have at least `count * 8` bytes.
pub(crate) unsafe fn sum_f64_simd(dst: &mut [u8], src: &[u8], count: usize) -> bool {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx512f") {
            unsafe { x86_64::sum_f64_avx512(dst, src, count) };
            return true;
        }
        if is_x86_feature_detected!("avx2") {
            unsafe { x86_64::sum_f64_avx2(dst, src, count) };
            return true;
        }
    }
    #[cfg(target_arch = "aarch64")]
    {
        unsafe { aarch64::sum_f64_neon(dst, src, count) };
        return true;
    }
    #[allow(unreachable_code)]
    {
        let _ = (dst, src, count);
        false
    }
}
