//! NEON sum kernels for aarch64.

use std::arch::aarch64::*;

// ── f32 (NEON, 4-wide) ──────────────────────────────────────────────

pub(crate) unsafe fn sum_f32_neon(dst: &mut [u8], src: &[u8], count: usize) {
    unsafe {
        let dp = dst.as_mut_ptr() as *mut f32;
        let sp = src.as_ptr() as *const f32;
        let chunks = count / 4;

        for i in 0..chunks {
            let off = i * 4;
            let a = vld1q_f32(dp.add(off));
            let b = vld1q_f32(sp.add(off));
            vst1q_f32(dp.add(off), vaddq_f32(a, b));
        }

        for idx in chunks * 4..count {
            let a = dp.add(idx).read_unaligned();
            let b = sp.add(idx).read_unaligned();
            dp.add(idx).write_unaligned(a + b);
        }
    }
}

// ── f64 (NEON, 2-wide) ──────────────────────────────────────────────

pub(crate) unsafe fn sum_f64_neon(dst: &mut [u8], src: &[u8], count: usize) {
    unsafe {
        let dp = dst.as_mut_ptr() as *mut f64;
        let sp = src.as_ptr() as *const f64;
        let chunks = count / 2;

        for i in 0..chunks {
            let off = i * 2;
            let a = vld1q_f64(dp.add(off));
            let b = vld1q_f64(sp.add(off));
            vst1q_f64(dp.add(off), vaddq_f64(a, b));
        }

        if count % 2 == 1 {
            let idx = count - 1;
            let a = dp.add(idx).read_unaligned();
            let b = sp.add(idx).read_unaligned();
            dp.add(idx).write_unaligned(a + b);
        }
    }
}
