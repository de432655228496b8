use std::arch::aarch64::*;

pub type Simd = int16x8_t;
/// Number of 16-bit lanes in a SIMD vector.
pub const L: usize = 8;

#[target_feature(enable = "neon")]
#[inline]
pub unsafe fn simd_set1_i16(v: i16) -> Simd { vdupq_n_s16(v) }

#[target_feature(enable = "neon")]
#[inline]
pub unsafe fn simd_iota_i16(offset: i16) -> Simd {
    const IOTA: [i16; L] = [0, 1, 2, 3, 4, 5, 6, 7];
    vqaddq_s16(vdupq_n_s16(offset), vld1q_s16(IOTA.as_ptr()))
}

#[target_feature(enable = "neon")]
#[inline]
pub unsafe fn simd_adds_i16(a: Simd, b: Simd) -> Simd { vqaddq_s16(a, b) }

#[target_feature(enable = "neon")]
#[inline]
pub unsafe fn simd_max_i16(a: Simd, b: Simd) -> Simd { vmaxq_s16(a, b) }

#[target_feature(enable = "neon")]
#[inline]
pub unsafe fn simd_min_i16(a: Simd, b: Simd) -> Simd { vminq_s16(a, b) }

#[target_feature(enable = "neon")]
#[inline]
pub unsafe fn simd_cmpeq_i16(a: Simd, b: Simd) -> Simd { vreinterpretq_s16_u16(vceqq_s16(a, b)) }

#[target_feature(enable = "neon")]
#[inline]
pub unsafe fn simd_cmpgt_i16(a: Simd, b: Simd) -> Simd { vreinterpretq_s16_u16(vcgtq_s16(a, b)) }

/// Lanes of `b` where `mask` is set, lanes of `a` elsewhere.
#[target_feature(enable = "neon")]
#[inline]
pub unsafe fn simd_blend_i16(a: Simd, b: Simd, mask: Simd) -> Simd {
    vbslq_s16(vreinterpretq_u16_s16(mask), b, a)
}

#[target_feature(enable = "neon")]
#[inline]
pub unsafe fn simd_and(a: Simd, b: Simd) -> Simd { vandq_s16(a, b) }

#[target_feature(enable = "neon")]
#[inline]
pub unsafe fn simd_or(a: Simd, b: Simd) -> Simd { vorrq_s16(a, b) }

#[target_feature(enable = "neon")]
#[inline]
pub unsafe fn simd_load(ptr: *const Simd) -> Simd { vld1q_s16(ptr as *const i16) }

#[target_feature(enable = "neon")]
#[inline]
pub unsafe fn simd_loadu(ptr: *const i16) -> Simd { vld1q_s16(ptr) }

#[target_feature(enable = "neon")]
#[inline]
pub unsafe fn simd_store(ptr: *mut Simd, a: Simd) { vst1q_s16(ptr as *mut i16, a) }

#[target_feature(enable = "neon")]
#[inline]
pub unsafe fn simd_storeu(ptr: *mut i16, a: Simd) { vst1q_s16(ptr, a) }

#[target_feature(enable = "neon")]
#[inline]
pub unsafe fn simd_any(mask: Simd) -> bool { vmaxvq_u16(vreinterpretq_u16_s16(mask)) != 0 }

#[target_feature(enable = "neon")]
#[allow(dead_code)]
pub unsafe fn simd_dbg_i16(v: Simd) {
    #[repr(align(16))]
    struct A([i16; L]);

    let mut a = A([0i16; L]);
    simd_store(a.0.as_mut_ptr() as *mut Simd, v);

    for i in (0..a.0.len()).rev() {
        print!("{:6} ", a.0[i]);
    }
    println!();
}
