#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

pub type Simd = __m128i;
/// Number of 16-bit lanes in a SIMD vector.
pub const L: usize = 8;

#[target_feature(enable = "sse2")]
#[inline]
pub unsafe fn simd_set1_i16(v: i16) -> Simd { _mm_set1_epi16(v) }

#[target_feature(enable = "sse2")]
#[inline]
pub unsafe fn simd_iota_i16(offset: i16) -> Simd {
    _mm_adds_epi16(_mm_set1_epi16(offset), _mm_setr_epi16(0, 1, 2, 3, 4, 5, 6, 7))
}

#[target_feature(enable = "sse2")]
#[inline]
pub unsafe fn simd_adds_i16(a: Simd, b: Simd) -> Simd { _mm_adds_epi16(a, b) }

#[target_feature(enable = "sse2")]
#[inline]
pub unsafe fn simd_max_i16(a: Simd, b: Simd) -> Simd { _mm_max_epi16(a, b) }

#[target_feature(enable = "sse2")]
#[inline]
pub unsafe fn simd_min_i16(a: Simd, b: Simd) -> Simd { _mm_min_epi16(a, b) }

#[target_feature(enable = "sse2")]
#[inline]
pub unsafe fn simd_cmpeq_i16(a: Simd, b: Simd) -> Simd { _mm_cmpeq_epi16(a, b) }

#[target_feature(enable = "sse2")]
#[inline]
pub unsafe fn simd_cmpgt_i16(a: Simd, b: Simd) -> Simd { _mm_cmpgt_epi16(a, b) }

/// Lanes of `b` where `mask` is set, lanes of `a` elsewhere.
// no blendv before SSE4.1
#[target_feature(enable = "sse2")]
#[inline]
pub unsafe fn simd_blend_i16(a: Simd, b: Simd, mask: Simd) -> Simd {
    _mm_or_si128(_mm_and_si128(mask, b), _mm_andnot_si128(mask, a))
}

#[target_feature(enable = "sse2")]
#[inline]
pub unsafe fn simd_and(a: Simd, b: Simd) -> Simd { _mm_and_si128(a, b) }

#[target_feature(enable = "sse2")]
#[inline]
pub unsafe fn simd_or(a: Simd, b: Simd) -> Simd { _mm_or_si128(a, b) }

#[target_feature(enable = "sse2")]
#[inline]
pub unsafe fn simd_load(ptr: *const Simd) -> Simd { _mm_load_si128(ptr) }

#[target_feature(enable = "sse2")]
#[inline]
pub unsafe fn simd_loadu(ptr: *const i16) -> Simd { _mm_loadu_si128(ptr as *const Simd) }

#[target_feature(enable = "sse2")]
#[inline]
pub unsafe fn simd_store(ptr: *mut Simd, a: Simd) { _mm_store_si128(ptr, a) }

#[target_feature(enable = "sse2")]
#[inline]
pub unsafe fn simd_storeu(ptr: *mut i16, a: Simd) { _mm_storeu_si128(ptr as *mut Simd, a) }

#[target_feature(enable = "sse2")]
#[inline]
pub unsafe fn simd_any(mask: Simd) -> bool { _mm_movemask_epi8(mask) != 0 }

#[target_feature(enable = "sse2")]
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
