use std::arch::wasm32::*;

pub type Simd = v128;
/// Number of 16-bit lanes in a SIMD vector.
pub const L: usize = 8;

#[target_feature(enable = "simd128")]
#[inline]
pub unsafe fn simd_set1_i16(v: i16) -> Simd { i16x8_splat(v) }

#[target_feature(enable = "simd128")]
#[inline]
pub unsafe fn simd_iota_i16(offset: i16) -> Simd {
    i16x8_add_sat(i16x8_splat(offset), i16x8(0, 1, 2, 3, 4, 5, 6, 7))
}

#[target_feature(enable = "simd128")]
#[inline]
pub unsafe fn simd_adds_i16(a: Simd, b: Simd) -> Simd { i16x8_add_sat(a, b) }

#[target_feature(enable = "simd128")]
#[inline]
pub unsafe fn simd_max_i16(a: Simd, b: Simd) -> Simd { i16x8_max(a, b) }

#[target_feature(enable = "simd128")]
#[inline]
pub unsafe fn simd_min_i16(a: Simd, b: Simd) -> Simd { i16x8_min(a, b) }

#[target_feature(enable = "simd128")]
#[inline]
pub unsafe fn simd_cmpeq_i16(a: Simd, b: Simd) -> Simd { i16x8_eq(a, b) }

#[target_feature(enable = "simd128")]
#[inline]
pub unsafe fn simd_cmpgt_i16(a: Simd, b: Simd) -> Simd { i16x8_gt(a, b) }

/// Lanes of `b` where `mask` is set, lanes of `a` elsewhere.
#[target_feature(enable = "simd128")]
#[inline]
pub unsafe fn simd_blend_i16(a: Simd, b: Simd, mask: Simd) -> Simd { v128_bitselect(b, a, mask) }

#[target_feature(enable = "simd128")]
#[inline]
pub unsafe fn simd_and(a: Simd, b: Simd) -> Simd { v128_and(a, b) }

#[target_feature(enable = "simd128")]
#[inline]
pub unsafe fn simd_or(a: Simd, b: Simd) -> Simd { v128_or(a, b) }

#[target_feature(enable = "simd128")]
#[inline]
pub unsafe fn simd_load(ptr: *const Simd) -> Simd { v128_load(ptr) }

#[target_feature(enable = "simd128")]
#[inline]
pub unsafe fn simd_loadu(ptr: *const i16) -> Simd { v128_load(ptr as *const Simd) }

#[target_feature(enable = "simd128")]
#[inline]
pub unsafe fn simd_store(ptr: *mut Simd, a: Simd) { v128_store(ptr, a) }

#[target_feature(enable = "simd128")]
#[inline]
pub unsafe fn simd_storeu(ptr: *mut i16, a: Simd) { v128_store(ptr as *mut Simd, a) }

#[target_feature(enable = "simd128")]
#[inline]
pub unsafe fn simd_any(mask: Simd) -> bool { v128_any_true(mask) }

#[target_feature(enable = "simd128")]
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
