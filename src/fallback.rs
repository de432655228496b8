//! Portable lane emulation used when no SIMD backend is available or the `no_simd` feature is on.
//!
//! Mirrors the signatures of the intrinsic backends so the batch engine compiles unchanged.

pub const L: usize = 8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(C, align(16))]
pub struct Simd([i16; L]);

#[inline(always)]
fn map2(a: Simd, b: Simd, f: impl Fn(i16, i16) -> i16) -> Simd {
    let mut res = [0i16; L];
    for i in 0..L {
        res[i] = f(a.0[i], b.0[i]);
    }
    Simd(res)
}

#[inline(always)]
fn mask(b: bool) -> i16 {
    if b { -1 } else { 0 }
}

#[inline]
pub unsafe fn simd_set1_i16(v: i16) -> Simd { Simd([v; L]) }

#[inline]
pub unsafe fn simd_iota_i16(offset: i16) -> Simd {
    let mut res = [0i16; L];
    for (i, r) in res.iter_mut().enumerate() {
        *r = offset.saturating_add(i as i16);
    }
    Simd(res)
}

#[inline]
pub unsafe fn simd_adds_i16(a: Simd, b: Simd) -> Simd { map2(a, b, |x, y| x.saturating_add(y)) }

#[inline]
pub unsafe fn simd_max_i16(a: Simd, b: Simd) -> Simd { map2(a, b, |x, y| x.max(y)) }

#[inline]
pub unsafe fn simd_min_i16(a: Simd, b: Simd) -> Simd { map2(a, b, |x, y| x.min(y)) }

#[inline]
pub unsafe fn simd_cmpeq_i16(a: Simd, b: Simd) -> Simd { map2(a, b, |x, y| mask(x == y)) }

#[inline]
pub unsafe fn simd_cmpgt_i16(a: Simd, b: Simd) -> Simd { map2(a, b, |x, y| mask(x > y)) }

/// Lanes of `b` where `mask` is set, lanes of `a` elsewhere.
#[inline]
pub unsafe fn simd_blend_i16(a: Simd, b: Simd, mask: Simd) -> Simd {
    let mut res = a.0;
    for i in 0..L {
        if mask.0[i] != 0 {
            res[i] = b.0[i];
        }
    }
    Simd(res)
}

#[inline]
pub unsafe fn simd_and(a: Simd, b: Simd) -> Simd { map2(a, b, |x, y| x & y) }

#[inline]
pub unsafe fn simd_or(a: Simd, b: Simd) -> Simd { map2(a, b, |x, y| x | y) }

#[inline]
pub unsafe fn simd_load(ptr: *const Simd) -> Simd { *ptr }

#[inline]
pub unsafe fn simd_loadu(ptr: *const i16) -> Simd {
    let mut res = [0i16; L];
    std::ptr::copy_nonoverlapping(ptr, res.as_mut_ptr(), L);
    Simd(res)
}

#[inline]
pub unsafe fn simd_store(ptr: *mut Simd, a: Simd) { *ptr = a; }

#[inline]
pub unsafe fn simd_storeu(ptr: *mut i16, a: Simd) { std::ptr::copy_nonoverlapping(a.0.as_ptr(), ptr, L); }

#[inline]
pub unsafe fn simd_any(mask: Simd) -> bool { mask.0.iter().any(|&m| m != 0) }

#[allow(dead_code)]
pub unsafe fn simd_dbg_i16(v: Simd) {
    for i in (0..L).rev() {
        print!("{:6} ", v.0[i]);
    }
    println!();
}
