//! The SIMD backend selected for this target.
//!
//! Every backend provides the same set of 16-bit lane primitives: `simd_set1_i16` (fill),
//! `simd_iota_i16`, `simd_blend_i16`, `simd_min_i16`/`simd_max_i16`, saturating add, compares,
//! bitwise and/or, aligned and unaligned loads and stores, and `simd_any`.

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "avx2", not(feature = "no_simd")))]
pub use crate::avx2::*;

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse2",
    not(target_feature = "avx2"),
    not(feature = "no_simd")
))]
pub use crate::sse2::*;

#[cfg(all(target_arch = "aarch64", target_feature = "neon", not(feature = "no_simd")))]
pub use crate::neon::*;

#[cfg(all(target_arch = "wasm32", target_feature = "simd128", not(feature = "no_simd")))]
pub use crate::simd128::*;

#[cfg(any(
    feature = "no_simd",
    not(any(
        all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"),
        all(target_arch = "aarch64", target_feature = "neon"),
        all(target_arch = "wasm32", target_feature = "simd128")
    ))
))]
pub use crate::fallback::*;

/// Lane-sized scratch buffer aligned for `simd_load`/`simd_store`.
#[derive(Copy, Clone)]
#[repr(C, align(32))]
pub struct Aligned(pub [i16; L]);

impl Aligned {
    #[inline]
    pub fn new(v: i16) -> Self {
        Aligned([v; L])
    }

    #[inline]
    pub unsafe fn load(&self) -> Simd {
        simd_load(self.0.as_ptr() as *const Simd)
    }

    #[inline]
    pub unsafe fn store(&mut self, v: Simd) {
        simd_store(self.0.as_mut_ptr() as *mut Simd, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lanes(v: Simd) -> [i16; L] {
        let mut a = Aligned::new(0);
        unsafe { a.store(v) };
        a.0
    }

    #[test]
    fn test_fill_iota() {
        unsafe {
            assert_eq!(lanes(simd_set1_i16(-7)), [-7; L]);
            let iota = lanes(simd_iota_i16(5));
            for (i, &v) in iota.iter().enumerate() {
                assert_eq!(v, 5 + i as i16);
            }
        }
    }

    #[test]
    fn test_blend_min_max() {
        unsafe {
            let iota = simd_iota_i16(0);
            let mid = simd_set1_i16((L / 2) as i16);
            let mask = simd_cmpgt_i16(iota, mid);
            let blend = lanes(simd_blend_i16(mid, iota, mask));
            let max = lanes(simd_max_i16(iota, mid));
            let min = lanes(simd_min_i16(iota, mid));
            for i in 0..L {
                let v = i as i16;
                let m = (L / 2) as i16;
                assert_eq!(blend[i], if v > m { v } else { m });
                assert_eq!(max[i], v.max(m));
                assert_eq!(min[i], v.min(m));
            }
            assert!(simd_any(mask));
            assert!(!simd_any(simd_cmpgt_i16(mid, mid)));
            assert!(simd_any(simd_cmpeq_i16(iota, mid)));
        }
    }

    #[test]
    fn test_saturating_and_bits() {
        unsafe {
            let neg_inf = simd_set1_i16(i16::MIN);
            assert_eq!(lanes(simd_adds_i16(neg_inf, simd_set1_i16(-3))), [i16::MIN; L]);
            assert_eq!(lanes(simd_adds_i16(simd_set1_i16(i16::MAX), simd_set1_i16(3))), [i16::MAX; L]);
            assert_eq!(lanes(simd_or(simd_set1_i16(0b0101), simd_set1_i16(0b0010))), [0b0111; L]);
            assert_eq!(lanes(simd_and(simd_set1_i16(0b0110), simd_set1_i16(0b0011))), [0b0010; L]);
        }
    }

    #[test]
    fn test_load_store() {
        unsafe {
            let src: Vec<i16> = (0..(L as i16 + 3)).collect();
            let v = simd_loadu(src.as_ptr().add(3));
            let out = lanes(v);
            for i in 0..L {
                assert_eq!(out[i], i as i16 + 3);
            }

            let mut dst = vec![0i16; L + 1];
            simd_storeu(dst.as_mut_ptr().add(1), v);
            assert_eq!(&dst[1..], &out[..]);

            let mut a = Aligned::new(0);
            a.store(v);
            assert_eq!(lanes(a.load()), out);
        }
    }
}
