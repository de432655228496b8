//! Pairwise alignment of rank sequences.
//!
//! ```
//! use pairwise_aligner::prelude::*;
//!
//! let config = (Mode::Global | Scoring::simple(1, -1) | Gaps::new(-2, -1) | Output::Alignment)
//!     .build()
//!     .unwrap();
//! let res = align(&[0, 1, 2, 3], &[0, 1, 3], &config).unwrap();
//! assert_eq!(res.score, 0);
//! assert_eq!(res.alignment.unwrap().cigar.to_string(), "2M1I1M");
//! ```

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "avx2", not(feature = "no_simd")))]
pub mod avx2;

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse2",
    not(target_feature = "avx2"),
    not(feature = "no_simd")
))]
pub mod sse2;

#[cfg(all(target_arch = "aarch64", target_feature = "neon", not(feature = "no_simd")))]
pub mod neon;

#[cfg(all(target_arch = "wasm32", target_feature = "simd128", not(feature = "no_simd")))]
pub mod simd128;

#[cfg(any(
    feature = "no_simd",
    not(any(
        all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"),
        all(target_arch = "aarch64", target_feature = "neon"),
        all(target_arch = "wasm32", target_feature = "simd128")
    ))
))]
pub mod fallback;

pub mod simd;

pub mod align;
pub mod band;
pub mod cigar;
pub mod config;
pub mod error;
pub mod scan_batch;
pub mod scan_scalar;
pub mod scores;
pub mod simulate;
pub mod trace;

pub mod prelude {
    pub use crate::align::{align, align_pairwise, AlignResult};
    pub use crate::band::Band;
    pub use crate::cigar::{Alignment, Cigar, Operation};
    pub use crate::config::{Config, ConfigBuilder, FreeEnds, Mode, Output, Strategy};
    pub use crate::error::{AlignmentError, ConfigurationError, Error, Result};
    pub use crate::scores::{Gaps, MatchMismatch, Matrix, Scoring, SubMatrix};
}
