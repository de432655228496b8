//! Random rank sequences and mutations for tests and benchmarks.

use rand::prelude::*;

/// Ranks of the 20 standard amino acids in [`BLOSUM62_ORDER`](crate::scores::BLOSUM62_ORDER).
pub static AMINO_ACIDS: [u8; 20] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19];

/// Ranks of `A`, `C`, `G`, `T`.
pub static NUC: [u8; 4] = [0, 1, 2, 3];

/// Mutate `a` with [`rand_mutate`], then insert a random run of `insert_len` ranks.
pub fn rand_mutate_insert<R: Rng>(a: &[u8], k: usize, alpha: &[u8], insert_len: usize, rng: &mut R) -> Vec<u8> {
    let b = rand_mutate(a, k, alpha, rng);
    let insert = rand_str(insert_len, alpha, rng);
    let idx = if b.len() > 1 { rng.gen_range(1..b.len()) } else { b.len() };
    let mut res = Vec::with_capacity(b.len() + insert_len);
    res.extend_from_slice(&b[..idx]);
    res.extend_from_slice(&insert);
    res.extend_from_slice(&b[idx..]);
    res
}

/// Apply between `3k/4` and `k` random substitutions, insertions and deletions to `a`.
///
/// `alpha` must hold at least two ranks.
pub fn rand_mutate<R: Rng>(a: &[u8], k: usize, alpha: &[u8], rng: &mut R) -> Vec<u8> {
    let mut edits = vec![Edit::Same; a.len()];
    let curr_k = rng.gen_range(k * 3 / 4..k + 1).min(a.len());
    let mut idx: Vec<usize> = (0usize..a.len()).collect();
    idx.shuffle(rng);

    for &i in idx.iter().take(curr_k) {
        edits[i] = match rng.gen_range(0u8..3u8) {
            0 => Edit::Substitute,
            1 => Edit::Insert,
            _ => Edit::Delete
        };
    }

    let mut b = Vec::with_capacity(a.len() + curr_k);

    for (&c, edit) in a.iter().zip(edits.iter()) {
        match edit {
            Edit::Same => b.push(c),
            Edit::Substitute => {
                let mut iter = alpha.choose_multiple(rng, 2);
                match (iter.next(), iter.next()) {
                    (Some(&first), Some(&second)) => b.push(if first == c { second } else { first }),
                    _ => b.push(c)
                }
            },
            Edit::Insert => {
                if let Some(&ins) = alpha.choose(rng) {
                    b.push(ins);
                }
                b.push(c);
            },
            Edit::Delete => ()
        }
    }

    b
}

#[derive(Copy, Clone, PartialEq)]
enum Edit {
    Same,
    Substitute,
    Insert,
    Delete
}

/// `length` ranks drawn uniformly from `alpha`.
pub fn rand_str<R: Rng>(length: usize, alpha: &[u8], rng: &mut R) -> Vec<u8> {
    (0..length).filter_map(|_| alpha.choose(rng).copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn test_rand_str() {
        let mut rng = StdRng::seed_from_u64(1234);
        let s = rand_str(100, &NUC, &mut rng);
        assert_eq!(s.len(), 100);
        assert!(s.iter().all(|&c| c < 4));
    }

    #[test]
    fn test_rand_mutate() {
        let mut rng = StdRng::seed_from_u64(1234);
        let a = rand_str(200, &AMINO_ACIDS, &mut rng);
        let b = rand_mutate(&a, 20, &AMINO_ACIDS, &mut rng);
        assert!(b.len() >= a.len() - 20 && b.len() <= a.len() + 20);
        assert!(b.iter().all(|&c| c < 20));

        let c = rand_mutate_insert(&a, 20, &AMINO_ACIDS, 50, &mut rng);
        assert!(c.len() >= a.len() + 30);

        assert_eq!(rand_mutate(&a, 0, &AMINO_ACIDS, &mut rng), a);
        assert_eq!(rand_mutate_insert(&[], 0, &NUC, 3, &mut rng).len(), 3);
    }
}
