use bio::alignment::pairwise::Aligner;
use bio::scores::blosum62;
use rand::rngs::StdRng;
use rand::SeedableRng;

use pairwise_aligner::prelude::*;
use pairwise_aligner::scores::BLOSUM62_ORDER;
use pairwise_aligner::simulate::*;

fn letters(ranks: &[u8]) -> Vec<u8> {
    ranks.iter().map(|&r| BLOSUM62_ORDER[r as usize]).collect()
}

#[test]
fn nucleotides_match_bio() {
    let mut rng = StdRng::seed_from_u64(42);
    let score_fn = |a: u8, b: u8| if a == b { 2i32 } else { -3i32 };
    let mut aligner = Aligner::new(-5, -2, score_fn);

    let base = Scoring::simple(2, -3) | Gaps::new(-5, -2);
    let global = base.clone().build().unwrap();
    let local = (base.clone() | Mode::Local).build().unwrap();
    let semi = (base | Mode::SemiGlobal(FreeEnds::SEQ2_LEADING | FreeEnds::SEQ2_TRAILING)).build().unwrap();

    for len in [1usize, 10, 50, 120].iter() {
        for _ in 0..10 {
            let r = rand_str(*len, &NUC, &mut rng);
            let q = rand_mutate(&r, len / 10 + 1, &NUC, &mut rng);

            assert_eq!(align(&q, &r, &global).unwrap().score, aligner.global(&q, &r).score);
            assert_eq!(align(&q, &r, &local).unwrap().score, aligner.local(&q, &r).score);
            // bio aligns x fully and leaves the ends of y free
            assert_eq!(align(&q, &r, &semi).unwrap().score, aligner.semiglobal(&q, &r).score);
        }
    }
}

#[test]
fn proteins_match_bio() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut aligner = Aligner::new(-11, -1, &blosum62);
    let config = (Scoring::blosum62() | Gaps::new(-11, -1) | Output::Alignment).build().unwrap();

    for _ in 0..20 {
        let r = rand_str(80, &AMINO_ACIDS, &mut rng);
        let q = rand_mutate_insert(&r, 10, &AMINO_ACIDS, 8, &mut rng);
        let res = align(&q, &r, &config).unwrap();
        assert_eq!(res.score, aligner.global(&letters(&q), &letters(&r)).score);

        let alignment = res.alignment.unwrap();
        assert_eq!(alignment.rescore(config.scoring(), &config.gaps()), res.score);
    }
}
