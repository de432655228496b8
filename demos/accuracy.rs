use rand::prelude::*;

use bio::alignment::pairwise::Aligner;
use bio::scores::blosum62;

use pairwise_aligner::prelude::*;
use pairwise_aligner::scores::BLOSUM62_ORDER;
use pairwise_aligner::simulate::*;

fn letters(ranks: &[u8]) -> Vec<u8> {
    ranks.iter().map(|&r| BLOSUM62_ORDER[r as usize]).collect()
}

fn decode(r: u8) -> char {
    BLOSUM62_ORDER[r as usize] as char
}

fn test(iter: usize, len: usize, k: usize, config: &Config) -> usize {
    let mut wrong = 0usize;
    let mut rng = StdRng::seed_from_u64(1234);

    let pairs = (0..iter)
        .map(|_| {
            let r = rand_str(len, &AMINO_ACIDS, &mut rng);
            let q = rand_mutate(&r, k, &AMINO_ACIDS, &mut rng);
            (q, r)
        })
        .collect::<Vec<_>>();

    let results = align_pairwise(pairs.iter().map(|(q, r)| (q, r)), config);

    for ((q, r), res) in pairs.iter().zip(results) {
        let res = match res {
            Ok(res) => res,
            Err(e) => {
                println!("error: {}", e);
                wrong += 1;
                continue;
            }
        };

        // rust-bio
        let mut bio_aligner = Aligner::with_capacity(q.len(), r.len(), -10, -1, &blosum62);
        let bio_score = bio_aligner.global(&letters(q), &letters(r)).score;

        if bio_score != res.score {
            wrong += 1;
            println!("bio: {}, ours: {}, k: {}", bio_score, res.score, k);
            if let Some(alignment) = &res.alignment {
                let (begin, end) = (alignment.begin, alignment.end);
                let (a, b) = alignment.cigar.format_with(&q[begin.0..end.0], &r[begin.1..end.1], decode);
                println!("{}\n{}\n{}", alignment.cigar, a, b);
            }
        }
    }

    wrong
}

fn main() {
    let iter = 100;
    let lens = [5, 10, 20, 50, 100];
    let rcp_ks = [10, 5];

    let mut total_wrong = 0usize;
    let mut total = 0usize;

    for &strategy in [Strategy::Scalar, Strategy::Simd].iter() {
        let config = (Scoring::blosum62() | Gaps::new(-10, -1) | Output::Alignment | strategy).build().unwrap();

        for &len in &lens {
            for &rcp_k in &rcp_ks {
                let wrong = test(iter, len, len / rcp_k, &config);
                println!("\n{:?} len: {}, 1/k: {}, iter: {}, wrong: {}\n", strategy, len, rcp_k, iter, wrong);
                total_wrong += wrong;
                total += iter;
            }
        }
    }

    println!("\ntotal: {}, wrong: {}", total, total_wrong);
    println!("Done!");
}
