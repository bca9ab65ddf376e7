#![feature(test)]

extern crate test;

use test::Bencher;
use wordle_forge::details::*;
use wordle_forge::*;

fn synthetic_bank() -> WordBank {
    // Deterministic pseudo-words spanning the alphabet.
    let words: Vec<String> = (0..2000u32)
        .map(|i| {
            (0..5)
                .map(|j| (b'a' + ((i * 7 + j * 13 + i / 26) % 26) as u8) as char)
                .collect()
        })
        .collect();
    WordBank::from_iterator(words)
}

#[bench]
fn bench_filter_full_dictionary(b: &mut Bencher) {
    let bank = synthetic_bank();
    let record = GuessRecord::new("crane", feedback("crane", "slate").unwrap());
    let constraints = ConstraintSet::from_record(&record).unwrap();
    let ids = bank.all_ids();

    b.iter(|| filter_candidates(&bank, &ids, &constraints))
}
