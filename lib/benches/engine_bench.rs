#![feature(test)]

extern crate test;

use test::Bencher;
use wordle_forge::*;

#[bench]
fn bench_generate_small_dictionary(b: &mut Bencher) {
    let words = vec![
        "crate", "trace", "slate", "crane", "plant", "stare", "salad", "melee", "steel", "mount",
        "pouch", "gravy", "whisk", "blimp", "fjord", "squib", "dodge", "lymph", "vexed", "junta",
    ];
    let mut generator = Generator::with_seed(
        WordBank::from_iterator(words),
        FrequencyTable::default(),
        GeneratorConfig {
            max_attempts: 50,
            ..GeneratorConfig::default()
        },
        42,
    )
    .unwrap();

    b.iter(|| generator.generate(Some("plant")))
}
