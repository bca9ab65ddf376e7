#![cfg(feature = "serde")]

use serde_json::json;
use wordle_forge::*;

#[test]
fn colors_serialize_as_lowercase_names() {
    let pattern = feedback("crane", "slate").unwrap();

    let value = serde_json::to_value(pattern).unwrap();
    assert_eq!(value, json!(["gray", "gray", "green", "gray", "green"]));
}

#[test]
fn pattern_round_trips_through_json() {
    let pattern = feedback("llama", "salad").unwrap();

    let text = serde_json::to_string(&pattern).unwrap();
    let decoded: ColorPattern = serde_json::from_str(&text).unwrap();
    assert_eq!(decoded, pattern);
}

#[test]
fn puzzle_serializes_for_the_request_layer() {
    let mut generator = Generator::with_seed(
        WordBank::from_iterator(vec!["plant", "pbcde", "lfghi", "ajkmo", "nqrsu", "tvwxy"]),
        FrequencyTable::default(),
        GeneratorConfig::default(),
        8,
    )
    .unwrap();
    let puzzle = generator.generate(Some("plant")).unwrap();

    let value = serde_json::to_value(&puzzle).unwrap();
    assert_eq!(value["answer"], json!("plant"));
    assert_eq!(value["remaining_candidates"], json!(1));
    assert_eq!(value["status"], json!("optimal"));
    let guesses = value["guesses"].as_array().unwrap();
    assert_eq!(guesses.len(), PUZZLE_GUESSES);
    for guess in guesses {
        assert!(guess["word"].is_string());
        assert_eq!(guess["pattern"].as_array().unwrap().len(), WORD_LEN);
    }

    let decoded: Puzzle = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, puzzle);
}
