#[macro_use]
extern crate assert_matches;

use wordle_forge::*;

use Color::{Gray, Green, Yellow};

#[test]
fn feedback_basic_no_duplicates() {
    let pattern = feedback("crane", "slate").unwrap();

    assert_eq!(pattern, ColorPattern([Gray, Gray, Green, Gray, Green]));
}

#[test]
fn feedback_caps_duplicate_letters() {
    // "salad" holds one 'l' and two 'a's: the first 'l' of the guess claims
    // the only 'l', the second goes gray, and both spare 'a's turn yellow.
    let pattern = feedback("llama", "salad").unwrap();

    assert_eq!(pattern, ColorPattern([Yellow, Gray, Yellow, Gray, Yellow]));
}

#[test]
fn feedback_self_identity() {
    let pattern = feedback("stare", "stare").unwrap();

    assert!(pattern.is_all_green());
    assert_eq!(pattern.green_count(), 5);
}

#[test]
fn feedback_greens_take_priority_over_yellows() {
    let pattern = feedback("sassy", "mesas").unwrap();

    assert_eq!(pattern, ColorPattern([Yellow, Yellow, Green, Gray, Gray]));
}

#[test]
fn feedback_guess_with_more_copies_than_answer() {
    // Three 'e's guessed against an answer holding two: exactly two are
    // colored, the third is gray.
    let pattern = feedback("eerie", "steel").unwrap();

    assert_eq!(pattern, ColorPattern([Yellow, Yellow, Gray, Gray, Gray]));
}

#[test]
fn feedback_shifted_answer() {
    // The answer's letters rotated by one position leave nothing green.
    let pattern = feedback("ecrat", "crate").unwrap();

    assert_eq!(pattern.green_count(), 0);
    assert_eq!(pattern.yellow_count(), 5);
}

#[test]
fn feedback_rejects_malformed_input() {
    assert_matches!(feedback("stare", "star"), Err(PuzzleError::MalformedWord(_)));
    assert_matches!(
        feedback("Stare", "crane"),
        Err(PuzzleError::MalformedWord(_))
    );
    assert_matches!(
        feedback("st4re", "crane"),
        Err(PuzzleError::MalformedWord(_))
    );
}

#[test]
fn pattern_counts_cover_all_positions() {
    let pattern = feedback("crane", "slate").unwrap();

    assert_eq!(
        pattern.green_count()
            + pattern.yellow_count()
            + pattern.0.iter().filter(|c| **c == Gray).count(),
        WORD_LEN
    );
}
