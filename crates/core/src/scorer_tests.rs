// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

fn score(text: &str) -> f64 {
    Scorer::new().score(text, true, 0.85)
}

#[test]
fn positive_single_keyword() {
    assert_eq!(score("good"), 1.0);
}

#[test]
fn positive_multiple_keywords_clamped() {
    assert_eq!(score("great excellent amazing"), 5.0);
}

#[test]
fn negative_single_keyword() {
    assert_eq!(score("bad"), -2.0);
}

#[test]
fn negative_multiple_keywords_clamped() {
    assert_eq!(score("terrible awful horrible"), -5.0);
}

#[test]
fn neutral_keywords_score_zero() {
    assert_eq!(score("okay fine average"), 0.0);
}

#[test]
fn no_keywords_scores_zero() {
    assert_eq!(score("the driver arrived"), 0.0);
}

#[test]
fn mixed_sentiment_positive_dominant() {
    assert_eq!(score("great but slow"), 2.0 - 1.0);
}

#[test]
fn mixed_sentiment_negative_dominant() {
    assert_eq!(score("terrible but nice"), -3.0 + 1.0);
}

#[test]
fn empty_and_whitespace_score_zero() {
    assert_eq!(score(""), 0.0);
    assert_eq!(score("   "), 0.0);
}

#[test]
fn punctuation_is_stripped_from_tokens() {
    assert_eq!(score("great! excellent. amazing,"), 5.0);
}

#[test]
fn scoring_is_case_insensitive() {
    assert_eq!(score("GREAT"), 2.0);
    assert_eq!(score("Great"), 2.0);
    assert_eq!(score("great"), 2.0);
}

#[test]
fn realistic_positive_feedback_matches_spec_example() {
    // S3 half: "great" + "professional" intensified by "very".
    assert_eq!(score("The driver was great and very professional"), 2.0 + 3.0);
}

#[test]
fn s1_realistic_negative_feedback() {
    assert_eq!(score("The driver was rude and late"), -3.0);
}

#[test]
fn realistic_mixed_feedback() {
    assert_eq!(score("The driver was nice but the car was dirty"), 1.0 - 2.0);
}

#[test]
fn s3_intensifier_applies_to_following_token() {
    // great(+2) + professional(+2) * very(1.5) = 2 + 3 = 5, clamped to 5.
    assert_eq!(score("great service, very professional"), 5.0);
}

#[test]
fn s4_negation_applies_080_factor() {
    // bad(-2) negated -> -(-2)*0.8 = 1.6
    assert_eq!(score("not bad"), 1.6);
}

#[test]
fn s5_neutral_context_dominant_scores_zero() {
    assert_eq!(score("the driver arrived at the destination"), 0.0);
}

#[test]
fn dangling_intensifier_at_end_contributes_nothing() {
    // "very" has no following token to modify -- the python reference breaks
    // the scan, contributing nothing for the dangling modifier.
    assert_eq!(score("good very"), 1.0);
}

#[test]
fn diminisher_scales_the_following_keyword() {
    // slightly(0.5) * bad(-2) = -1.0
    assert_eq!(score("slightly bad"), -1.0);
}

#[test]
fn diminisher_word_shared_with_negations_also_negates() {
    // "barely" is both a diminisher (0.4x on "bad") and a negation trigger
    // for the token it precedes: (-2 * 0.4) negated -> -(-0.8) * 0.8 = 0.64.
    assert_eq!(score("it was barely bad"), 0.64);
}

#[test]
fn short_tokens_never_use_fuzzy_matching() {
    // "ok" already matches exactly at 0; a 2-char nonsense token must not
    // fuzzy-resolve to anything even though fuzzy matching is enabled.
    assert_eq!(score("it ok"), 0.0);
}

#[test]
fn cache_can_be_cleared_without_changing_results() {
    let scorer = Scorer::new();
    let before = scorer.score("the servixe was terible", true, 0.85);
    scorer.clear_cache();
    let after = scorer.score("the servixe was terible", true, 0.85);
    assert_eq!(before, after);
}

#[test]
fn fuzzy_matching_resolves_near_miss_spelling() {
    // "terible" is one transposition away from "terrible" (-3); with fuzzy
    // matching on it should resolve, with it off it should not.
    let scorer = Scorer::new();
    let with_fuzzy = scorer.score("terible", true, 0.85);
    let without_fuzzy = scorer.score("terible", false, 0.85);
    assert_eq!(without_fuzzy, 0.0);
    assert_ne!(with_fuzzy, without_fuzzy);
}

#[test]
fn category_buckets_match_sign_and_midpoint() {
    assert_eq!(category(-2.0), Category::Negative);
    assert_eq!(category(0.0), Category::Neutral);
    assert_eq!(category(2.0), Category::Positive);
    assert_eq!(category(0.5), Category::Neutral);
    assert_eq!(category(-0.5), Category::Neutral);
}

#[test]
fn similarity_ratio_matches_known_difflib_values() {
    assert_eq!(similarity_ratio("", ""), 1.0);
    assert_eq!(similarity_ratio("abc", "abc"), 1.0);
    assert_eq!(similarity_ratio("abc", "xyz"), 0.0);
    // difflib.SequenceMatcher(None, "terible", "terrible").ratio() == 14/15
    assert!((similarity_ratio("terible", "terrible") - (14.0 / 15.0)).abs() < 1e-9);
}

proptest! {
    #[test]
    fn score_is_always_in_range(text in ".{0,200}") {
        let s = score(&text);
        prop_assert!((-5.0..=5.0).contains(&s));
    }

    #[test]
    fn zero_score_is_always_explained_by_spec_clause(text in "[a-zA-Z ]{0,120}") {
        let scorer = Scorer::new();
        let tokens: Vec<String> = text
            .to_lowercase()
            .split_whitespace()
            .filter_map(|w| {
                let t = w.trim_matches(STRIP_CHARS);
                if t.is_empty() { None } else { Some(t.to_owned()) }
            })
            .collect();
        let s = scorer.score(&text, true, 0.85);
        if s == 0.0 && !tokens.is_empty() {
            let neutral_count = tokens.iter().filter(|t| NEUTRAL_SET.contains(t.as_str())).count();
            let neutral_ratio = neutral_count as f64 / tokens.len() as f64;
            let raw = scorer.match_keywords(&tokens, true, 0.85);
            let threshold = match tokens.len() {
                0..=3 => 0.3,
                4..=10 => 0.5,
                _ => 0.7,
            };
            let explained = neutral_ratio > 0.4
                || raw.abs() <= threshold
                || raw.clamp(-5.0, 5.0).abs() <= 0.5;
            prop_assert!(explained);
        }
    }
}
