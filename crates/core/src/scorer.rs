// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rule-based sentiment scorer: a pure `text -> score` function with a fixed
//! lexicon, intensifier/diminisher modifiers, negation scope, neutral-context
//! detection, and an optional approximate-match fallback.
//!
//! No step here ever suspends or fails; unscoreable input simply scores 0.0.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

const STRIP_CHARS: &[char] = &['.', ',', '!', '?', ';', ':', '(', ')', '[', ']', '{', '}', '"', '\'', '-'];

/// base score, lowercase term. Order is the canonical table order from spec §6;
/// fuzzy matching scans it in this order so ties resolve the same way every run.
const LEXICON_ENTRIES: &[(&str, i32)] = &[
    // -3
    ("terrible", -3), ("awful", -3), ("horrible", -3), ("worst", -3), ("disgusting", -3),
    ("appalling", -3), ("atrocious", -3), ("dreadful", -3), ("abysmal", -3), ("pathetic", -3),
    ("useless", -3), ("nightmare", -3), ("disaster", -3), ("catastrophe", -3),
    // -2
    ("bad", -2), ("poor", -2), ("disappointing", -2), ("rude", -2), ("unprofessional", -2),
    ("dirty", -2), ("unacceptable", -2), ("inadequate", -2), ("inferior", -2), ("subpar", -2),
    ("unsatisfactory", -2), ("unpleasant", -2), ("annoying", -2), ("frustrating", -2),
    ("careless", -2), ("sloppy", -2), ("messy", -2), ("smelly", -2), ("broken", -2),
    ("damaged", -2), ("unsafe", -2), ("dangerous", -2), ("scary", -2), ("worried", -2),
    // -1
    ("late", -1), ("slow", -1), ("uncomfortable", -1), ("mediocre", -1), ("lacking", -1),
    ("substandard", -1), ("below", -1), ("minor", -1), ("issue", -1), ("problem", -1),
    ("concern", -1), ("delay", -1), ("wait", -1), ("waiting", -1), ("cold", -1),
    ("noisy", -1), ("loud", -1), ("cramped", -1), ("tight", -1), ("old", -1),
    ("worn", -1), ("tired", -1), ("confused", -1), ("lost", -1), ("wrong", -1),
    // 0
    ("okay", 0), ("fine", 0), ("average", 0), ("normal", 0), ("standard", 0),
    ("regular", 0), ("typical", 0), ("usual", 0), ("acceptable", 0), ("adequate", 0),
    ("decent", 0), ("fair", 0), ("moderate", 0), ("reasonable", 0), ("satisfactory", 0),
    ("alright", 0), ("ok", 0), ("so-so", 0), ("nothing", 0), ("basic", 0),
    // +1
    ("good", 1), ("nice", 1), ("helpful", 1), ("friendly", 1), ("clean", 1),
    ("polite", 1), ("courteous", 1), ("kind", 1), ("gentle", 1),
    ("patient", 1), ("understanding", 1), ("accommodating", 1), ("cooperative", 1),
    ("reliable", 1), ("punctual", 1), ("timely", 1), ("efficient", 1), ("smooth", 1),
    ("easy", 1), ("simple", 1), ("convenient", 1), ("comfortable", 1), ("safe", 1),
    // +2
    ("great", 2), ("excellent", 2), ("amazing", 2), ("professional", 2), ("superb", 2),
    ("impressive", 2), ("wonderful", 2), ("fantastic", 2), ("brilliant", 2), ("awesome", 2),
    ("terrific", 2), ("fabulous", 2), ("marvelous", 2), ("splendid", 2), ("delightful", 2),
    ("enjoyable", 2), ("pleasant", 2), ("satisfying", 2), ("quality", 2), ("top", 2),
    ("best", 2), ("superior", 2), ("premium", 2), ("first-class", 2), ("high-quality", 2),
    // +3
    ("outstanding", 3), ("perfect", 3), ("exceptional", 3), ("extraordinary", 3),
    ("phenomenal", 3), ("magnificent", 3), ("spectacular", 3), ("incredible", 3),
    ("unbelievable", 3), ("remarkable", 3), ("exemplary", 3), ("flawless", 3),
    ("impeccable", 3), ("pristine", 3), ("supreme", 3), ("ultimate", 3),
];

const NEGATION_WORDS: &[&str] = &[
    "not", "no", "never", "neither", "nobody", "nothing", "nowhere",
    "hardly", "barely", "scarcely", "rarely", "seldom", "without",
    "don't", "doesn't", "didn't", "won't", "wouldn't", "can't", "cannot",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.5), ("extremely", 2.0), ("incredibly", 2.0), ("absolutely", 1.8),
    ("really", 1.3), ("quite", 1.2), ("pretty", 1.1), ("fairly", 1.1),
    ("totally", 1.8), ("completely", 1.8), ("utterly", 2.0), ("highly", 1.5),
];

const DIMINISHERS: &[(&str, f64)] = &[
    ("slightly", 0.5), ("somewhat", 0.6), ("barely", 0.4), ("hardly", 0.3),
];

const NEUTRAL_CONTEXT: &[&str] = &[
    "was", "were", "is", "are", "had", "have", "got", "went", "came",
    "arrived", "left", "took", "picked", "dropped", "drove", "ride",
    "trip", "journey", "time", "minutes", "hours", "destination",
    "location", "address", "street", "road", "traffic", "weather",
];

static LEXICON: LazyLock<HashMap<&'static str, i32>> =
    LazyLock::new(|| LEXICON_ENTRIES.iter().copied().collect());
static NEGATIONS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| NEGATION_WORDS.iter().copied().collect());
static INTENSIFIER_MAP: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| INTENSIFIERS.iter().copied().collect());
static DIMINISHER_MAP: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| DIMINISHERS.iter().copied().collect());
static NEUTRAL_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| NEUTRAL_CONTEXT.iter().copied().collect());

/// Coarse sentiment bucket derived from a score. Performs no independent
/// analysis — it only buckets an already-computed score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Negative,
    Neutral,
    Positive,
}

/// Bucket a score into `{negative, neutral, positive}`.
pub fn category(score: f64) -> Category {
    if score < -0.5 {
        Category::Negative
    } else if score > 0.5 {
        Category::Positive
    } else {
        Category::Neutral
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter_map(|w| {
            let trimmed = w.trim_matches(STRIP_CHARS);
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_owned())
            }
        })
        .collect()
}

/// Ratcliff/Obershelp similarity ratio in `[0, 1]`, matching Python's
/// `difflib.SequenceMatcher.ratio()`.
fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let matched = matching_chars(&a, &b);
    2.0 * matched as f64 / (a.len() + b.len()) as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (ai, bi, size) = longest_match(a, b);
    if size == 0 {
        return 0;
    }
    size + matching_chars(&a[..ai], &b[..bi]) + matching_chars(&a[ai + size..], &b[bi + size..])
}

/// Longest common contiguous run between `a` and `b`. Ties go to the match
/// starting earliest in `a`, then earliest in `b`.
fn longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let (n, m) = (a.len(), b.len());
    if n == 0 || m == 0 {
        return (0, 0, 0);
    }
    let mut prev = vec![0usize; m + 1];
    let mut best = (0usize, 0usize, 0usize);
    for i in 0..n {
        let mut cur = vec![0usize; m + 1];
        for j in 0..m {
            if a[i] == b[j] {
                let len = prev[j] + 1;
                cur[j + 1] = len;
                if len > best.2 {
                    best = (i + 1 - len, j + 1 - len, len);
                }
            }
        }
        prev = cur;
    }
    best
}

fn best_fuzzy_match(token: &str, threshold: f64) -> Option<&'static str> {
    if token.chars().count() < 3 {
        return None;
    }
    let token_len = token.chars().count();
    let mut best: Option<(&'static str, f64)> = None;
    for &(word, _) in LEXICON_ENTRIES {
        let word_len = word.chars().count();
        if token_len.abs_diff(word_len) > 2 {
            continue;
        }
        let ratio = similarity_ratio(token, word);
        let beats_current = best.map(|(_, r)| ratio > r).unwrap_or(true);
        if beats_current && ratio >= threshold {
            best = Some((word, ratio));
        }
    }
    best.map(|(word, _)| word)
}

/// Stateful scorer holding the process-local approximate-match cache.
///
/// The cache maps a raw token to the keyword it approximately resolved to
/// (or `None` if nothing matched). It is read-mostly; a lost write under
/// concurrent access just means a keyword gets re-resolved once more.
pub struct Scorer {
    fuzzy_cache: RwLock<HashMap<String, Option<&'static str>>>,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer {
    pub fn new() -> Self {
        Self { fuzzy_cache: RwLock::new(HashMap::new()) }
    }

    /// Drop all cached approximate matches. Call after changing the fuzzy
    /// threshold — a cached match may no longer clear the new bar.
    pub fn clear_cache(&self) {
        self.fuzzy_cache.write().clear();
    }

    fn resolve_keyword(&self, token: &str, fuzzy_enabled: bool, fuzzy_threshold: f64) -> Option<i32> {
        if let Some(&score) = LEXICON.get(token) {
            return Some(score);
        }
        if !fuzzy_enabled {
            return None;
        }
        if let Some(cached) = self.fuzzy_cache.read().get(token) {
            return cached.map(|kw| LEXICON[kw]);
        }
        let resolved = best_fuzzy_match(token, fuzzy_threshold);
        self.fuzzy_cache.write().insert(token.to_owned(), resolved);
        resolved.map(|kw| LEXICON[kw])
    }

    fn match_keywords(&self, tokens: &[String], fuzzy_enabled: bool, fuzzy_threshold: f64) -> f64 {
        let mut total = 0.0;
        let mut i = 0;
        while i < tokens.len() {
            let mut intensity = 1.0;
            let mut idx = i;
            if let Some(&m) = INTENSIFIER_MAP.get(tokens[i].as_str()) {
                intensity = m;
                idx = i + 1;
            } else if let Some(&m) = DIMINISHER_MAP.get(tokens[i].as_str()) {
                intensity = m;
                idx = i + 1;
            }
            if idx >= tokens.len() {
                break;
            }

            let is_negated = (idx > 0 && NEGATIONS.contains(tokens[idx - 1].as_str()))
                || (idx > 1 && NEGATIONS.contains(tokens[idx - 2].as_str()));

            if let Some(base) = self.resolve_keyword(tokens[idx].as_str(), fuzzy_enabled, fuzzy_threshold) {
                let mut score = base as f64 * intensity;
                if is_negated {
                    score = -score * 0.8;
                }
                total += score;
            }

            i = idx + 1;
        }
        total
    }

    /// Score free-form feedback text. Always returns a finite value in
    /// `[-5, 5]`; never fails, even on empty or whitespace-only input.
    pub fn score(&self, text: &str, fuzzy_enabled: bool, fuzzy_threshold: f64) -> f64 {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let raw = self.match_keywords(&tokens, fuzzy_enabled, fuzzy_threshold);

        let neutral_count = tokens.iter().filter(|t| NEUTRAL_SET.contains(t.as_str())).count();
        let neutral_ratio = neutral_count as f64 / tokens.len().max(1) as f64;
        if neutral_ratio > 0.4 {
            return 0.0;
        }

        let threshold = match tokens.len() {
            0..=3 => 0.3,
            4..=10 => 0.5,
            _ => 0.7,
        };
        if raw.abs() <= threshold {
            return 0.0;
        }

        let clamped = raw.clamp(-5.0, 5.0);
        if clamped.abs() <= 0.5 {
            return 0.0;
        }
        clamped
    }
}

#[cfg(test)]
#[path = "scorer_tests.rs"]
mod tests;
