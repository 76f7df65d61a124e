use std::collections::HashMap;

use crate::data::model::Column;

// ---------------------------------------------------------------------------
// Text sampling and token frequency
// ---------------------------------------------------------------------------

/// How many leading non-null values feed the text sample.
pub const SAMPLE_VALUES: usize = 100;
/// How many ranked words the frequency bar chart shows.
pub const TOP_WORDS: usize = 20;

/// Punctuation trimmed from both ends of each token.
const STRIP_CHARS: &[char] = &[
    '.', ',', '!', '?', ':', ';', '(', ')', '[', ']', '"', '\'',
];

/// Join the first [`SAMPLE_VALUES`] non-null values of a column into one
/// whitespace-separated sample. None when the result is empty or
/// whitespace-only.
pub fn text_sample(col: &Column) -> Option<String> {
    let sample = col
        .text_values()
        .take(SAMPLE_VALUES)
        .collect::<Vec<_>>()
        .join(" ");
    if sample.trim().is_empty() {
        None
    } else {
        Some(sample)
    }
}

/// Tokenize a sample and rank word frequencies: whitespace split, lower-case,
/// surrounding punctuation trimmed, tokens of length <= 2 discarded. Count
/// descending, ties by first-encountered order.
pub fn word_frequencies(sample: &str) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for raw in sample.split_whitespace() {
        let word = raw.to_lowercase();
        let word = word.trim_matches(STRIP_CHARS);
        if word.chars().count() <= 2 {
            continue;
        }
        if !counts.contains_key(word) {
            order.push(word.to_string());
        }
        *counts.entry(word.to_string()).or_insert(0) += 1;
    }

    let mut entries: Vec<(String, usize)> = order
        .into_iter()
        .map(|w| {
            let n = counts[&w];
            (w, n)
        })
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

/// The ranked words driving the frequency bar chart.
pub fn top_words(sample: &str) -> Vec<(String, usize)> {
    let mut entries = word_frequencies(sample);
    entries.truncate(TOP_WORDS);
    entries
}

// ---------------------------------------------------------------------------
// Word cloud layout
// ---------------------------------------------------------------------------

pub const CLOUD_WIDTH: f32 = 800.0;
pub const CLOUD_HEIGHT: f32 = 400.0;

/// At most this many words are laid out.
const CLOUD_WORDS: usize = 60;
const MIN_FONT: f32 = 14.0;
const MAX_FONT: f32 = 64.0;
/// Rough advance width of a proportional glyph relative to font size.
const GLYPH_ASPECT: f32 = 0.55;

/// One placed word. `x`/`y` are the top-left corner inside the cloud rect.
#[derive(Debug, Clone)]
pub struct PlacedWord {
    pub text: String,
    pub size: f32,
    pub x: f32,
    pub y: f32,
}

/// An 800x400 white-background word cloud where single-word frequency alone
/// drives font size (no collocations). Words are packed row by row in
/// frequency order until the canvas is full.
#[derive(Debug, Clone)]
pub struct WordCloud {
    pub width: f32,
    pub height: f32,
    pub words: Vec<PlacedWord>,
}

pub fn word_cloud(sample: &str) -> WordCloud {
    let freqs = word_frequencies(sample);
    let mut words = Vec::new();

    if let Some(&(_, max_count)) = freqs.first() {
        let mut x = 0.0f32;
        let mut y = 0.0f32;
        let mut row_height = 0.0f32;

        for (word, count) in freqs.into_iter().take(CLOUD_WORDS) {
            // sqrt scaling keeps mid-frequency words readable.
            let rel = (count as f32 / max_count as f32).sqrt();
            let size = MIN_FONT + (MAX_FONT - MIN_FONT) * rel;
            let w = word.chars().count() as f32 * size * GLYPH_ASPECT;
            let h = size * 1.2;

            if x + w > CLOUD_WIDTH && x > 0.0 {
                x = 0.0;
                y += row_height;
                row_height = 0.0;
            }
            if y + h > CLOUD_HEIGHT {
                break;
            }
            words.push(PlacedWord {
                text: word,
                size,
                x,
                y,
            });
            x += w + size * 0.4;
            row_height = row_height.max(h);
        }
    }

    WordCloud {
        width: CLOUD_WIDTH,
        height: CLOUD_HEIGHT,
        words,
    }
}
