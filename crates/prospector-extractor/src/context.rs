//! Context window construction
//!
//! Designation, company and quote extraction all read the same neighborhood
//! around a mention, so they are cut here once per candidate.

use prospector_core::{ContextWindow, ProspectorError, Result, WindowStrategy};

use crate::text::{ceil_char_boundary, floor_char_boundary};

/// Builds context windows around entity spans
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextWindowBuilder {
    strategy: WindowStrategy,
}

impl ContextWindowBuilder {
    /// Create a builder with the given strategy
    pub fn new(strategy: WindowStrategy) -> Self {
        Self { strategy }
    }

    /// Cut the window around `start..end`
    ///
    /// `sentences` is only consulted for sentence windows; when the span falls
    /// outside every sentence the builder falls back to the default character
    /// window.
    pub fn build(
        &self,
        text: &str,
        start: usize,
        end: usize,
        sentences: &[(usize, usize)],
    ) -> Result<ContextWindow> {
        if start > end || end > text.len() {
            return Err(ProspectorError::InvalidSpan {
                start,
                end,
                len: text.len(),
            });
        }

        match self.strategy {
            WindowStrategy::Chars(half_width) => Ok(char_window(text, start, end, half_width)),
            WindowStrategy::Sentences(n) => Ok(sentence_window(text, start, end, sentences, n)
                .unwrap_or_else(|| {
                    char_window(text, start, end, prospector_core::DEFAULT_WINDOW_CHARS)
                })),
        }
    }
}

fn char_window(text: &str, start: usize, end: usize, half_width: usize) -> ContextWindow {
    let from = floor_char_boundary(text, start.saturating_sub(half_width));
    let to = ceil_char_boundary(text, end.saturating_add(half_width));
    slice(text, from, to)
}

fn sentence_window(
    text: &str,
    start: usize,
    end: usize,
    sentences: &[(usize, usize)],
    n: usize,
) -> Option<ContextWindow> {
    let first = sentences.iter().position(|&(s, e)| start < e && end >= s)?;
    let last = sentences
        .iter()
        .rposition(|&(s, e)| start < e && end >= s)
        .unwrap_or(first);

    let from_idx = first.saturating_sub(n);
    let to_idx = last.saturating_add(n).min(sentences.len() - 1);

    let from = floor_char_boundary(text, sentences[from_idx].0);
    let to = ceil_char_boundary(text, sentences[to_idx].1);
    Some(slice(text, from.min(start), to.max(end)))
}

fn slice(text: &str, from: usize, to: usize) -> ContextWindow {
    ContextWindow {
        text: text[from..to].to_string(),
        start: from,
        end: to,
    }
}
