//! Locate text selected in a rendered article inside its wikitext.
//!
//! Rendered HTML loses the markup between words (link targets, templates,
//! tags), so the selected words are matched loosely and every candidate is
//! scored by how well the words around it agree with the words around the
//! selection.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::Document;
use crate::Span;

const ADJACENT_WORD_COUNT: usize = 6;
const ADJACENT_GRAPHEME_COUNT: usize = 200;

/// What may sit between two selected words in wikitext: a link target with
/// its pipe, a template, an HTML tag, or any run of non-word characters.
const LOOSE_GAP: &str = r"(?:(?:\[\[[^\]\|]+\|)|\{\{[^\}]*\}\}|<[^>]*>|\W)+";

static PARENTHETICAL: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\(.*?\)").expect("parenthetical pattern is valid"));
static TEMPLATE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\{\{.*\}\}").expect("template pattern is valid"));
static NON_WORD: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\W+").expect("non-word pattern is valid"));

/// Text selected in rendered HTML, with the text on either side of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlSelection {
	pub text_before: String,
	pub target: String,
	pub text_after: String,
}

impl HtmlSelection {
	pub fn new(
		text_before: impl Into<String>,
		target: impl Into<String>,
		text_after: impl Into<String>,
	) -> Self {
		Self {
			text_before: text_before.into(),
			target: target.into(),
			text_after: text_after.into(),
		}
	}
}

/// Find the span of `wikitext` that best corresponds to `selection`.
///
/// Returns `None` when the target is empty or no candidate matches. Ties go
/// to the earliest candidate.
pub fn locate_selection(selection: &HtmlSelection, wikitext: &str) -> Option<Span> {
	let regex = loose_target_regex(&selection.target)?;
	let document = Document::new(wikitext);

	let words_before = last_words(&words_only(&selection.text_before), ADJACENT_WORD_COUNT);
	let words_after = first_words(&words_only(&selection.text_after), ADJACENT_WORD_COUNT);

	let mut best: Option<(isize, std::ops::Range<usize>)> = None;

	for candidate in regex.find_iter(wikitext) {
		let range = candidate.range();
		let score = score_candidate(&document, &range, &words_before, &words_after);

		match &best {
			Some((best_score, _)) if score <= *best_score => {}
			_ => best = Some((score, range)),
		}
	}

	let (score, range) = best?;
	tracing::debug!(score, start = range.start, "located selection in wikitext");
	Some(document.span_of(&range))
}

fn loose_target_regex(target: &str) -> Option<Regex> {
	let words: Vec<String> = target.split_whitespace().map(regex::escape).collect();
	if words.is_empty() {
		return None;
	}

	match Regex::new(&words.join(LOOSE_GAP)) {
		Ok(regex) => Some(regex),
		Err(error) => {
			tracing::warn!(%error, "could not build selection pattern");
			None
		}
	}
}

fn score_candidate(
	document: &Document<'_>,
	range: &std::ops::Range<usize>,
	words_before: &[String],
	words_after: &[String],
) -> isize {
	let start = document.grapheme_offset(range.start);
	let end = document.grapheme_offset(range.end);

	let before_start = document.byte_offset(start.saturating_sub(ADJACENT_GRAPHEME_COUNT));
	let after_end = document.byte_offset(end + ADJACENT_GRAPHEME_COUNT);

	let wikitext_before = words_only(&document[before_start..range.start]);
	let wikitext_after = words_only(&document[range.end..after_end]);

	let mut html_before = words_before.to_vec();
	html_before.reverse();
	let mut wikitext_words_before = last_words(&wikitext_before, ADJACENT_WORD_COUNT);
	wikitext_words_before.reverse();

	calculate_score(&html_before, &wikitext_words_before)
		+ calculate_score(
			words_after,
			&first_words(&wikitext_after, ADJACENT_WORD_COUNT),
		)
}

/// Each selection word found nearby scores more the closer it is to the
/// position it holds in the selection context.
fn calculate_score(html_words: &[String], wikitext_words: &[String]) -> isize {
	let wikitext_len = wikitext_words.len() as isize;

	html_words
		.iter()
		.enumerate()
		.filter_map(|(html_index, html_word)| {
			let found = wikitext_words.iter().position(|word| word == html_word)?;
			let html_index = html_index as isize;
			let distance = found as isize - html_index;
			Some(wikitext_len - html_index - distance)
		})
		.sum()
}

/// Strip parentheticals and templates, then reduce everything else to
/// space-separated words.
fn words_only(text: &str) -> String {
	let text = PARENTHETICAL.replace_all(text, "");
	let text = TEMPLATE.replace_all(&text, "");
	NON_WORD.replace_all(&text, " ").trim().to_string()
}

fn words(text: &str) -> impl DoubleEndedIterator<Item = &str> {
	text.split(' ').filter(|word| !word.is_empty())
}

fn last_words(text: &str, count: usize) -> Vec<String> {
	let mut collected: Vec<String> = words(text).rev().take(count).map(String::from).collect();
	collected.reverse();
	collected
}

fn first_words(text: &str, count: usize) -> Vec<String> {
	words(text).take(count).map(String::from).collect()
}
