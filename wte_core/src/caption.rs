use std::sync::LazyLock;

use regex::Regex;

use crate::DepthScanner;
use crate::Document;
use crate::MarkerKind;
use crate::MediaLink;

static HTML_TAG: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"<[^>]*>").expect("html tag pattern is valid"));

static NAMED_PARAM: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\s*[\w\- ]+\s*=").expect("named parameter pattern is valid"));

static SIZE_PARAM: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\s*(?:\d+)?x?\d+px\s*$").expect("size parameter pattern is valid"));

/// Render wikitext the way a reader sees it, for matching against text taken
/// from rendered HTML.
///
/// Templates and comments are removed, links are replaced with their label
/// (or their target when unlabelled), HTML tags are dropped, and the result
/// is trimmed.
///
/// ```rust
/// use wte_core::display_text;
///
/// let text = "at the [[Odessa International Film Festival]].{{efn|note}}";
/// assert_eq!(display_text(text), "at the Odessa International Film Festival.");
/// ```
pub fn display_text(wikitext: &str) -> String {
	let document = Document::new(wikitext);
	// One buffer per open link, with the surrounding text at the bottom.
	let mut buffers: Vec<String> = vec![String::new()];

	for step in DepthScanner::new(&document) {
		if step.template_depth > 0 {
			continue;
		}

		match step.kind {
			MarkerKind::LinkOpen => buffers.push(String::new()),
			MarkerKind::LinkClose if buffers.len() > 1 => {
				let label = buffers.pop().unwrap_or_default();
				if let Some(parent) = buffers.last_mut() {
					parent.push_str(&label);
				}
			}
			MarkerKind::Pipe if buffers.len() > 1 => {
				if let Some(current) = buffers.last_mut() {
					current.clear();
				}
			}
			MarkerKind::Pipe | MarkerKind::Newline | MarkerKind::Text => {
				if let Some(current) = buffers.last_mut() {
					current.push_str(&wikitext[step.range]);
				}
			}
			MarkerKind::Comment
			| MarkerKind::TemplateOpen
			| MarkerKind::TemplateClose
			| MarkerKind::LinkClose => {}
		}
	}

	let flattened = buffers.concat();
	HTML_TAG.replace_all(&flattened, "").trim().to_string()
}

/// Returns true for `key=value` parameters such as `alt=...` or `upright=1.2`.
pub fn is_named_param(param: &str) -> bool {
	NAMED_PARAM.is_match(param)
}

/// Returns true for size parameters such as `220px`, `x120px` or
/// `220x124px`.
pub fn is_size_param(param: &str) -> bool {
	SIZE_PARAM.is_match(param)
}

/// Derive the caption a reader sees for `link`.
///
/// Named parameters, size parameters and image option keywords listed in
/// `magic_words` (e.g. `thumb`, `right`, `upright`) are skipped; the last
/// remaining parameter is the caption. Returns `None` when the link only
/// names a file or the caption renders to nothing.
pub fn caption_for_display<S>(link: &MediaLink, magic_words: &[S]) -> Option<String>
where
	S: AsRef<str>,
{
	link.params
		.iter()
		.rev()
		.find(|param| {
			let trimmed = param.trim();
			!trimmed.is_empty()
				&& !is_named_param(param)
				&& !is_size_param(param)
				&& !magic_words.iter().any(|word| word.as_ref() == trimmed)
		})
		.map(|param| display_text(param))
		.filter(|caption| !caption.is_empty())
}
