use std::ops::Range;

use serde::Serialize;

use crate::DepthScanner;
use crate::Document;
use crate::MarkerKind;
use crate::Span;

/// A top-level media link such as `[[File:Cat.jpg|thumb|A cat]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaLink {
	/// The namespace alias exactly as written, e.g. `File` or `Datei`.
	pub namespace_alias: String,
	/// Everything between `<alias>:` and the first top-level `|` (or the
	/// closing `]]`), verbatim.
	pub title: String,
	/// The `|`-separated parameters in source order, verbatim. Nested links
	/// and templates inside a parameter are kept intact.
	pub params: Vec<String>,
	/// Grapheme span from the opening `[[` to just past the closing `]]`.
	pub span: Span,
	/// Byte range of the link in the scanned text.
	#[serde(skip)]
	pub bytes: Range<usize>,
}

impl MediaLink {
	/// `<alias>:<title>`, the way the link names its file.
	pub fn file(&self) -> String {
		format!("{}:{}", self.namespace_alias, self.title)
	}
}

/// A link found by [`scan_links`], described by byte ranges into the
/// scanned text.
#[derive(Debug, Clone)]
pub(crate) struct RawLink {
	/// From the opening `[[` to just past the closing `]]`.
	pub bytes: Range<usize>,
	/// The prefix accepted by the opener callback, e.g. `File:`.
	pub prefix: Range<usize>,
	/// The title followed by every parameter. Never empty.
	pub segments: Vec<Range<usize>>,
}

impl RawLink {
	pub fn title(&self) -> &Range<usize> {
		&self.segments[0]
	}

	pub fn params(&self) -> &[Range<usize>] {
		&self.segments[1..]
	}
}

struct OpenLink {
	start: usize,
	prefix: Range<usize>,
	template_depth: usize,
	segment_start: usize,
	segments: Vec<Range<usize>>,
}

/// Collect the outermost links of `document` that `accept` agrees to
/// capture.
///
/// `accept` receives the byte offset just after an outermost `[[` and
/// returns the byte length of the prefix to skip before the title, or `None`
/// to leave the link alone. Links that never close are dropped.
pub(crate) fn scan_links<F>(document: &Document<'_>, mut accept: F) -> Vec<RawLink>
where
	F: FnMut(usize) -> Option<usize>,
{
	let mut links = Vec::new();
	let mut open: Option<OpenLink> = None;

	for step in DepthScanner::new(document) {
		match step.kind {
			MarkerKind::LinkOpen if step.link_depth == 1 => {
				open = accept(step.range.end).map(|prefix_len| {
					let title_start = step.range.end + prefix_len;
					OpenLink {
						start: step.range.start,
						prefix: step.range.end..title_start,
						template_depth: step.template_depth,
						segment_start: title_start,
						segments: Vec::new(),
					}
				});
			}
			MarkerKind::Pipe => {
				if let Some(link) = open.as_mut() {
					if step.link_depth == 1 && step.template_depth == link.template_depth {
						link.segments.push(link.segment_start..step.range.start);
						link.segment_start = step.range.end;
					}
				}
			}
			MarkerKind::LinkClose if step.link_depth == 0 => {
				if let Some(mut link) = open.take() {
					link.segments.push(link.segment_start..step.range.start);
					links.push(RawLink {
						bytes: link.start..step.range.end,
						prefix: link.prefix,
						segments: link.segments,
					});
				}
			}
			_ => {}
		}
	}

	links
}

/// Find every top-level media link in `document` whose namespace is one of
/// `namespace_aliases`.
///
/// An alias must follow the opening `[[` immediately and be followed by `:`;
/// the comparison is case-sensitive, so callers pass every spelling a wiki
/// accepts. Links nested inside another link are not reported, links inside
/// templates are. Links that are never closed are ignored.
pub fn find_media_links<S>(document: &str, namespace_aliases: &[S]) -> Vec<MediaLink>
where
	S: AsRef<str>,
{
	let document = Document::new(document);
	let text = document.as_str();

	let raw_links = scan_links(&document, |start| {
		let rest = &text[start..];
		namespace_aliases.iter().find_map(|alias| {
			let alias = alias.as_ref();
			let prefix_len = alias.len() + 1;
			let matches = !alias.is_empty()
				&& rest.starts_with(alias)
				&& rest[alias.len()..].starts_with(':')
				&& document.is_boundary(start + prefix_len);
			matches.then_some(prefix_len)
		})
	});

	let links: Vec<MediaLink> = raw_links
		.into_iter()
		.map(|raw| {
			let alias = &text[raw.prefix.start..raw.prefix.end - 1];
			MediaLink {
				namespace_alias: alias.to_string(),
				title: text[raw.title().clone()].to_string(),
				params: raw
					.params()
					.iter()
					.map(|range| text[range.clone()].to_string())
					.collect(),
				span: document.span_of(&raw.bytes),
				bytes: raw.bytes,
			}
		})
		.collect();

	tracing::debug!(count = links.len(), "found media links");
	links
}
