//! Bracket depth tracking for wikitext.
//!
//! [`DepthScanner`] walks a [`Document`] marker by marker and reports the
//! nesting depth of `{{ }}` templates and `[[ ]]` links after each step. HTML
//! comments are reported as a single atomic step so nothing inside them
//! affects either depth. Depths are plain counters, so arbitrarily deep
//! nesting never grows the call stack.

use std::ops::Range;

use logos::Logos;
use logos::SpannedIter;

use crate::Document;
use crate::WteError;
use crate::WteResult;

/// Raw tokens produced by logos. Stray bracket, `<` and `-` characters that
/// do not form a marker are lexed one at a time as `Text`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
	#[token("<!--")]
	CommentOpen,
	#[token("-->")]
	CommentClose,
	#[token("{{")]
	TemplateOpen,
	#[token("}}")]
	TemplateClose,
	#[token("[[")]
	LinkOpen,
	#[token("]]")]
	LinkClose,
	#[token("|")]
	Pipe,
	#[token("\n")]
	Newline,
	#[regex(r"[^<\-{}\[\]|\n]+")]
	#[token("<")]
	#[token("-")]
	#[token("{")]
	#[token("}")]
	#[token("[")]
	#[token("]")]
	Text,
}

/// The kind of a single scanner step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
	/// `{{`
	TemplateOpen,
	/// `}}` closing an open template.
	TemplateClose,
	/// `[[`
	LinkOpen,
	/// `]]` closing an open link.
	LinkClose,
	/// A whole `<!-- ... -->` comment, or everything from `<!--` to the end of
	/// the document when the comment is never closed.
	Comment,
	/// `|`
	Pipe,
	/// `\n`
	Newline,
	/// Anything else, including closers with nothing left to close.
	Text,
}

/// One step of a [`DepthScanner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanStep {
	pub kind: MarkerKind,
	/// Byte range of the step in the scanned document.
	pub range: Range<usize>,
	/// Template depth after this step was applied.
	pub template_depth: usize,
	/// Link depth after this step was applied.
	pub link_depth: usize,
}

/// Iterator over the markers of a [`Document`], tracking template and link
/// depth independently.
///
/// A marker only counts when both of its ends fall on grapheme cluster
/// boundaries. A `]` fused with a following combining mark is part of a
/// different user-perceived character and is reported as text.
pub struct DepthScanner<'d, 'a> {
	document: &'d Document<'a>,
	tokens: SpannedIter<'a, RawToken>,
	offset: usize,
	template_depth: usize,
	link_depth: usize,
}

impl<'d, 'a> DepthScanner<'d, 'a> {
	/// Scan the whole document.
	pub fn new(document: &'d Document<'a>) -> Self {
		Self::starting_at(document, 0)
	}

	/// Scan from the byte offset `start`, which is clamped to the nearest
	/// grapheme boundary at or before it. Both depths start at zero.
	pub fn starting_at(document: &'d Document<'a>, start: usize) -> Self {
		let start = document.byte_offset(document.grapheme_offset(start));
		let source: &'a str = document.as_str();

		Self {
			document,
			tokens: RawToken::lexer(&source[start..]).spanned(),
			offset: start,
			template_depth: 0,
			link_depth: 0,
		}
	}

	pub fn template_depth(&self) -> usize {
		self.template_depth
	}

	pub fn link_depth(&self) -> usize {
		self.link_depth
	}

	fn absolute(&self, span: &Range<usize>) -> Range<usize> {
		(span.start + self.offset)..(span.end + self.offset)
	}

	fn is_marker(&self, range: &Range<usize>) -> bool {
		self.document.is_boundary(range.start) && self.document.is_boundary(range.end)
	}

	/// Consume tokens up to and including the next `-->`, returning the end
	/// of the comment.
	fn skip_comment(&mut self) -> usize {
		while let Some((token, span)) = self.tokens.next() {
			let range = self.absolute(&span);
			if token == Ok(RawToken::CommentClose) && self.is_marker(&range) {
				return range.end;
			}
		}

		self.document.len()
	}

	fn step(&self, kind: MarkerKind, range: Range<usize>) -> ScanStep {
		ScanStep {
			kind,
			range,
			template_depth: self.template_depth,
			link_depth: self.link_depth,
		}
	}
}

impl Iterator for DepthScanner<'_, '_> {
	type Item = ScanStep;

	fn next(&mut self) -> Option<Self::Item> {
		let (token, span) = self.tokens.next()?;
		let range = self.absolute(&span);

		let Ok(token) = token else {
			return Some(self.step(MarkerKind::Text, range));
		};

		if token != RawToken::Text && !self.is_marker(&range) {
			return Some(self.step(MarkerKind::Text, range));
		}

		let kind = match token {
			RawToken::CommentOpen => {
				let end = self.skip_comment();
				return Some(self.step(MarkerKind::Comment, range.start..end));
			}
			RawToken::TemplateOpen => {
				self.template_depth += 1;
				MarkerKind::TemplateOpen
			}
			RawToken::TemplateClose if self.template_depth > 0 => {
				self.template_depth -= 1;
				MarkerKind::TemplateClose
			}
			RawToken::LinkOpen => {
				self.link_depth += 1;
				MarkerKind::LinkOpen
			}
			RawToken::LinkClose if self.link_depth > 0 => {
				self.link_depth -= 1;
				MarkerKind::LinkClose
			}
			RawToken::Pipe => MarkerKind::Pipe,
			RawToken::Newline => MarkerKind::Newline,
			RawToken::CommentClose
			| RawToken::TemplateClose
			| RawToken::LinkClose
			| RawToken::Text => MarkerKind::Text,
		};

		Some(self.step(kind, range))
	}
}

/// Default nesting limit used by [`check_nesting`] callers that have no
/// configured limit.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 512;

/// Verify that neither the template nor the link depth of `text` ever
/// exceeds `limit`.
///
/// None of the editing operations need this, since they scan iteratively and
/// tolerate any depth. It lets callers reject pathological input before
/// handing it on.
pub fn check_nesting(text: &str, limit: usize) -> WteResult<()> {
	let document = Document::new(text);

	for step in DepthScanner::new(&document) {
		if step.template_depth > limit || step.link_depth > limit {
			return Err(WteError::MalformedWikitext {
				offset: document.grapheme_offset(step.range.start),
				limit,
			});
		}
	}

	Ok(())
}
