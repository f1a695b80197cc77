use std::ops::Range;

use derive_more::Deref;
use serde::Deserialize;
use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

/// A location in a [`Document`] measured in extended grapheme clusters.
///
/// Every offset exposed by this crate uses this unit so that text written in
/// scripts with combining marks (Arabic, Devanagari, decomposed Latin) reports
/// the same positions a reader would count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
	/// Number of grapheme clusters before the start of the span.
	pub offset: usize,
	/// Number of grapheme clusters covered by the span.
	pub length: usize,
}

impl Span {
	pub fn new(offset: usize, length: usize) -> Self {
		Self { offset, length }
	}

	/// The exclusive grapheme offset just past the span.
	pub fn end(&self) -> usize {
		self.offset + self.length
	}
}

/// Borrowed wikitext segmented into grapheme clusters.
///
/// The document dereferences to the underlying `&str`, so byte oriented
/// string methods remain available. Byte offsets are converted to grapheme
/// offsets with [`Document::grapheme_offset`] and back again with
/// [`Document::byte_offset`].
#[derive(Debug, Clone, Deref)]
pub struct Document<'a> {
	#[deref]
	text: &'a str,
	/// Byte offset of the start of every grapheme cluster, followed by the
	/// length of `text`.
	boundaries: Vec<usize>,
}

impl<'a> Document<'a> {
	pub fn new(text: &'a str) -> Self {
		let mut boundaries: Vec<usize> = text.grapheme_indices(true).map(|(idx, _)| idx).collect();
		boundaries.push(text.len());

		Self { text, boundaries }
	}

	pub fn as_str(&self) -> &'a str {
		self.text
	}

	/// The number of grapheme clusters in the document.
	pub fn grapheme_len(&self) -> usize {
		self.boundaries.len() - 1
	}

	/// Returns true when `byte` sits between two grapheme clusters (or at
	/// either end of the text).
	pub fn is_boundary(&self, byte: usize) -> bool {
		self.boundaries.binary_search(&byte).is_ok()
	}

	/// Convert a byte offset into the index of the grapheme cluster that
	/// contains it. Offsets past the end clamp to [`Self::grapheme_len`].
	pub fn grapheme_offset(&self, byte: usize) -> usize {
		match self.boundaries.binary_search(&byte) {
			Ok(idx) => idx,
			Err(idx) => idx.saturating_sub(1).min(self.grapheme_len()),
		}
	}

	/// Convert a grapheme offset into a byte offset. Offsets past the end
	/// clamp to the length of the text.
	pub fn byte_offset(&self, grapheme: usize) -> usize {
		self.boundaries
			.get(grapheme)
			.copied()
			.unwrap_or(self.text.len())
	}

	/// Convert a byte range into a grapheme [`Span`].
	pub fn span_of(&self, range: &Range<usize>) -> Span {
		let offset = self.grapheme_offset(range.start);
		let end = self.grapheme_offset(range.end);
		Span::new(offset, end.saturating_sub(offset))
	}

	/// The byte range covered by a grapheme [`Span`].
	pub fn byte_range(&self, span: Span) -> Range<usize> {
		self.byte_offset(span.offset)..self.byte_offset(span.end())
	}

	/// The text covered by a grapheme [`Span`].
	pub fn slice(&self, span: Span) -> &'a str {
		&self.text[self.byte_range(span)]
	}
}
