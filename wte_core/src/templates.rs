use std::ops::Range;

use serde::Serialize;

use crate::DepthScanner;
use crate::Document;
use crate::MarkerKind;

/// A top-level template or HTML comment at the start of an article, in
/// grapheme offsets. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateSpan {
	pub start: usize,
	pub end: usize,
}

/// The run of templates and comments that opens an article.
#[derive(Debug, Default)]
pub(crate) struct LeadingBlock {
	/// Byte offset just past the last consumed template or comment and the
	/// line feeds that follow it. Zero when nothing was consumed.
	pub end: usize,
	/// Byte ranges of every consumed template and comment.
	pub items: Vec<Range<usize>>,
}

/// Returns the grapheme offset immediately after the templates and comments
/// that open `document`, including the line feeds that terminate them.
///
/// Returns `0` when the document does not start with a template or comment.
/// Content such as a paragraph or a list item ends the block, and so does a
/// leading template that is never closed.
pub fn leading_template_block_end(document: &str) -> usize {
	let document = Document::new(document);
	let block = scan_leading_block(&document);
	document.grapheme_offset(block.end)
}

/// The individual templates and comments that make up the leading block of
/// `document`.
pub fn leading_template_spans(document: &str) -> Vec<TemplateSpan> {
	let document = Document::new(document);
	scan_leading_block(&document)
		.items
		.iter()
		.map(|range| {
			TemplateSpan {
				start: document.grapheme_offset(range.start),
				end: document.grapheme_offset(range.end),
			}
		})
		.collect()
}

pub(crate) fn scan_leading_block(document: &Document<'_>) -> LeadingBlock {
	let text = document.as_str();
	let mut block = LeadingBlock::default();
	let mut cursor = 0;

	loop {
		let rest = &text[cursor..];
		let lookahead = cursor + (rest.len() - rest.trim_start().len());
		let Some(item_end) = leading_item_end(document, lookahead) else {
			break;
		};

		block.items.push(lookahead..item_end);
		cursor = item_end;

		loop {
			let rest = &text[cursor..];
			if rest.starts_with('\n') {
				cursor += 1;
			} else if rest.starts_with("\r\n") {
				cursor += 2;
			} else {
				break;
			}
		}

		block.end = cursor;
	}

	tracing::trace!(end = block.end, items = block.items.len(), "scanned leading block");
	block
}

/// The byte offset just past the comment or top-level template that starts
/// at `start`, if there is one.
fn leading_item_end(document: &Document<'_>, start: usize) -> Option<usize> {
	let mut scanner = DepthScanner::starting_at(document, start);
	let first = scanner.next()?;

	match first.kind {
		MarkerKind::Comment => Some(first.range.end),
		MarkerKind::TemplateOpen => {
			scanner
				.find(|step| step.kind == MarkerKind::TemplateClose && step.template_depth == 0)
				.map(|step| step.range.end)
		}
		_ => None,
	}
}
