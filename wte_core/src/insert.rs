use crate::Document;
use crate::templates::scan_leading_block;

/// Insert `image_markup` on its own line directly after the templates and
/// comments that open `document`.
///
/// - An empty `image_markup` returns `document` unchanged.
/// - An empty `document` returns `image_markup` verbatim.
/// - Without leading templates the markup becomes the first line.
///
/// Line feeds that follow the leading templates stay where they are, so a
/// blank line separating the templates from the lead paragraph now separates
/// them from the inserted line, which sits directly above the paragraph.
///
/// The added line breaks follow the document: `\r\n` when its first line
/// ends with `\r\n`, `\n` otherwise.
///
/// ```rust
/// use wte_core::insert_after_leading_templates;
///
/// let article = "{{Short description|Cat}}\n{{Good article}}\n\nThe cat is a mammal.";
/// let result = insert_after_leading_templates("[[File:Cat.jpg|thumb]]", article);
/// assert_eq!(
/// 	result,
/// 	"{{Short description|Cat}}\n{{Good article}}\n\n[[File:Cat.jpg|thumb]]\nThe cat is a mammal."
/// );
/// ```
pub fn insert_after_leading_templates(image_markup: &str, document: &str) -> String {
	if image_markup.is_empty() {
		return document.to_string();
	}

	if document.is_empty() {
		return image_markup.to_string();
	}

	let boundary = scan_leading_block(&Document::new(document)).end;
	let newline = line_ending(document);
	tracing::debug!(boundary, "inserting image markup after leading templates");

	if boundary == 0 {
		return format!("{image_markup}{newline}{document}");
	}

	let (head, tail) = document.split_at(boundary);
	let mut result = String::with_capacity(document.len() + image_markup.len() + 4);
	result.push_str(head);

	if !head.ends_with('\n') {
		result.push_str(newline);
	}

	result.push_str(image_markup);

	if !tail.is_empty() {
		result.push_str(newline);
	}

	result.push_str(tail);
	result
}

fn line_ending(document: &str) -> &'static str {
	match document.find('\n') {
		Some(index) if document[..index].ends_with('\r') => "\r\n",
		_ => "\n",
	}
}
