use serde::Serialize;

use crate::Document;
use crate::display_text;
use crate::find_media_links;
use crate::media::scan_links;

/// A media link with no alt text parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingAltMatch {
	/// The link exactly as it appears in the document, `[[` to `]]`.
	pub text: String,
	/// `<alias>:<title>` of the linked file.
	pub file: String,
	/// Grapheme offset of the opening `[[`.
	pub offset: usize,
	/// Length of the link in graphemes.
	pub length: usize,
}

/// Returns true when `param` assigns one of `alt_param_names`, e.g.
/// `alt=A cat` or ` alternativtext=Eine Katze`.
///
/// The name must be followed directly by `=`; `alt =A cat` renders as a
/// caption and does not count. Names are compared case-sensitively; callers
/// pass the casing their wiki uses.
pub fn is_alt_param<S>(param: &str, alt_param_names: &[S]) -> bool
where
	S: AsRef<str>,
{
	let param = param.trim_start();
	alt_param_names.iter().any(|name| {
		let name = name.as_ref();
		!name.is_empty()
			&& param
				.strip_prefix(name)
				.is_some_and(|rest| rest.starts_with('='))
	})
}

/// List the media links in `document` that have no alt text parameter, in
/// document order.
///
/// A link qualifies when it uses one of `namespace_aliases` and none of its
/// parameters, wherever they appear, assigns one of `alt_param_names`. Links
/// without any parameters qualify too.
pub fn missing_alt_text_links<N, A>(
	document: &str,
	namespace_aliases: &[N],
	alt_param_names: &[A],
) -> Vec<MissingAltMatch>
where
	N: AsRef<str>,
	A: AsRef<str>,
{
	let matches: Vec<MissingAltMatch> = find_media_links(document, namespace_aliases)
		.into_iter()
		.filter(|link| {
			!link
				.params
				.iter()
				.any(|param| is_alt_param(param, alt_param_names))
		})
		.map(|link| {
			MissingAltMatch {
				file: link.file(),
				text: document[link.bytes.clone()].to_string(),
				offset: link.span.offset,
				length: link.span.length,
			}
		})
		.collect();

	tracing::debug!(count = matches.len(), "found media links without alt text");
	matches
}

/// Where the alt text goes relative to the caption parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
	Before,
	After,
}

/// Find the caption among `params` of `markup`.
///
/// A parameter written exactly as `caption` takes the alt text in front of
/// it. Otherwise the caption may have come from rendered HTML, so parameters
/// are compared by their display text; a match in last position takes the
/// alt text after it.
fn locate_caption(
	markup: &str,
	params: &[std::ops::Range<usize>],
	caption: &str,
) -> Option<(usize, Placement)> {
	let caption = caption.trim();
	if caption.is_empty() {
		return None;
	}

	if let Some(index) = params
		.iter()
		.position(|range| markup[range.clone()].trim() == caption)
	{
		return Some((index, Placement::Before));
	}

	let index = params
		.iter()
		.position(|range| display_text(&markup[range.clone()]) == caption)?;
	let placement = if index + 1 == params.len() {
		Placement::After
	} else {
		Placement::Before
	};

	Some((index, placement))
}

/// Insert `alt_text` (e.g. `alt=A tabby cat`) into the first occurrence of
/// `image_markup` in `document`, next to the parameter holding `caption`.
///
/// When the caption parameter is written verbatim the link becomes
/// `...| alt_text | caption...`. When the caption only matches a parameter's
/// display text and that parameter is last, the link becomes
/// `...caption| alt_text]]`.
///
/// The document is returned unchanged when `image_markup` does not occur in
/// it, is not a link, or has no parameter matching `caption`.
pub fn insert_alt_text(alt_text: &str, caption: &str, image_markup: &str, document: &str) -> String {
	if image_markup.is_empty() {
		return document.to_string();
	}

	let Some(start) = document.find(image_markup) else {
		tracing::debug!("image markup not found, leaving document unchanged");
		return document.to_string();
	};

	let markup = Document::new(image_markup);
	let Some(link) = scan_links(&markup, |_| Some(0))
		.into_iter()
		.find(|link| link.bytes.start == 0)
	else {
		tracing::debug!("image markup is not a link, leaving document unchanged");
		return document.to_string();
	};

	let params = link.params();
	let Some((index, placement)) = locate_caption(image_markup, params, caption) else {
		tracing::debug!("caption not found among parameters, leaving document unchanged");
		return document.to_string();
	};

	let param = &params[index];
	let edited = match placement {
		Placement::Before => {
			let spacing = if image_markup[param.clone()].starts_with(char::is_whitespace) {
				""
			} else {
				" "
			};
			format!(
				"{} {alt_text} |{spacing}{}",
				&image_markup[..param.start],
				&image_markup[param.start..]
			)
		}
		Placement::After => {
			format!(
				"{}| {alt_text}{}",
				&image_markup[..param.end],
				&image_markup[param.end..]
			)
		}
	};

	tracing::debug!(?placement, parameter = index, "inserted alt text");

	let end = start + image_markup.len();
	format!("{}{edited}{}", &document[..start], &document[end..])
}
