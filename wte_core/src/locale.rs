use serde::Deserialize;
use serde::Serialize;

use crate::MediaLink;
use crate::MissingAltMatch;
use crate::caption_for_display;
use crate::find_media_links;
use crate::missing_alt_text_links;

/// The localized names a wiki uses for media links.
///
/// ```toml
/// [locales.de]
/// namespaces = ["Datei", "Bild", "File", "Image"]
/// alt_params = ["alternativtext", "alt"]
/// magic_words = ["mini", "miniatur", "thumb", "links", "rechts"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleAliasTable {
	/// Namespace aliases that mark a link as a media link, e.g. `File`.
	#[serde(default)]
	pub namespaces: Vec<String>,
	/// Parameter names that carry alt text, e.g. `alt`.
	#[serde(default)]
	pub alt_params: Vec<String>,
	/// Image option keywords that are never captions, e.g. `thumb`.
	#[serde(default)]
	pub magic_words: Vec<String>,
}

impl LocaleAliasTable {
	pub fn new<N, A>(namespaces: N, alt_params: A) -> Self
	where
		N: IntoIterator,
		N::Item: Into<String>,
		A: IntoIterator,
		A::Item: Into<String>,
	{
		Self {
			namespaces: namespaces.into_iter().map(Into::into).collect(),
			alt_params: alt_params.into_iter().map(Into::into).collect(),
			magic_words: Vec::new(),
		}
	}

	#[must_use]
	pub fn with_magic_words<M>(mut self, magic_words: M) -> Self
	where
		M: IntoIterator,
		M::Item: Into<String>,
	{
		self.magic_words = magic_words.into_iter().map(Into::into).collect();
		self
	}

	/// Add the entries of `other` that this table does not already have.
	pub fn extend(&mut self, other: &LocaleAliasTable) {
		extend_unique(&mut self.namespaces, &other.namespaces);
		extend_unique(&mut self.alt_params, &other.alt_params);
		extend_unique(&mut self.magic_words, &other.magic_words);
	}

	pub fn is_empty(&self) -> bool {
		self.namespaces.is_empty()
	}

	pub fn find_media_links(&self, document: &str) -> Vec<MediaLink> {
		find_media_links(document, self.namespaces.as_slice())
	}

	pub fn missing_alt_text_links(&self, document: &str) -> Vec<MissingAltMatch> {
		missing_alt_text_links(document, self.namespaces.as_slice(), self.alt_params.as_slice())
	}

	pub fn caption_for_display(&self, link: &MediaLink) -> Option<String> {
		caption_for_display(link, self.magic_words.as_slice())
	}
}

fn extend_unique(target: &mut Vec<String>, source: &[String]) {
	for value in source {
		if !target.contains(value) {
			target.push(value.clone());
		}
	}
}
