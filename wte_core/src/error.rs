use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum WteError {
	#[error(transparent)]
	#[diagnostic(code(wte::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(wte::config_parse),
		help("check that wte.toml is valid TOML with a [locales.<code>] section per language")
	)]
	ConfigParse(String),

	#[error("no locale table configured for `{code}`")]
	#[diagnostic(
		code(wte::unknown_locale),
		help(
			"add a [locales.{code}] section to wte.toml or pass --namespace and --alt-param \
			 (configured locales: {available})"
		)
	)]
	UnknownLocale { code: String, available: String },

	#[error("input too large: `{path}` is {size} bytes (limit: {limit} bytes)")]
	#[diagnostic(
		code(wte::input_too_large),
		help("increase `max_file_size` in wte.toml or split the article")
	)]
	InputTooLarge { path: String, size: u64, limit: u64 },

	#[error("wikitext nesting exceeds {limit} levels at grapheme offset {offset}")]
	#[diagnostic(
		code(wte::malformed_wikitext),
		help("the document is too deeply nested to edit safely; check for unbalanced `{{{{` or `[[`")
	)]
	MalformedWikitext { offset: usize, limit: usize },

	#[error("image markup not found in document: `{0}`")]
	#[diagnostic(
		code(wte::markup_not_found),
		help("the markup must match the article wikitext exactly, including spacing")
	)]
	MarkupNotFound(String),

	#[error("selection target is empty")]
	#[diagnostic(
		code(wte::invalid_selection),
		help("pass the selected text with `--target`")
	)]
	InvalidSelection,
}

pub type WteResult<T> = Result<T, WteError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
