use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Insert images and alt text into wikitext articles.",
	long_about = "wte (wikitext editor) finds the end of an article's leading templates, inserts \
	              image markup there, reports media links without alt text, and adds alt text \
	              to existing media links.\n\nQuick start:\n  wte init                 Create a \
	              wte.toml with locale tables\n  wte missing-alt page.txt List images without \
	              alt text\n  wte insert-alt page.txt  Add alt text to an image\n\nPass `-` \
	              instead of a file to read the article from stdin."
)]
pub struct WteCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory, where `wte.toml` is looked up.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,

	/// Language code of the locale table to use from `wte.toml`. Defaults to
	/// `default_locale`, then `en`.
	#[arg(long, short, global = true)]
	pub locale: Option<String>,

	/// Extra namespace alias that marks a media link, e.g. `Datei`. May be
	/// repeated. Added to the locale table from `wte.toml`.
	#[arg(long = "namespace", global = true)]
	pub namespaces: Vec<String>,

	/// Extra alt text parameter name, e.g. `alternativtext`. May be repeated.
	#[arg(long = "alt-param", global = true)]
	pub alt_params: Vec<String>,
}

/// Options shared by the commands that edit an article.
#[derive(Debug, Clone, Args)]
pub struct EditArgs {
	/// Write the result back to the file instead of printing it.
	#[arg(long, default_value_t = false)]
	pub write: bool,

	/// Print a line diff of the change to stderr.
	#[arg(long, default_value_t = false)]
	pub diff: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Initialize wte in a project by creating a sample `wte.toml`.
	///
	/// The sample contains locale tables for English, German and Arabic. If
	/// the file already exists, this command is a no-op and exits
	/// successfully.
	Init,
	/// List media links that have no alt text parameter.
	///
	/// Exits with a non-zero status code when any are found, which makes it
	/// suitable for CI.
	MissingAlt {
		/// Article wikitext file, or `-` for stdin.
		file: PathBuf,

		/// Output format. Use `text` for human-readable output or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Insert image markup on its own line after the article's leading
	/// templates.
	InsertImage {
		/// Article wikitext file, or `-` for stdin.
		file: PathBuf,

		/// The image markup to insert, e.g. `[[File:Cat.jpg|thumb|A cat]]`.
		#[arg(long)]
		markup: String,

		#[command(flatten)]
		edit: EditArgs,
	},
	/// Add an alt text parameter to an existing media link.
	///
	/// The alt text is placed next to the parameter holding the caption. The
	/// caption may be given as written in wikitext or as displayed in the
	/// rendered article.
	InsertAlt {
		/// Article wikitext file, or `-` for stdin.
		file: PathBuf,

		/// The media link exactly as it appears in the article.
		#[arg(long)]
		markup: String,

		/// The caption of the media link.
		#[arg(long)]
		caption: String,

		/// The full alt text parameter, e.g. `alt=A tabby cat`.
		#[arg(long)]
		alt: String,

		#[command(flatten)]
		edit: EditArgs,
	},
	/// List every media link with its parameters.
	Links {
		/// Article wikitext file, or `-` for stdin.
		file: PathBuf,

		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Print where the article's leading templates end.
	Boundary {
		/// Article wikitext file, or `-` for stdin.
		file: PathBuf,

		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Find the wikitext span of text selected in the rendered article.
	Locate {
		/// Article wikitext file, or `-` for stdin.
		file: PathBuf,

		/// The selected text.
		#[arg(long)]
		target: String,

		/// Rendered text directly before the selection.
		#[arg(long, default_value = "")]
		before: String,

		/// Rendered text directly after the selection.
		#[arg(long, default_value = "")]
		after: String,
	},
	/// Print the caption a reader sees for a media link.
	Caption {
		/// Article wikitext file, or `-` for stdin.
		file: PathBuf,

		/// The media link exactly as it appears in the article.
		#[arg(long)]
		markup: String,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
