//! `wte_core` is the core library for the wte wikitext editor. It provides a
//! bracket depth scanner, a leading template block scanner, a media link
//! locator, and the editing operations built on them: inserting image markup
//! after an article's leading templates, finding media links that lack alt
//! text, and inserting alt text into an existing media link.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Wikitext
//!   → Document (grapheme cluster boundaries)
//!   → DepthScanner (logos markers, template/link depth, atomic comments)
//!   → Template block scanner (end of the leading templates)
//!   → Media link locator (outermost [[<alias>:title|params]] links)
//!   → Editors (insert image, detect missing alt, insert alt)
//! ```
//!
//! Every operation is a pure function of its inputs. All offsets are counted
//! in extended grapheme clusters, so Arabic, CJK and text with combining marks
//! report the positions a reader would count.
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from `wte.toml`, including locale alias tables and input
//!   limits.
//! - [`scanner`]: The iterative bracket depth scanner used by everything else.
//! - [`selection`]: Locating text selected in a rendered article inside its wikitext.
//!
//! ## Key Types
//!
//! - [`Document`]: Borrowed wikitext with grapheme offset conversion.
//! - [`MediaLink`]: A media link with its namespace alias, title and parameters.
//! - [`MissingAltMatch`]: A media link without an alt text parameter.
//! - [`LocaleAliasTable`]: Localized namespace aliases, alt parameter names and image keywords.
//!
//! ## Quick Start
//!
//! ```rust
//! use wte_core::insert_alt_text;
//! use wte_core::missing_alt_text_links;
//!
//! let article = "Lead text [[File:Cat.jpg|thumb|A cat]] more text.";
//! let missing = missing_alt_text_links(article, &["File"], &["alt"]);
//! assert_eq!(missing.len(), 1);
//! assert_eq!(missing[0].file, "File:Cat.jpg");
//! assert_eq!(missing[0].offset, 10);
//!
//! let updated = insert_alt_text("alt=A tabby cat", "A cat", &missing[0].text, article);
//! assert_eq!(
//! 	updated,
//! 	"Lead text [[File:Cat.jpg|thumb| alt=A tabby cat | A cat]] more text."
//! );
//! ```

pub use alt_text::*;
pub use caption::*;
pub use config::*;
pub use document::*;
pub use error::*;
pub use insert::*;
pub use locale::*;
pub use media::MediaLink;
pub use media::find_media_links;
pub use scanner::DEFAULT_MAX_NESTING_DEPTH;
pub use scanner::DepthScanner;
pub use scanner::MarkerKind;
pub use scanner::ScanStep;
pub use scanner::check_nesting;
pub use selection::HtmlSelection;
pub use selection::locate_selection;
pub use templates::*;

mod alt_text;
mod caption;
pub mod config;
mod document;
#[allow(unused_assignments)]
mod error;
mod insert;
mod locale;
pub(crate) mod media;
pub mod scanner;
pub mod selection;
mod templates;

#[cfg(test)]
mod __fixtures;
