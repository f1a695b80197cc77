use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use serde::Serialize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;
use wte_cli::Commands;
use wte_cli::EditArgs;
use wte_cli::OutputFormat;
use wte_cli::WteCli;
use wte_core::Document;
use wte_core::HtmlSelection;
use wte_core::LocaleAliasTable;
use wte_core::MediaLink;
use wte_core::TemplateSpan;
use wte_core::WteConfig;
use wte_core::WteError;
use wte_core::check_nesting;
use wte_core::insert_after_leading_templates;
use wte_core::insert_alt_text;
use wte_core::leading_template_block_end;
use wte_core::leading_template_spans;
use wte_core::locate_selection;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

const FALLBACK_LOCALE: &str = "en";

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = WteCli::parse();

	// Respect NO_COLOR, --no-color and terminals without color support.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stdout).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	let result = match &args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::MissingAlt { file, format }) => run_missing_alt(&args, file, *format),
		Some(Commands::InsertImage { file, markup, edit }) => {
			run_insert_image(&args, file, markup, edit)
		}
		Some(Commands::InsertAlt {
			file,
			markup,
			caption,
			alt,
			edit,
		}) => run_insert_alt(&args, file, markup, caption, alt, edit),
		Some(Commands::Links { file, format }) => run_links(&args, file, *format),
		Some(Commands::Boundary { file, format }) => run_boundary(&args, file, *format),
		Some(Commands::Locate {
			file,
			target,
			before,
			after,
		}) => run_locate(&args, file, &HtmlSelection::new(before, target, after)),
		Some(Commands::Caption { file, markup }) => run_caption(&args, file, markup),
		None => {
			eprintln!("No subcommand specified. Run `wte --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		match e.downcast::<WteError>() {
			Ok(wte_err) => {
				let report: miette::Report = (*wte_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.without_time()
		.with_target(verbose)
		.try_init();
}

fn resolve_root(args: &WteCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Everything a command needs besides the article itself.
struct Session {
	config: WteConfig,
	locale: String,
	table: LocaleAliasTable,
}

fn english_table() -> LocaleAliasTable {
	LocaleAliasTable::new(["File", "Image"], ["alt"]).with_magic_words([
		"thumb",
		"thumbnail",
		"frame",
		"framed",
		"frameless",
		"border",
		"left",
		"right",
		"center",
		"centre",
		"none",
		"upright",
	])
}

fn load_session(args: &WteCli) -> Result<Session, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = WteConfig::load(&root)?.unwrap_or_default();

	let locale = args
		.locale
		.clone()
		.or_else(|| config.default_locale.clone())
		.unwrap_or_else(|| FALLBACK_LOCALE.to_string());

	let mut table = match config.locale(&locale) {
		Ok(table) => table.clone(),
		Err(_) if locale == FALLBACK_LOCALE => english_table(),
		Err(_) if !args.namespaces.is_empty() => LocaleAliasTable::default(),
		Err(e) => return Err(e.into()),
	};

	table.extend(&LocaleAliasTable::new(
		args.namespaces.iter().cloned(),
		args.alt_params.iter().cloned(),
	));

	tracing::debug!(
		locale = %locale,
		namespaces = ?table.namespaces,
		alt_params = ?table.alt_params,
		"resolved locale table"
	);

	Ok(Session {
		config,
		locale,
		table,
	})
}

fn is_stdin(file: &Path) -> bool {
	file.as_os_str() == "-"
}

fn display_name(file: &Path) -> String {
	if is_stdin(file) {
		"<stdin>".to_string()
	} else {
		file.display().to_string()
	}
}

/// Read the article, rejecting inputs over the size limit and inputs nested
/// deeper than the configured bound.
fn read_article(session: &Session, file: &Path) -> Result<String, Box<dyn std::error::Error>> {
	let limit = session.config.max_file_size;

	let text = if is_stdin(file) {
		let mut text = String::new();
		std::io::stdin()
			.take(limit.saturating_add(1))
			.read_to_string(&mut text)?;
		text
	} else {
		let size = std::fs::metadata(file)?.len();
		if size > limit {
			return Err(WteError::InputTooLarge {
				path: display_name(file),
				size,
				limit,
			}
			.into());
		}
		std::fs::read_to_string(file)?
	};

	let size = text.len() as u64;
	if size > limit {
		return Err(WteError::InputTooLarge {
			path: display_name(file),
			size,
			limit,
		}
		.into());
	}

	check_nesting(&text, session.config.max_nesting_depth)?;
	tracing::debug!(file = %display_name(file), bytes = size, "read article");

	Ok(text)
}

fn run_init(args: &WteCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config_path = root.join("wte.toml");

	if config_path.exists() {
		println!("Config file already exists: {}", config_path.display());
		return Ok(());
	}

	let sample_config = "# wte configuration\n\n# Locale used when `--locale` is not \
	                     given.\ndefault_locale = \"en\"\n\n# Inputs larger than this many bytes \
	                     are rejected.\n# max_file_size = 10485760\n\n[locales.en]\nnamespaces = \
	                     [\"File\", \"Image\"]\nalt_params = [\"alt\"]\nmagic_words = [\"thumb\", \
	                     \"thumbnail\", \"frameless\", \"left\", \"right\", \"center\", \
	                     \"none\", \"upright\"]\n\n[locales.de]\nnamespaces = [\"Datei\", \
	                     \"Bild\", \"File\", \"Image\"]\nalt_params = [\"alternativtext\", \
	                     \"alt\"]\nmagic_words = [\"mini\", \"miniatur\", \"links\", \"rechts\", \
	                     \"zentriert\", \"ohne\", \"hochkant\"]\n\n[locales.ar]\nnamespaces = \
	                     [\"ملف\", \"صورة\", \"File\", \"Image\"]\nalt_params = [\"بديل\", \
	                     \"alt\"]\nmagic_words = [\"تصغير\", \"يمين\", \"يسار\", \"مركز\"]\n";

	std::fs::write(&config_path, sample_config)?;
	println!("Created {}", config_path.display());
	println!();
	println!("Next steps:");
	println!("  1. Add a [locales.<code>] table for each wiki language you edit");
	println!("  2. Run `wte missing-alt <file>` to find images without alt text");

	Ok(())
}

fn run_missing_alt(
	args: &WteCli,
	file: &Path,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let session = load_session(args)?;
	let text = read_article(&session, file)?;
	let missing = session.table.missing_alt_text_links(&text);

	match format {
		OutputFormat::Json => {
			let output = serde_json::json!({
				"ok": missing.is_empty(),
				"locale": session.locale,
				"missing": missing,
			});
			println!("{}", serde_json::to_string_pretty(&output)?);
		}
		OutputFormat::Text => {
			if missing.is_empty() {
				println!(
					"{}",
					colored!("All media links have alt text.", green)
				);
			} else {
				println!(
					"{}",
					colored!(
						format!("{} media link(s) without alt text:", missing.len()),
						yellow
					)
				);
				for entry in &missing {
					println!();
					println!("  {} (offset {})", colored!(&entry.file, bold), entry.offset);
					println!("    {}", entry.text);
				}
			}
		}
	}

	if !missing.is_empty() {
		process::exit(1);
	}

	Ok(())
}

fn run_insert_image(
	args: &WteCli,
	file: &Path,
	markup: &str,
	edit: &EditArgs,
) -> Result<(), Box<dyn std::error::Error>> {
	let session = load_session(args)?;
	let text = read_article(&session, file)?;
	let updated = insert_after_leading_templates(markup, &text);

	finish_edit(file, &text, &updated, edit)
}

fn run_insert_alt(
	args: &WteCli,
	file: &Path,
	markup: &str,
	caption: &str,
	alt: &str,
	edit: &EditArgs,
) -> Result<(), Box<dyn std::error::Error>> {
	let session = load_session(args)?;
	let text = read_article(&session, file)?;

	if markup.is_empty() || !text.contains(markup) {
		return Err(WteError::MarkupNotFound(markup.to_string()).into());
	}

	let updated = insert_alt_text(alt, caption, markup, &text);
	if updated == text {
		eprintln!(
			"{} caption `{caption}` not found in the image markup, nothing to change",
			colored!("warning:", yellow)
		);
	}

	finish_edit(file, &text, &updated, edit)
}

/// Print or write the edited article.
fn finish_edit(
	file: &Path,
	original: &str,
	updated: &str,
	edit: &EditArgs,
) -> Result<(), Box<dyn std::error::Error>> {
	if edit.diff {
		print_diff(original, updated);
	}

	if !edit.write || is_stdin(file) {
		print!("{updated}");
		return Ok(());
	}

	if original == updated {
		println!("No changes to {}", file.display());
	} else {
		std::fs::write(file, updated)?;
		println!("{} {}", colored!("Updated", green), file.display());
	}

	Ok(())
}

fn run_links(
	args: &WteCli,
	file: &Path,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let session = load_session(args)?;
	let text = read_article(&session, file)?;
	let links = session.table.find_media_links(&text);

	match format {
		OutputFormat::Json => {
			let reports: Vec<LinkReport> = links
				.iter()
				.map(|link| LinkReport::new(&session.table, link))
				.collect();
			println!("{}", serde_json::to_string_pretty(&reports)?);
		}
		OutputFormat::Text => {
			if links.is_empty() {
				println!("No media links found.");
			}

			for link in &links {
				println!(
					"{} (offset {}, length {})",
					colored!(link.file(), bold),
					link.span.offset,
					link.span.length
				);
				for (index, param) in link.params.iter().enumerate() {
					println!("  {index}: {param}");
				}
			}
		}
	}

	Ok(())
}

#[derive(Serialize)]
struct LinkReport<'a> {
	file: String,
	#[serde(flatten)]
	link: &'a MediaLink,
	caption: Option<String>,
}

impl<'a> LinkReport<'a> {
	fn new(table: &LocaleAliasTable, link: &'a MediaLink) -> Self {
		Self {
			file: link.file(),
			link,
			caption: table.caption_for_display(link),
		}
	}
}

#[derive(Serialize)]
struct BoundaryReport {
	offset: usize,
	templates: Vec<TemplateSpan>,
}

fn run_boundary(
	args: &WteCli,
	file: &Path,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let session = load_session(args)?;
	let text = read_article(&session, file)?;
	let report = BoundaryReport {
		offset: leading_template_block_end(&text),
		templates: leading_template_spans(&text),
	};

	match format {
		OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
		OutputFormat::Text => {
			println!("{}", report.offset);
			if args.verbose {
				for span in &report.templates {
					println!("  {}..{}", span.start, span.end);
				}
			}
		}
	}

	Ok(())
}

fn run_locate(
	args: &WteCli,
	file: &Path,
	selection: &HtmlSelection,
) -> Result<(), Box<dyn std::error::Error>> {
	if selection.target.trim().is_empty() {
		return Err(WteError::InvalidSelection.into());
	}

	let session = load_session(args)?;
	let text = read_article(&session, file)?;

	let Some(span) = locate_selection(selection, &text) else {
		eprintln!(
			"{} `{}` was not found in {}",
			colored!("warning:", yellow),
			selection.target,
			display_name(file)
		);
		process::exit(1);
	};

	let document = Document::new(&text);
	println!("{} {}", span.offset, span.length);
	println!("{}", document.slice(span));

	Ok(())
}

fn run_caption(args: &WteCli, file: &Path, markup: &str) -> Result<(), Box<dyn std::error::Error>> {
	let session = load_session(args)?;
	let text = read_article(&session, file)?;

	if markup.is_empty() || !text.contains(markup) {
		return Err(WteError::MarkupNotFound(markup.to_string()).into());
	}

	let links = session.table.find_media_links(markup);
	let Some(link) = links.first() else {
		return Err(WteError::MarkupNotFound(markup.to_string()).into());
	};

	match session.table.caption_for_display(link) {
		Some(caption) => println!("{caption}"),
		None => eprintln!("{} {} has no caption", colored!("note:", yellow), link.file()),
	}

	Ok(())
}

/// Print a line diff between two strings to stderr, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}
