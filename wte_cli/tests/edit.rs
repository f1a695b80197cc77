mod common;

use predicates::prelude::PredicateBooleanExt;
use similar_asserts::assert_eq;
use wte_core::AnyEmptyResult;

const ARTICLE: &str = "{{Short description|Small domesticated carnivorous mammal}}\n{{Good \
                       article}}\n\nThe '''cat''' is a small [[mammal]].\n";

const DOG_ARTICLE: &str = "[[File:Dog (Canis lupus familiaris) (5).JPG|thumb|Canis lupus \
                           familiaris]]\nThe '''dog''' is a domesticated descendant of the \
                           wolf.\n";

const DOG_IMAGE: &str = "[[File:Dog (Canis lupus familiaris) (5).JPG|thumb|Canis lupus familiaris]]";

#[test]
fn insert_image_prints_updated_article() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = tmp.path().join("cat.txt");
	std::fs::write(&page, ARTICLE)?;

	let output = common::wte_cmd()
		.arg("insert-image")
		.arg(&page)
		.arg("--markup")
		.arg("[[File:Cat.jpg|thumb|A cat]]")
		.arg("--path")
		.arg(tmp.path())
		.output()?;

	assert!(output.status.success());
	assert_eq!(
		String::from_utf8(output.stdout)?,
		"{{Short description|Small domesticated carnivorous mammal}}\n{{Good article}}\n\n[[File:\
		 Cat.jpg|thumb|A cat]]\nThe '''cat''' is a small [[mammal]].\n"
	);
	assert_eq!(std::fs::read_to_string(&page)?, ARTICLE);

	Ok(())
}

#[test]
fn insert_image_writes_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = tmp.path().join("cat.txt");
	std::fs::write(&page, ARTICLE)?;

	common::wte_cmd()
		.arg("insert-image")
		.arg(&page)
		.arg("--markup")
		.arg("[[File:Cat.jpg|thumb|A cat]]")
		.arg("--write")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Updated"));

	let content = std::fs::read_to_string(&page)?;
	assert!(content.contains("{{Good article}}\n\n[[File:Cat.jpg|thumb|A cat]]\nThe '''cat'''"));

	Ok(())
}

#[test]
fn insert_image_shows_diff() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = tmp.path().join("cat.txt");
	std::fs::write(&page, ARTICLE)?;

	common::wte_cmd()
		.arg("insert-image")
		.arg(&page)
		.arg("--markup")
		.arg("[[File:Cat.jpg|thumb|A cat]]")
		.arg("--diff")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(predicates::str::contains("+[[File:Cat.jpg|thumb|A cat]]"));

	Ok(())
}

#[test]
fn insert_image_from_stdin() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::wte_cmd()
		.arg("insert-image")
		.arg("-")
		.arg("--markup")
		.arg("[[File:X.jpg]]")
		.arg("--path")
		.arg(tmp.path())
		.write_stdin("{{a}}\nText")
		.assert()
		.success()
		.stdout("{{a}}\n[[File:X.jpg]]\nText");

	Ok(())
}

#[test]
fn insert_alt_before_caption() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = tmp.path().join("dog.txt");
	std::fs::write(&page, DOG_ARTICLE)?;

	common::wte_cmd()
		.arg("insert-alt")
		.arg(&page)
		.arg("--markup")
		.arg(DOG_IMAGE)
		.arg("--caption")
		.arg("Canis lupus familiaris")
		.arg("--alt")
		.arg("alt=Testing alt text.")
		.arg("--write")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	let content = std::fs::read_to_string(&page)?;
	assert!(content.starts_with(
		"[[File:Dog (Canis lupus familiaris) (5).JPG|thumb| alt=Testing alt text. | Canis lupus \
		 familiaris]]\nThe '''dog'''"
	));

	Ok(())
}

#[test]
fn insert_alt_warns_when_caption_missing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = tmp.path().join("dog.txt");
	std::fs::write(&page, DOG_ARTICLE)?;

	common::wte_cmd()
		.arg("insert-alt")
		.arg(&page)
		.arg("--markup")
		.arg(DOG_IMAGE)
		.arg("--caption")
		.arg("A wolf")
		.arg("--alt")
		.arg("alt=Testing alt text.")
		.arg("--write")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("No changes"))
		.stderr(predicates::str::contains("caption `A wolf` not found"));

	assert_eq!(std::fs::read_to_string(&page)?, DOG_ARTICLE);

	Ok(())
}

#[test]
fn insert_alt_fails_when_markup_missing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = tmp.path().join("dog.txt");
	std::fs::write(&page, DOG_ARTICLE)?;

	common::wte_cmd()
		.arg("insert-alt")
		.arg(&page)
		.arg("--markup")
		.arg("[[File:Wolf.jpg|thumb|A wolf]]")
		.arg("--caption")
		.arg("A wolf")
		.arg("--alt")
		.arg("alt=A wolf")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("image markup not found"))
		.stdout(predicates::str::is_empty());

	Ok(())
}

#[test]
fn insert_alt_after_rendered_caption() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let image = "[[File:KiraMuratova OdFest.jpg|thumb|Muratova at the [[Odessa International \
	             Film Festival]].]]";
	let page = tmp.path().join("muratova.txt");
	std::fs::write(&page, format!("{{{{Expand section}}}}\n{image}"))?;

	common::wte_cmd()
		.arg("insert-alt")
		.arg(&page)
		.arg("--markup")
		.arg(image)
		.arg("--caption")
		.arg("Muratova at the Odessa International Film Festival.")
		.arg("--alt")
		.arg("alt=Testing alt text.")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::ends_with(
			"Film Festival]].| alt=Testing alt text.]]",
		))
		.stderr(predicates::str::contains("warning").not());

	Ok(())
}
