mod common;

use predicates::prelude::PredicateBooleanExt;
use rstest::rstest;
use serde_json::Value;
use similar_asserts::assert_eq;
use wte_core::AnyEmptyResult;

const NO_ALT: &str = "text text [[File:Test no alt.jpg|caption here]] text text";
const WITH_ALT: &str = "text text [[File:Test with alt.jpg|caption here|alt=Cool picture]] text text";

#[test]
fn missing_alt_reports_links_and_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = tmp.path().join("page.txt");
	std::fs::write(&page, NO_ALT)?;

	common::wte_cmd()
		.arg("missing-alt")
		.arg(&page)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stdout(predicates::str::contains("1 media link(s) without alt text"))
		.stdout(predicates::str::contains("File:Test no alt.jpg (offset 10)"))
		.stdout(predicates::str::contains("[[File:Test no alt.jpg|caption here]]"));

	Ok(())
}

#[test]
fn missing_alt_passes_when_alt_text_present() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = tmp.path().join("page.txt");
	std::fs::write(&page, WITH_ALT)?;

	common::wte_cmd()
		.arg("missing-alt")
		.arg(&page)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("All media links have alt text."));

	Ok(())
}

#[test]
fn missing_alt_json_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = tmp.path().join("page.txt");
	std::fs::write(&page, NO_ALT)?;

	let output = common::wte_cmd()
		.arg("missing-alt")
		.arg(&page)
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;

	assert_eq!(output.status.code(), Some(1));
	let json: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(json["ok"], Value::Bool(false));
	assert_eq!(json["locale"], "en");
	assert_eq!(json["missing"][0]["file"], "File:Test no alt.jpg");
	assert_eq!(json["missing"][0]["offset"], 10);
	assert_eq!(json["missing"][0]["length"], 37);

	Ok(())
}

#[test]
fn missing_alt_reads_stdin() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::wte_cmd()
		.arg("missing-alt")
		.arg("-")
		.arg("--path")
		.arg(tmp.path())
		.write_stdin(WITH_ALT)
		.assert()
		.success();

	Ok(())
}

#[rstest]
#[case::german_alt("[[Datei:Test.jpg|caption here|alternativtext=Cool picture]]", true)]
#[case::english_fallback("[[Datei:Test.jpg|alt=Cool picture|caption here]]", true)]
#[case::german_no_alt("[[Datei:Test.jpg|caption here]]", false)]
fn missing_alt_uses_configured_locale(#[case] link: &str, #[case] has_alt: bool) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("wte.toml"),
		"default_locale = \"de\"\n\n[locales.de]\nnamespaces = [\"Datei\", \"Bild\"]\nalt_params \
		 = [\"alternativtext\", \"alt\"]\n",
	)?;
	let page = tmp.path().join("page.txt");
	std::fs::write(&page, format!("text text {link} text text"))?;

	let assert = common::wte_cmd()
		.arg("missing-alt")
		.arg(&page)
		.arg("--path")
		.arg(tmp.path())
		.assert();

	if has_alt {
		assert.success();
	} else {
		assert
			.code(1)
			.stdout(predicates::str::contains("Datei:Test.jpg (offset 10)"));
	}

	Ok(())
}

#[test]
fn missing_alt_accepts_aliases_from_flags() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = tmp.path().join("page.txt");
	std::fs::write(
		&page,
		"[[ملف:Feral_cat_2.JPG|تصغير|يمين|بديل=test2|test]]\n[[ملف:قطة.jpg|تصغير|قطة]]",
	)?;

	common::wte_cmd()
		.arg("missing-alt")
		.arg(&page)
		.arg("--locale")
		.arg("ar")
		.arg("--namespace")
		.arg("ملف")
		.arg("--alt-param")
		.arg("بديل")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stdout(predicates::str::contains("ملف:قطة.jpg"))
		.stdout(predicates::str::contains("Feral_cat_2").not());

	Ok(())
}

#[test]
fn missing_alt_rejects_unknown_locale() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = tmp.path().join("page.txt");
	std::fs::write(&page, NO_ALT)?;

	common::wte_cmd()
		.arg("missing-alt")
		.arg(&page)
		.arg("--locale")
		.arg("fr")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("no locale table configured for `fr`"));

	Ok(())
}

#[test]
fn missing_alt_rejects_large_input() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join(".wte.toml"), "max_file_size = 16\n")?;
	let page = tmp.path().join("page.txt");
	std::fs::write(&page, NO_ALT)?;

	common::wte_cmd()
		.arg("missing-alt")
		.arg(&page)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("input too large"));

	Ok(())
}

#[test]
fn missing_alt_rejects_deeply_nested_input() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("wte.toml"), "max_nesting_depth = 2\n")?;
	let page = tmp.path().join("page.txt");
	std::fs::write(&page, "{{a|{{b|{{c}}}}}}")?;

	common::wte_cmd()
		.arg("missing-alt")
		.arg(&page)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("nesting exceeds 2 levels"));

	Ok(())
}
