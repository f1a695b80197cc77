mod common;

use wte_core::AnyEmptyResult;
use wte_core::WteConfig;

#[test]
fn can_init() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::wte_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Created"))
		.stdout(predicates::str::contains("Next steps"));

	let config_path = tmp.path().join("wte.toml");
	assert!(config_path.exists());

	let Some(config) = WteConfig::load(tmp.path())? else {
		panic!("expected the generated config to be discovered");
	};
	assert_eq!(config.default_locale.as_deref(), Some("en"));
	assert_eq!(config.locale("de")?.alt_params, vec!["alternativtext", "alt"]);
	assert!(config.locale("ar")?.namespaces.contains(&"ملف".to_string()));

	Ok(())
}

#[test]
fn init_does_not_overwrite() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let config_path = tmp.path().join("wte.toml");
	std::fs::write(&config_path, "default_locale = \"de\"\n")?;

	common::wte_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already exists"));

	assert_eq!(std::fs::read_to_string(&config_path)?, "default_locale = \"de\"\n");

	Ok(())
}

#[test]
fn no_subcommand_prints_usage_hint() {
	common::wte_cmd()
		.assert()
		.code(1)
		.stderr(predicates::str::contains("wte --help"));
}
