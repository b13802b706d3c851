mod common;

use retag_core::AnyEmptyResult;

const CARD_CONFIG: &str = r#"
target = "src/App.tsx"

[[recipes]]
name = "card-to-paper"
description = "Swap AppCard for Paper"
message = "Cards swapped"
target = "src/Cards.tsx"

[[recipes.rules]]
type = "substitute"
pattern = '(?s)<AppCard>(?P<body>.*?)</AppCard>'
template = '<Paper>${body}</Paper>'
"#;

#[test]
fn config_target_applies_to_builtin_recipes() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("retag.toml"), CARD_CONFIG)?;
	let app = common::write_file(tmp.path(), "src/App.tsx", "<TextField />\n")?;

	common::retag_cmd()
		.arg("run")
		.arg("app-text-field")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	assert_eq!(std::fs::read_to_string(&app)?, "<AppTextField />\n");

	Ok(())
}

#[test]
fn config_recipe_runs_against_its_own_target() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("retag.toml"), CARD_CONFIG)?;
	let cards = common::write_file(tmp.path(), "src/Cards.tsx", "<AppCard>\n  hi\n</AppCard>\n")?;

	common::retag_cmd()
		.arg("run")
		.arg("card-to-paper")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Cards swapped"));

	assert_eq!(std::fs::read_to_string(&cards)?, "<Paper>\n  hi\n</Paper>\n");

	Ok(())
}

#[test]
fn dot_config_location_is_discovered() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), ".config/retag.toml", CARD_CONFIG)?;

	common::retag_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("card-to-paper"))
		.stdout(predicates::str::contains("4 recipe(s)"));

	Ok(())
}

#[test]
fn invalid_config_is_reported() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("retag.toml"), "[[recipes]]\nname = 1\n")?;

	common::retag_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}

#[test]
fn config_recipe_with_bad_template_is_reported() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("retag.toml"),
		"[[recipes]]\nname = \"broken\"\n\n[[recipes.rules]]\ntype = \"substitute\"\npattern = \
		 \"(?P<a>x)\"\ntemplate = \"${b}\"\n",
	)?;

	common::retag_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("capture group `b`"));

	Ok(())
}
