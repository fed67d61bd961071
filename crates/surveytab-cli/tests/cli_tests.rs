//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DICTIONARY: &str = "../../survey-data/demo_dictionary.csv";
const DATASET: &str = "../../survey-data/demo_responses.csv";

fn surveytab() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("surveytab").unwrap();
    cmd.env_remove("SURVEYTAB_DICTIONARY")
        .env_remove("SURVEYTAB_DATASET");
    cmd
}

fn with_demo_survey(cmd: &mut Command) -> &mut Command {
    cmd.arg("--dictionary")
        .arg(DICTIONARY)
        .arg("--dataset")
        .arg(DATASET)
}

#[test]
fn describe_multiple_choice() {
    let researcher = format!("{:<55}     {:>3} ", "  Researcher", 2);
    let manager = format!("{:<55}     {:>3} ", "  Manager", 0);

    let mut cmd = surveytab();
    cmd.arg("describe").arg("--item").arg("role");
    with_demo_survey(&mut cmd)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Item 2: role (multiple choice)\n",
        ))
        .stdout(predicate::str::contains("What best describes your role?"))
        .stdout(predicate::str::contains(researcher))
        .stdout(predicate::str::contains(manager))
        .stdout(predicate::str::contains(
            "  1 participant chose not to respond",
        ));
}

#[test]
fn describe_checklist_with_notes() {
    let mut cmd = surveytab();
    cmd.arg("describe").arg("--item").arg("commute");
    with_demo_survey(&mut cmd)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Item 1: commute (checklist)"))
        .stdout(predicate::str::contains("  Answer"))
        .stdout(predicate::str::contains("  Rail services"))
        .stdout(predicate::str::contains("Data cleaning notes"))
        .stdout(predicate::str::contains(
            "   * Merged 'bicycle' and 'cycling' into bike.",
        ))
        .stdout(predicate::str::contains("   * Dropped two test responses."));
}

#[test]
fn describe_full_column_id_resolves_to_item() {
    let mut cmd = surveytab();
    cmd.arg("describe").arg("--item").arg("commute_[car]");
    with_demo_survey(&mut cmd)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Item 1: commute (checklist)"));
}

#[test]
fn describe_without_notes_or_table() {
    let mut cmd = surveytab();
    cmd.arg("describe")
        .arg("--item")
        .arg("commute")
        .arg("--no-notes")
        .arg("--no-table");
    with_demo_survey(&mut cmd)
        .assert()
        .success()
        .stdout(predicate::str::contains("How do you usually get to work?"))
        .stdout(predicate::str::contains("Yes").not())
        .stdout(predicate::str::contains("Data cleaning notes").not());
}

#[test]
fn describe_raw_labels() {
    let mut cmd = surveytab();
    cmd.arg("describe")
        .arg("--item")
        .arg("commute")
        .arg("--raw-labels");
    with_demo_survey(&mut cmd)
        .assert()
        .success()
        .stdout(predicate::str::contains("commute_[rail]"))
        .stdout(predicate::str::contains("Rail services").not());
}

#[test]
fn describe_free_text_hides_answers() {
    let mut cmd = surveytab();
    cmd.arg("describe").arg("--item").arg("feedback");
    with_demo_survey(&mut cmd)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "  2 participants chose to respond to this question",
        ))
        .stdout(predicate::str::contains("parking").not());
}

#[test]
fn describe_ranked() {
    let mut cmd = surveytab();
    cmd.arg("describe").arg("--item").arg("priorities");
    with_demo_survey(&mut cmd)
        .assert()
        .success()
        .stdout(predicate::str::contains("In top 5   Median Rank"))
        .stdout(predicate::str::contains("  Speed"))
        .stdout(predicate::str::contains(
            "  1 participant chose not to respond",
        ));
}

#[test]
fn describe_unknown_item() {
    let mut cmd = surveytab();
    cmd.arg("describe").arg("--item").arg("nonexistent");
    with_demo_survey(&mut cmd)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "the item 'nonexistent' could not be found",
        ))
        .stderr(predicate::str::contains("surveytab items"));
}

#[test]
fn describe_without_dictionary() {
    let dir = TempDir::new().unwrap();
    surveytab()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .arg("describe")
        .arg("--item")
        .arg("role")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no data dictionary configured"));
}

#[test]
fn items_lists_every_item() {
    let mut cmd = surveytab();
    cmd.arg("items");
    with_demo_survey(&mut cmd)
        .assert()
        .success()
        .stdout(predicate::str::contains("Prefix"))
        .stdout(predicate::str::contains("commute"))
        .stdout(predicate::str::contains("priorities"))
        .stdout(predicate::str::contains("4 items, 5 respondents"));
}

#[test]
fn validate_demo_survey() {
    let mut cmd = surveytab();
    cmd.arg("validate");
    with_demo_survey(&mut cmd)
        .assert()
        .success()
        .stdout(predicate::str::contains("7 dictionary entries, 4 items, 5 respondents"))
        .stdout(predicate::str::contains("Survey valid."));
}

#[test]
fn validate_reports_mismatches() {
    surveytab()
        .arg("validate")
        .arg("--dictionary")
        .arg(DICTIONARY)
        .arg("--dataset")
        .arg("../../survey-data/broken_responses.csv")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[extra] WARNING: column has no data dictionary entry",
        ))
        .stdout(predicate::str::contains(
            "[feedback] WARNING: column is missing from the dataset",
        ))
        .stdout(predicate::str::contains(
            "[commute_[car]] WARNING: 1 checklist value(s) are not 0/1 flags",
        ))
        .stdout(predicate::str::contains("warning(s) found."));
}

#[test]
fn validate_nonexistent_file() {
    surveytab()
        .arg("validate")
        .arg("--dictionary")
        .arg("nonexistent.csv")
        .arg("--dataset")
        .arg(DATASET)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("failed to read data dictionary"));
}

#[test]
fn codebook_writes_all_formats() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("reports");

    let mut cmd = surveytab();
    cmd.arg("codebook")
        .arg("--format")
        .arg("all")
        .arg("--output")
        .arg(&out);
    with_demo_survey(&mut cmd)
        .assert()
        .success()
        .stdout(predicate::str::contains("codebook.txt"))
        .stdout(predicate::str::contains("codebook.md"))
        .stdout(predicate::str::contains("codebook.json"));

    let text = std::fs::read_to_string(out.join("codebook.txt")).unwrap();
    assert!(text.starts_with("Item 1: commute (checklist)"));
    assert!(text.contains("Item 4: priorities (ranked)"));
    assert!(!text.contains("Items not described"));

    let json = std::fs::read_to_string(out.join("codebook.json")).unwrap();
    assert!(json.contains("\"dataset_rows\": 5"));

    let md = std::fs::read_to_string(out.join("codebook.md")).unwrap();
    assert!(md.contains("## Item 3: feedback (free text)"));
}

#[test]
fn codebook_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    let mut cmd = surveytab();
    cmd.arg("codebook")
        .arg("--format")
        .arg("pdf")
        .arg("--output")
        .arg(dir.path());
    with_demo_survey(&mut cmd)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format 'pdf'"));
}

#[test]
fn config_file_supplies_paths() {
    let dir = TempDir::new().unwrap();
    let dictionary = std::fs::canonicalize(DICTIONARY).unwrap();
    let dataset = std::fs::canonicalize(DATASET).unwrap();
    let config = dir.path().join("surveytab.toml");
    std::fs::write(
        &config,
        format!(
            "dictionary = {:?}\ndataset = {:?}\nshow_notes = false\n",
            dictionary.display().to_string(),
            dataset.display().to_string()
        ),
    )
    .unwrap();

    surveytab()
        .arg("describe")
        .arg("--item")
        .arg("commute")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Data cleaning notes").not());
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    surveytab()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created surveytab.toml"));

    let content = std::fs::read_to_string(dir.path().join("surveytab.toml")).unwrap();
    assert!(content.contains("list_delimiter = \" @ \""));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    surveytab()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    surveytab()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    surveytab()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("describe"))
        .stdout(predicate::str::contains("codebook"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn version_output() {
    surveytab()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("surveytab"));
}
