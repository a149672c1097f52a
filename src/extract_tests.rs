use super::*;
use crate::prompt::Disabled;
use std::collections::VecDeque;
use std::path::Path;

/// Operator that answers from a fixed queue and records what was asked.
#[derive(Default)]
struct Scripted {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl Scripted {
    fn answering(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            asked: Vec::new(),
        }
    }
}

impl ValuePrompt for Scripted {
    fn ask(&mut self, key: &str) -> Result<Option<String>> {
        self.asked.push(key.to_string());
        Ok(self.answers.pop_front())
    }
}

fn lit_config() -> ExtractorConfig {
    let mut config = ExtractorConfig::new(42);
    config.marker = "@Lit.GetLiteral".to_string();
    config
}

fn run_text(
    config: &ExtractorConfig,
    reference: Option<&ReferenceIndex>,
    template: &str,
    prompt: &mut dyn ValuePrompt,
) -> (String, RunSummary) {
    let grammar = CallSiteGrammar::new(&config.marker).expect("grammar");
    let extractor = Extractor {
        config,
        grammar: &grammar,
        reference,
    };
    let mut script = OutputScript::default();
    let mut summary = RunSummary::default();
    extractor
        .process_template(template, prompt, &mut script, &mut summary)
        .expect("process template");
    (script.render(), summary)
}

const HELLO_TEMPLATE: &str = "<div>\n    <span>@Lit.GetLiteral(\"hello.msg\")</span>\n</div>\n";

#[test]
fn resolves_value_from_reference() {
    let reference = ReferenceIndex::from_text("<div>\n  <span>Hello World</span>\n</div>\n");
    let (sql, summary) = run_text(&lit_config(), Some(&reference), HELLO_TEMPLATE, &mut Disabled);
    assert_eq!(
        sql,
        "INSERT INTO `repo_literals`.`LiteralKey` (`IdPage`, `IdApp`, `IdStatus`, `Key`, `IdBusiness`) VALUES (42,2,2,'hello.msg',2);\n\
         INSERT INTO `repo_literals`.`LiteralDefaultValue` (`IdLanguage`, `Value`, IdLiteralKey) VALUES (47,'Hello World',LAST_INSERT_ID());\n\n"
    );
    assert_eq!(summary.literals_found, 1);
    assert_eq!(summary.from_reference, 1);
}

#[test]
fn not_found_without_interactive_records_comment_and_empty_value() {
    let reference = ReferenceIndex::from_text("<p>Unrelated</p>\n");
    let mut prompt = Scripted::answering(&["never used"]);
    let (sql, summary) = run_text(&lit_config(), Some(&reference), HELLO_TEMPLATE, &mut prompt);
    let lines: Vec<&str> = sql.lines().collect();
    assert_eq!(lines[0], "-- No default value found for: 'hello.msg'");
    assert!(lines[2].contains("VALUES (47,'',LAST_INSERT_ID());"));
    assert!(prompt.asked.is_empty());
    assert_eq!(summary.unresolved, 1);
}

#[test]
fn not_found_with_interactive_asks_operator() {
    let mut config = lit_config();
    config.interactive = true;
    let reference = ReferenceIndex::from_text("<p>Unrelated</p>\n");
    let mut prompt = Scripted::answering(&["It's typed"]);
    let (sql, summary) = run_text(&config, Some(&reference), HELLO_TEMPLATE, &mut prompt);
    assert_eq!(prompt.asked, vec!["hello.msg".to_string()]);
    assert!(sql.starts_with("-- No default value found for: 'hello.msg'\n"));
    assert!(sql.contains("VALUES (47,'It''s typed',LAST_INSERT_ID());"));
    assert_eq!(summary.from_operator, 1);
}

#[test]
fn reference_match_skips_operator() {
    let mut config = lit_config();
    config.interactive = true;
    let reference = ReferenceIndex::from_text("<span>Hello World</span>\n");
    let mut prompt = Scripted::default();
    run_text(&config, Some(&reference), HELLO_TEMPLATE, &mut prompt);
    assert!(prompt.asked.is_empty());
}

#[test]
fn without_reference_only_interactive_mode_decides() {
    let template = "<p>@Lit.GetLiteral(\"a\") @Lit.GetLiteral(\"b\")</p>\n";

    let (sql, summary) = run_text(&lit_config(), None, template, &mut Disabled);
    assert!(!sql.contains("--"), "no lookup comment without a reference");
    assert_eq!(summary.unresolved, 2);

    let mut config = lit_config();
    config.interactive = true;
    let mut prompt = Scripted::answering(&["A", ""]);
    let (sql, summary) = run_text(&config, None, template, &mut prompt);
    assert_eq!(prompt.asked, vec!["a".to_string(), "b".to_string()]);
    assert!(sql.contains("VALUES (47,'A',LAST_INSERT_ID());"));
    assert!(sql.contains("VALUES (47,'',LAST_INSERT_ID());"));
    assert_eq!(summary.from_operator, 2);
}

#[test]
fn exhausted_operator_input_leaves_literal_unresolved() {
    let mut config = lit_config();
    config.interactive = true;
    let mut prompt = Scripted::default();
    let (_, summary) = run_text(&config, None, HELLO_TEMPLATE, &mut prompt);
    assert_eq!(summary.unresolved, 1);
}

#[test]
fn multi_literal_line_fails_closed_but_registers_every_key() {
    let reference = ReferenceIndex::from_text("<p>One Two</p>\n");
    let template = "<p>@Lit.GetLiteral(\"one\") @Lit.GetLiteral(\"two\")</p>\n";
    let (sql, summary) = run_text(&lit_config(), Some(&reference), template, &mut Disabled);
    let comments: Vec<&str> = sql.lines().filter(|line| line.starts_with("--")).collect();
    assert_eq!(comments.len(), 2);
    assert!(comments[0].starts_with("-- No default value found for: 'one' ("));
    assert!(sql.contains("'one',2);"));
    assert!(sql.contains("'two',2);"));
    assert!(!sql.contains("'One"));
    assert_eq!(summary.literals_found, 2);
    assert_eq!(summary.unresolved, 2);
}

#[test]
fn repeated_keys_are_each_recorded_in_order() {
    let reference = ReferenceIndex::from_text("<h1>Title</h1>\n<h2>Sub</h2>\n");
    let template = "<h1>@Lit.GetLiteral(\"t\")</h1>\n<h2>@Lit.GetLiteral(\"t\")</h2>\n";
    let (sql, summary) = run_text(&lit_config(), Some(&reference), template, &mut Disabled);
    let title = sql.find("'Title'").expect("title value");
    let sub = sql.find("'Sub'").expect("sub value");
    assert!(title < sub);
    assert_eq!(summary.from_reference, 2);
}

#[test]
fn lines_without_call_sites_emit_nothing() {
    let (sql, summary) = run_text(&lit_config(), None, "<p>static</p>\n\n", &mut Disabled);
    assert!(sql.is_empty());
    assert_eq!(summary, RunSummary::default());
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn run_extract_skips_unreadable_templates_and_writes_script() {
    let dir = tempfile::tempdir().expect("tempdir");
    let good = write(dir.path(), "page.cshtml", HELLO_TEMPLATE);
    let mut config = lit_config();
    config.output = dir.path().join("out.sql");
    config.reference = Some(write(dir.path(), "page.html", "<span>Hello World</span>\n"));

    let mut progress = Vec::new();
    let summary = run_extract(
        &config,
        &[dir.path().join("missing.cshtml"), good.clone()],
        &mut Disabled,
        &mut progress,
    )
    .expect("run");

    let progress = String::from_utf8(progress).expect("utf8 progress");
    assert!(progress.contains("Processing file: "));
    assert!(progress.contains(&good.display().to_string()));
    assert!(progress.contains("missing.cshtml"));

    assert_eq!(summary.files_skipped, 1);
    assert_eq!(summary.files_processed, 1);
    assert_eq!(summary.output.as_deref(), Some(config.output.as_path()));
    let sql = std::fs::read_to_string(&config.output).expect("read output");
    assert!(sql.contains("'Hello World'"));
}

#[test]
fn run_extract_writes_nothing_when_no_literals_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = write(dir.path(), "page.cshtml", "<p>static</p>\n");
    let mut config = lit_config();
    config.output = dir.path().join("out.sql");

    let summary = run_extract(&config, &[template], &mut Disabled, &mut std::io::sink()).expect("run");
    assert_eq!(summary.literals_found, 0);
    assert!(summary.output.is_none());
    assert!(!config.output.exists());
}

#[test]
fn run_extract_fails_when_reference_is_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = write(dir.path(), "page.cshtml", HELLO_TEMPLATE);
    let mut config = lit_config();
    config.output = dir.path().join("out.sql");
    config.reference = Some(dir.path().join("absent.html"));

    let err = run_extract(&config, &[template], &mut Disabled, &mut std::io::sink()).unwrap_err();
    assert!(format!("{err:#}").contains("absent.html"));
    assert!(!config.output.exists());
}

#[test]
fn empty_reference_document_counts_as_no_reference() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = write(dir.path(), "page.cshtml", HELLO_TEMPLATE);
    let mut config = lit_config();
    config.output = dir.path().join("out.sql");
    config.reference = Some(write(dir.path(), "page.html", ""));

    let summary =
        run_extract(&config, &[template], &mut Disabled, &mut std::io::sink()).expect("run");
    assert_eq!(summary.unresolved, 1);
    let sql = std::fs::read_to_string(&config.output).expect("read output");
    assert!(!sql.contains("--"), "no lookup comment for an empty reference: {sql}");
}

#[test]
fn pattern_compile_failure_is_recorded_and_run_continues() {
    let oversized = "x".repeat(4 * 1024 * 1024);
    let template = format!(
        "<p>{oversized}@Lit.GetLiteral(\"huge\")</p>\n<span>@Lit.GetLiteral(\"hello.msg\")</span>\n"
    );
    let reference = ReferenceIndex::from_text("<span>Hello World</span>\n");
    let (sql, summary) = run_text(&lit_config(), Some(&reference), &template, &mut Disabled);

    let first = sql.lines().next().expect("comment line");
    assert!(first.starts_with("-- No default value found for: 'huge' ("));
    assert!(first.contains("failed to compile"));
    assert!(sql.contains("VALUES (47,'Hello World',LAST_INSERT_ID());"));
    assert_eq!(summary.unresolved, 1);
    assert_eq!(summary.from_reference, 1);
}
