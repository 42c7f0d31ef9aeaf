//! Command flows against a temporary vault with a mock model.

use std::path::Path;

use chrono::DateTime;
use mymind_cli::commands::{batch, recap, save, scan};
use mymind_cli::Settings;
use mymind_core::AiResult;
use mymind_extract::{Extractor, FetchConfig};
use mymind_inference::mock::MockAnalyzer;
use mymind_vault::Vault;

fn settings(root: &Path, dry_run: bool) -> Settings {
    Settings {
        vault: Vault::new(root, "inbox"),
        model: "mock".to_string(),
        custom_prompt: Some("keep it short".to_string()),
        dry_run,
    }
}

fn extractor() -> Extractor {
    Extractor::new(FetchConfig::default()).expect("Failed to create extractor")
}

fn result(title: &str, tags: &[&str]) -> AiResult {
    AiResult {
        title: title.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        summary: format!("About {}.", title),
    }
}

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

#[tokio::test]
async fn test_save_writes_note_and_cascades_related() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(dir.path(), false);
    let analyzer = MockAnalyzer::new()
        .with_result_for("tokio", result("Tokio Runtime", &["rust", "async"]))
        .with_result_for("borrow", result("Borrow Checker", &["rust"]));

    let mut out = Vec::new();
    save::run_save(&settings, &extractor(), &analyzer, "borrow checker rules", &mut out)
        .await
        .unwrap();
    save::run_save(&settings, &extractor(), &analyzer, "tokio runtime internals", &mut out)
        .await
        .unwrap();

    let first = dir.path().join("inbox/borrow-checker.md");
    let second = dir.path().join("inbox/tokio-runtime.md");
    assert_eq!(
        output(out),
        format!("Saved to {}\nSaved to {}\n", first.display(), second.display())
    );

    let borrow = std::fs::read_to_string(&first).unwrap();
    assert!(borrow.ends_with("\n## Related\n\n- [[tokio-runtime|Tokio Runtime]] (rust)\n"));
    let tokio_note = std::fs::read_to_string(&second).unwrap();
    assert!(tokio_note.ends_with("- [[borrow-checker|Borrow Checker]] (rust)\n"));

    let calls = analyzer.get_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].custom_prompt.as_deref(), Some("keep it short"));
}

#[tokio::test]
async fn test_save_duplicate_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(dir.path(), false);
    let analyzer = MockAnalyzer::new();

    let mut out = Vec::new();
    save::run_save(&settings, &extractor(), &analyzer, "same text", &mut out)
        .await
        .unwrap();
    save::run_save(&settings, &extractor(), &analyzer, "same text", &mut out)
        .await
        .unwrap();

    assert_eq!(analyzer.analyze_call_count(), 1);
    assert_eq!(output(out).lines().count(), 1);
}

#[tokio::test]
async fn test_save_dry_run_prints_markdown() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(dir.path(), true);
    let analyzer = MockAnalyzer::new().with_result(result("Preview Me", &["draft"]));

    let mut out = Vec::new();
    save::run_save(&settings, &extractor(), &analyzer, "a thought", &mut out)
        .await
        .unwrap();

    let markdown = output(out);
    assert!(markdown.starts_with("---\ntitle: \"Preview Me\"\n"));
    assert!(markdown.contains("kind: note\n"));
    assert!(markdown.contains("tags:\n  - draft\n---\n\n# Preview Me\n\nAbout Preview Me.\n"));
    assert!(!dir.path().join("inbox").exists());
}

#[tokio::test]
async fn test_batch_continues_after_failure() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(dir.path(), false);
    let list = dir.path().join("inputs.txt");
    std::fs::write(
        &list,
        "# things to save\nfirst idea\n\nboom goes the model\nsecond idea\nfirst idea\n",
    )
    .unwrap();

    let analyzer = MockAnalyzer::new()
        .with_result_for("first", result("First Idea", &["ideas"]))
        .with_result_for("second", result("Second Idea", &["ideas"]))
        .with_failure_on("boom");

    let mut out = Vec::new();
    let summary = batch::run_batch(&settings, &extractor(), &analyzer, &list, &mut out)
        .await
        .unwrap();

    assert_eq!(summary.total, 4);
    assert_eq!(summary.errors, 1);
    // the repeated input is a duplicate and never reaches the model
    assert_eq!(analyzer.analyze_call_count(), 3);
    assert!(dir.path().join("inbox/first-idea.md").exists());
    assert!(dir.path().join("inbox/second-idea.md").exists());

    let text = output(out);
    assert!(text.starts_with("Processing: first idea...\n  Saved to "));
    assert!(text.ends_with("Processed 4 inputs (1 errors)\n"));
}

#[tokio::test]
async fn test_batch_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(dir.path(), false);
    let mut out = Vec::new();
    let result = batch::run_batch(
        &settings,
        &extractor(),
        &MockAnalyzer::new(),
        &dir.path().join("nope.txt"),
        &mut out,
    )
    .await;
    assert!(result.is_err());
}

fn write_dated(root: &Path, name: &str, title: &str, created: &str) {
    let content = format!(
        "---\ntitle: \"{}\"\ncreated: \"{}\"\nkind: note\ntags:\n  - log\n---\n\n# {}\n\nBody of {}.\n",
        title, created, title, title
    );
    std::fs::write(root.join(name), content).unwrap();
}

#[tokio::test]
async fn test_recap_collects_recent_notes_and_writes_recap() {
    let dir = tempfile::tempdir().unwrap();
    write_dated(dir.path(), "recent.md", "Recent", "2024-06-09T12:00:00Z");
    write_dated(dir.path(), "old.md", "Old", "2024-05-01T12:00:00Z");
    let settings = settings(dir.path(), false);
    let generator = MockAnalyzer::new().with_recap("## Themes\n\n- logging");
    let now = DateTime::parse_from_rfc3339("2024-06-10T12:00:00Z").unwrap();

    let mut out = Vec::new();
    let path = recap::run_recap(&settings, &generator, "7d", now, &mut out)
        .await
        .unwrap()
        .expect("recap written");

    assert_eq!(path, dir.path().join("recap-7d.md"));
    let digest = &generator.get_calls()[0].input;
    assert!(digest.contains("## Recent\n"));
    assert!(digest.contains("Body of Recent."));
    assert!(!digest.contains("## Old\n"));

    let recap_note = std::fs::read_to_string(&path).unwrap();
    assert!(recap_note.starts_with("---\ntitle: \"Recap 7d\"\ncreated: \"2024-06-10T12:00:00Z\"\nkind: recap\n"));
    assert!(recap_note.ends_with("---\n\n## Themes\n\n- logging\n"));

    assert_eq!(
        output(out),
        format!(
            "Generating recap for 1 notes from the last 7d...\nSaved recap to {}\n",
            path.display()
        )
    );
}

#[tokio::test]
async fn test_recap_without_recent_notes_skips_model() {
    let dir = tempfile::tempdir().unwrap();
    write_dated(dir.path(), "old.md", "Old", "2024-01-01T12:00:00Z");
    let settings = settings(dir.path(), false);
    let generator = MockAnalyzer::new();
    let now = DateTime::parse_from_rfc3339("2024-06-10T12:00:00Z").unwrap();

    let mut out = Vec::new();
    let path = recap::run_recap(&settings, &generator, "24h", now, &mut out)
        .await
        .unwrap();
    assert!(path.is_none());
    assert_eq!(generator.recap_call_count(), 0);
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_recap_rejects_bad_period() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(dir.path(), false);
    let now = DateTime::parse_from_rfc3339("2024-06-10T12:00:00Z").unwrap();
    let mut out = Vec::new();
    let err = recap::run_recap(&settings, &MockAnalyzer::new(), "3mo", now, &mut out)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("period"));
}

#[tokio::test]
async fn test_scan_tags_plain_markdown() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("jot.md"), "Remember to profile the allocator.\n").unwrap();
    let settings = settings(dir.path(), false);
    let analyzer = MockAnalyzer::new().with_result(result("Allocator Profiling", &["perf"]));

    let mut out = Vec::new();
    let report = scan::run_scan(&settings, &analyzer, false, &mut out)
        .await
        .unwrap();

    assert_eq!(report.processed, 1);
    let text = output(out);
    assert!(text.contains("Done: 1 processed, 0 skipped, 0 errors (of 1 files)\n"));
    let jot = std::fs::read_to_string(dir.path().join("jot.md")).unwrap();
    assert!(jot.starts_with("---\ntitle: \"Allocator Profiling\"\n"));
    assert!(jot.ends_with("---\n\nRemember to profile the allocator.\n"));
}
