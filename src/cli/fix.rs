//! Fix and check commands - apply the patch set to a directory of html files.
//!
//! `fix` rewrites files whose content changed; `check` runs the same
//! pipeline without writing and exits nonzero when fixes are pending.
//! Either way each file gets one status line, followed by a final summary.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use jwalk::WalkDir;
use owo_colors::OwoColorize;
use rayon::prelude::*;
use tempfile::NamedTempFile;

use crate::config::Config;
use crate::log;
use crate::patch::{PatchSet, enabled_rules};
use crate::utils::{plural_count, plural_s};

// ============================================================================
// Per-file outcome
// ============================================================================

/// Per-file processing outcome.
#[derive(Debug)]
enum FileStatus {
    /// Content changed and (unless dry run) was rewritten.
    Fixed,
    /// Patch set produced identical content; file untouched.
    Unchanged,
    /// File vanished between scan and read.
    Skipped,
    /// Read or write failed; the original file is left intact.
    Failed(String),
}

struct FileReport {
    /// Path relative to the input directory, for display.
    path: PathBuf,
    status: FileStatus,
}

// ============================================================================
// Command entry
// ============================================================================

/// Run the fix (or, with `dry_run`, check) command.
pub fn run_fix(config: &Config, dry_run: bool) -> Result<()> {
    let module = if dry_run { "check" } else { "fix" };

    // A malformed rule definition aborts here, before any file is read.
    let rules = enabled_rules(config.rules.accessibility, config.rules.performance);
    let patches = PatchSet::new(rules)?;

    let dir = &config.input.dir;
    let files = collect_html_files(dir, config.input.recursive);
    if files.is_empty() {
        log!(module; "no html files found in {}", dir.display());
        return Ok(());
    }

    log!(
        module; "applying {} to {}",
        plural_count(patches.len(), "rule"),
        plural_count(files.len(), "file")
    );

    // Files are independent, so parallel processing only changes wall time.
    // Reports are collected in scan order and printed afterwards either way.
    let reports: Vec<FileReport> = if config.fix.parallel {
        files
            .par_iter()
            .map(|path| process_file(path, dir, &patches, dry_run))
            .collect()
    } else {
        files
            .iter()
            .map(|path| process_file(path, dir, &patches, dry_run))
            .collect()
    };

    let (mut fixed, mut unchanged, mut skipped, mut failed) = (0usize, 0usize, 0usize, 0usize);
    for report in &reports {
        print_report(report, dry_run);
        match report.status {
            FileStatus::Fixed => fixed += 1,
            FileStatus::Unchanged => unchanged += 1,
            FileStatus::Skipped => skipped += 1,
            FileStatus::Failed(_) => failed += 1,
        }
    }

    let verb = if dry_run { "would change" } else { "fixed" };
    let mut summary = vec![format!("{fixed} {verb}"), format!("{unchanged} unchanged")];
    if skipped > 0 {
        summary.push(format!("{skipped} skipped"));
    }
    if failed > 0 {
        summary.push(format!("{failed} failed"));
    }
    log!(module; "done: {}", summary.join(", "));

    if failed > 0 {
        bail!("{} file{} failed", failed, plural_s(failed));
    }
    if dry_run && fixed > 0 {
        bail!("{} file{} would change", fixed, plural_s(fixed));
    }
    Ok(())
}

// ============================================================================
// File discovery
// ============================================================================

/// Collect `*.html` files under `dir`, sorted by path for deterministic
/// processing and report order.
fn collect_html_files(dir: &Path, recursive: bool) -> Vec<PathBuf> {
    let walker = if recursive {
        WalkDir::new(dir)
    } else {
        WalkDir::new(dir).max_depth(1)
    };

    let mut files: Vec<_> = walker
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "html"))
        .collect();
    files.sort();
    files
}

// ============================================================================
// Per-file processing
// ============================================================================

fn process_file(path: &Path, root: &Path, patches: &PatchSet, dry_run: bool) -> FileReport {
    FileReport {
        path: path.strip_prefix(root).unwrap_or(path).to_path_buf(),
        status: apply_to_file(path, patches, dry_run),
    }
}

fn apply_to_file(path: &Path, patches: &PatchSet, dry_run: bool) -> FileStatus {
    let doc = match fs::read_to_string(path) {
        Ok(content) => content,
        // The scan ran moments ago; a vanished file is a race, not an error.
        Err(e) if e.kind() == ErrorKind::NotFound => return FileStatus::Skipped,
        Err(e) => return FileStatus::Failed(e.to_string()),
    };

    let outcome = patches.apply(&doc);
    if !outcome.changed {
        return FileStatus::Unchanged;
    }
    if dry_run {
        return FileStatus::Fixed;
    }

    match write_atomic(path, &outcome.text) {
        Ok(()) => FileStatus::Fixed,
        Err(e) => FileStatus::Failed(e.to_string()),
    }
}

/// Replace `path` through a temp file in the same directory, so readers
/// never observe a partial write and a failure leaves the original intact.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path.parent().context("file has no parent directory")?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(path)?;
    Ok(())
}

// ============================================================================
// Report output
// ============================================================================

fn print_report(report: &FileReport, dry_run: bool) {
    let path = report.path.display();
    match &report.status {
        FileStatus::Fixed if dry_run => println!("{} would fix: {path}", "⚠".yellow()),
        FileStatus::Fixed => println!("{} fixed: {path}", "✓".green()),
        FileStatus::Unchanged => println!("{}", format!("no changes: {path}").dimmed()),
        FileStatus::Skipped => {
            println!("{}", format!("skipped: {path} (file no longer exists)").dimmed());
        }
        FileStatus::Failed(reason) => println!("{} failed: {path} ({reason})", "✗".red()),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn default_patches() -> PatchSet {
        PatchSet::new(enabled_rules(true, true)).unwrap()
    }

    const FIXABLE: &str = "<button id=\"menu-btn\" class=\"md:hidden p-1\">x</button>";
    const PLAIN: &str = "<html><body><p>plain page</p></body></html>";

    #[test]
    fn test_collect_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.html"), "b").unwrap();
        fs::write(dir.path().join("a.html"), "a").unwrap();
        fs::write(dir.path().join("notes.txt"), "t").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/c.html"), "c").unwrap();

        let top = collect_html_files(dir.path(), false);
        let names: Vec<_> = top
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["a.html", "b.html"]);

        let all = collect_html_files(dir.path(), true);
        assert_eq!(all.len(), 3);
        assert!(all.iter().any(|p| p.ends_with("sub/c.html")));
    }

    #[test]
    fn test_fix_rewrites_changed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, FIXABLE).unwrap();

        let status = apply_to_file(&path, &default_patches(), false);
        assert!(matches!(status, FileStatus::Fixed));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("aria-label=\"Buka menu navigasi\""));

        // A second pass sees already-patched content.
        let status = apply_to_file(&path, &default_patches(), false);
        assert!(matches!(status, FileStatus::Unchanged));
    }

    #[test]
    fn test_unchanged_file_kept_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, PLAIN).unwrap();

        let status = apply_to_file(&path, &default_patches(), false);
        assert!(matches!(status, FileStatus::Unchanged));
        assert_eq!(fs::read_to_string(&path).unwrap(), PLAIN);
    }

    #[test]
    fn test_check_never_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, FIXABLE).unwrap();

        let status = apply_to_file(&path, &default_patches(), true);
        assert!(matches!(status, FileStatus::Fixed));
        assert_eq!(fs::read_to_string(&path).unwrap(), FIXABLE);
    }

    #[test]
    fn test_vanished_file_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.html");

        let status = apply_to_file(&path, &default_patches(), false);
        assert!(matches!(status, FileStatus::Skipped));
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");

        // No leftover temp files.
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_report_path_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, PLAIN).unwrap();

        let report = process_file(&path, dir.path(), &default_patches(), false);
        assert_eq!(report.path, Path::new("page.html"));
    }
}
