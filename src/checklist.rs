//! Installability checks for a web app project.
//!
//! Five independent checks look at the manifest, the service worker, the
//! icon inventory, HTTPS (informational) and the manifest link in the entry
//! layout. Every check runs and reports even when an earlier one failed; the
//! overall verdict is the AND of all of them.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

pub const REQUIRED_FIELDS: [&str; 5] = ["name", "short_name", "start_url", "display", "icons"];
pub const REQUIRED_ICON_SIZES: [&str; 2] = ["192x192", "512x512"];
pub const DISPLAY_MODES: [&str; 3] = ["standalone", "fullscreen", "minimal-ui"];
pub const WORKER_EVENTS: [&str; 3] = ["install", "activate", "fetch"];
pub const REQUIRED_ICON_FILES: [&str; 4] = [
    "icon-192x192.png",
    "icon-512x512.png",
    "favicon-16x16.png",
    "favicon-32x32.png",
];
pub const MANIFEST_LINK: &str = "manifest: '/manifest.json'";

/// Where the checked files live inside a project.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    pub manifest: PathBuf,
    pub service_worker: PathBuf,
    pub icons_dir: PathBuf,
    pub favicon: PathBuf,
    pub entry_layout: PathBuf,
}

impl ProjectLayout {
    /// The conventional Next.js layout rooted at `root`.
    pub fn under(root: &Path) -> Self {
        Self {
            manifest: root.join("public/manifest.json"),
            service_worker: root.join("public/sw.js"),
            icons_dir: root.join("public/icons"),
            favicon: root.join("public/favicon.ico"),
            entry_layout: root.join("src/app/layout.tsx"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    name: Option<Value>,
    short_name: Option<Value>,
    start_url: Option<Value>,
    display: Option<Value>,
    icons: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ManifestIcon {
    #[serde(default)]
    sizes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestProblem {
    Unreadable(String),
    MissingFields(Vec<&'static str>),
    IconsNotAList,
    TooFewIcons(usize),
    MissingIconSizes(Vec<&'static str>),
    InvalidDisplay(Option<String>),
    MissingStartUrl,
}

impl fmt::Display for ManifestProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestProblem::Unreadable(err) => write!(f, "manifest could not be read: {err}"),
            ManifestProblem::MissingFields(fields) => {
                write!(f, "missing required fields: {}", fields.join(", "))
            }
            ManifestProblem::IconsNotAList => f.write_str("icons must be a list of icon records"),
            ManifestProblem::TooFewIcons(n) => {
                write!(f, "need at least 2 icons (192x192 and 512x512), found {n}")
            }
            ManifestProblem::MissingIconSizes(sizes) => {
                write!(f, "missing required icon sizes: {}", sizes.join(", "))
            }
            ManifestProblem::InvalidDisplay(Some(mode)) => write!(f, "invalid display mode: {mode}"),
            ManifestProblem::InvalidDisplay(None) => f.write_str("display mode is not a string"),
            ManifestProblem::MissingStartUrl => f.write_str("start_url is missing or empty"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestReport {
    pub problems: Vec<ManifestProblem>,
}

impl ManifestReport {
    pub fn passed(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn missing_fields(&self) -> &[&'static str] {
        self.problems
            .iter()
            .find_map(|p| match p {
                ManifestProblem::MissingFields(fields) => Some(fields.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_manifest(source: &str) -> Result<RawManifest> {
    Ok(serde_json::from_str(source)?)
}

/// Read and check the manifest at `path`.
pub fn validate_manifest(path: &Path) -> ManifestReport {
    match read_text(path).and_then(|source| parse_manifest(&source)) {
        Ok(manifest) => check_manifest(&manifest),
        Err(err) => ManifestReport {
            problems: vec![ManifestProblem::Unreadable(err.to_string())],
        },
    }
}

/// Check manifest JSON text without touching the filesystem.
pub fn validate_manifest_str(source: &str) -> ManifestReport {
    match parse_manifest(source) {
        Ok(manifest) => check_manifest(&manifest),
        Err(err) => ManifestReport {
            problems: vec![ManifestProblem::Unreadable(err.to_string())],
        },
    }
}

fn check_manifest(manifest: &RawManifest) -> ManifestReport {
    let mut problems = Vec::new();

    let present = [
        manifest.name.is_some(),
        manifest.short_name.is_some(),
        manifest.start_url.is_some(),
        manifest.display.is_some(),
        manifest.icons.is_some(),
    ];
    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .zip(present)
        .filter(|(_, present)| !present)
        .map(|(field, _)| *field)
        .collect();
    if !missing.is_empty() {
        problems.push(ManifestProblem::MissingFields(missing));
    }

    if let Some(icons) = &manifest.icons {
        match Vec::<ManifestIcon>::deserialize(icons) {
            Ok(icons) => {
                if icons.len() < 2 {
                    problems.push(ManifestProblem::TooFewIcons(icons.len()));
                }
                // `sizes` may list several sizes separated by spaces.
                let declared: Vec<&str> = icons.iter().flat_map(|i| i.sizes.split_whitespace()).collect();
                let absent: Vec<&'static str> = REQUIRED_ICON_SIZES
                    .iter()
                    .copied()
                    .filter(|size| !declared.contains(size))
                    .collect();
                if !absent.is_empty() {
                    problems.push(ManifestProblem::MissingIconSizes(absent));
                }
            }
            Err(_) => problems.push(ManifestProblem::IconsNotAList),
        }
    }

    if let Some(display) = &manifest.display {
        match display.as_str() {
            Some(mode) if DISPLAY_MODES.contains(&mode) => {}
            Some(mode) => problems.push(ManifestProblem::InvalidDisplay(Some(mode.to_string()))),
            None => problems.push(ManifestProblem::InvalidDisplay(None)),
        }
    }

    let start_url_ok = matches!(&manifest.start_url, Some(Value::String(url)) if !url.is_empty());
    if manifest.start_url.is_some() && !start_url_ok {
        problems.push(ManifestProblem::MissingStartUrl);
    }

    ManifestReport { problems }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    pub found: bool,
    pub missing_events: Vec<&'static str>,
}

impl WorkerReport {
    pub fn passed(&self) -> bool {
        self.found && self.missing_events.is_empty()
    }
}

/// Look for `addEventListener('<event>'` for each lifecycle event in the
/// service worker source.
pub fn check_worker_source(source: &str) -> WorkerReport {
    let missing_events = WORKER_EVENTS
        .iter()
        .copied()
        .filter(|event| {
            let single = format!("addEventListener('{event}'");
            let double = format!("addEventListener(\"{event}\"");
            !source.contains(&single) && !source.contains(&double)
        })
        .collect();
    WorkerReport {
        found: true,
        missing_events,
    }
}

pub fn validate_service_worker(path: &Path) -> WorkerReport {
    match read_text(path) {
        Ok(source) => check_worker_source(&source),
        Err(err) => {
            tracing::debug!("service worker unavailable: {err}");
            WorkerReport {
                found: false,
                missing_events: WORKER_EVENTS.to_vec(),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconFile {
    pub name: &'static str,
    /// `None` when the file is absent.
    pub bytes: Option<u64>,
}

impl IconFile {
    pub fn usable(&self) -> bool {
        matches!(self.bytes, Some(n) if n > 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconReport {
    pub dir_found: bool,
    pub files: Vec<IconFile>,
    pub favicon_bytes: Option<u64>,
}

impl IconReport {
    pub fn passed(&self) -> bool {
        self.dir_found && self.files.iter().all(IconFile::usable) && self.favicon_bytes.is_some()
    }

    /// Required icons that are absent or empty.
    pub fn unusable(&self) -> Vec<&'static str> {
        self.files.iter().filter(|f| !f.usable()).map(|f| f.name).collect()
    }
}

fn file_size(path: &Path) -> Option<u64> {
    std::fs::metadata(path).ok().filter(|m| m.is_file()).map(|m| m.len())
}

pub fn validate_icons(icons_dir: &Path, favicon: &Path) -> IconReport {
    IconReport {
        dir_found: icons_dir.is_dir(),
        files: REQUIRED_ICON_FILES
            .iter()
            .map(|&name| IconFile {
                name,
                bytes: file_size(&icons_dir.join(name)),
            })
            .collect(),
        favicon_bytes: file_size(favicon),
    }
}

/// HTTPS cannot be checked locally; the hosting platform provides it in
/// production. Always passes.
pub fn validate_https() -> bool {
    true
}

pub fn validate_manifest_registration(entry_layout: &Path) -> bool {
    match read_text(entry_layout) {
        Ok(source) => source.contains(MANIFEST_LINK),
        Err(err) => {
            tracing::debug!("entry layout unavailable: {err}");
            false
        }
    }
}

/// Results of every check for one project.
#[derive(Debug, Clone)]
pub struct Summary {
    pub manifest: ManifestReport,
    pub worker: WorkerReport,
    pub icons: IconReport,
    pub https: bool,
    pub registration: bool,
}

impl Summary {
    pub fn results(&self) -> [bool; 5] {
        [
            self.manifest.passed(),
            self.worker.passed(),
            self.icons.passed(),
            self.https,
            self.registration,
        ]
    }

    pub fn passed_count(&self) -> usize {
        self.results().iter().filter(|r| **r).count()
    }

    pub fn all_passed(&self) -> bool {
        self.results().iter().all(|r| *r)
    }
}

pub fn run_all(project: &ProjectLayout) -> Summary {
    Summary {
        manifest: validate_manifest(&project.manifest),
        worker: validate_service_worker(&project.service_worker),
        icons: validate_icons(&project.icons_dir, &project.favicon),
        https: validate_https(),
        registration: validate_manifest_registration(&project.entry_layout),
    }
}

/// Print a human readable report in check order.
pub fn print_summary(project: &ProjectLayout, summary: &Summary) {
    println!("Validating {}...", project.manifest.display());
    if summary.manifest.passed() {
        println!("  ✓ Manifest has all required fields, icons and a valid display mode");
    }
    for problem in &summary.manifest.problems {
        println!("  ✗ {problem}");
    }

    println!("Validating {}...", project.service_worker.display());
    match (summary.worker.found, summary.worker.missing_events.as_slice()) {
        (false, _) => println!("  ✗ Service worker not found"),
        (true, []) => println!("  ✓ install, activate and fetch listeners present"),
        (true, missing) => println!("  ✗ Missing event listeners: {}", missing.join(", ")),
    }

    println!("Validating {}...", project.icons_dir.display());
    if !summary.icons.dir_found {
        println!("  ✗ Icons directory not found");
    }
    for file in &summary.icons.files {
        match file.bytes {
            Some(0) => println!("  ✗ {} is empty (0 bytes)", file.name),
            Some(n) => println!("  ✓ {} ({n} bytes)", file.name),
            None => println!("  ✗ {} missing", file.name),
        }
    }
    match summary.icons.favicon_bytes {
        Some(n) => println!("  ✓ {} ({n} bytes)", project.favicon.display()),
        None => println!("  ✗ {} missing", project.favicon.display()),
    }

    println!("Validating HTTPS...");
    println!("  ℹ HTTPS is required in production and provided by the hosting platform");

    println!("Validating manifest registration...");
    if summary.registration {
        println!("  ✓ Manifest linked from {}", project.entry_layout.display());
    } else {
        println!(
            "  ✗ {} is missing or does not contain {MANIFEST_LINK}",
            project.entry_layout.display()
        );
    }

    println!();
    if summary.all_passed() {
        println!("✓ All installability requirements met");
    } else {
        println!(
            "✗ {}/{} checks passed, the app may not be installable",
            summary.passed_count(),
            summary.results().len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "name": "AEYE Summarizer",
        "short_name": "AEYE",
        "start_url": "/",
        "display": "standalone",
        "icons": [{"sizes": "192x192"}, {"sizes": "512x512"}]
    }"#;

    #[test]
    fn valid_manifest_passes() {
        let report = validate_manifest_str(VALID);
        assert!(report.passed(), "{:?}", report.problems);
    }

    #[test]
    fn missing_display_is_named() {
        let report = validate_manifest_str(
            r#"{"name": "a", "short_name": "a", "start_url": "/",
                "icons": [{"sizes": "192x192"}, {"sizes": "512x512"}]}"#,
        );
        assert!(!report.passed());
        assert_eq!(report.missing_fields(), ["display"]);
    }

    #[test]
    fn one_icon_is_not_enough() {
        let report = validate_manifest_str(
            r#"{"name": "a", "short_name": "a", "start_url": "/", "display": "standalone",
                "icons": [{"sizes": "192x192 512x512"}]}"#,
        );
        assert_eq!(report.problems, vec![ManifestProblem::TooFewIcons(1)]);
    }

    #[test]
    fn both_required_sizes_must_be_declared() {
        let report = validate_manifest_str(
            r#"{"name": "a", "short_name": "a", "start_url": "/", "display": "standalone",
                "icons": [{"sizes": "192x192"}, {"sizes": "256x256"}]}"#,
        );
        assert_eq!(report.problems, vec![ManifestProblem::MissingIconSizes(vec!["512x512"])]);
    }

    #[test]
    fn browser_display_mode_is_rejected() {
        let report = validate_manifest_str(&VALID.replace("standalone", "browser"));
        assert_eq!(
            report.problems,
            vec![ManifestProblem::InvalidDisplay(Some("browser".to_string()))]
        );
    }

    #[test]
    fn empty_start_url_fails() {
        let report = validate_manifest_str(&VALID.replace(r#""start_url": "/""#, r#""start_url": """#));
        assert_eq!(report.problems, vec![ManifestProblem::MissingStartUrl]);
    }

    #[test]
    fn invalid_json_is_a_failed_check() {
        let report = validate_manifest_str("{ not json");
        assert!(!report.passed());
        assert!(matches!(report.problems[0], ManifestProblem::Unreadable(_)));
    }

    #[test]
    fn install_only_worker_names_the_rest() {
        let report = check_worker_source("self.addEventListener('install', (event) => {});");
        assert!(!report.passed());
        assert_eq!(report.missing_events, vec!["activate", "fetch"]);
    }

    #[test]
    fn double_quoted_listeners_count() {
        let report = check_worker_source(
            r#"addEventListener("install", a); addEventListener("activate", b); addEventListener('fetch', c);"#,
        );
        assert!(report.passed());
    }

    #[test]
    fn https_is_informational() {
        assert!(validate_https());
    }
}
