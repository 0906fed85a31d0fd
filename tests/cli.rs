use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const MANIFEST: &str = r#"{
  "name": "AEYE Summarizer",
  "short_name": "AEYE",
  "start_url": "/",
  "display": "standalone",
  "icons": [
    {"src": "/icons/icon-192x192.png", "sizes": "192x192", "type": "image/png"},
    {"src": "/icons/icon-512x512.png", "sizes": "512x512", "type": "image/png"}
  ]
}"#;

const WORKER: &str = r#"
self.addEventListener('install', (event) => self.skipWaiting());
self.addEventListener('activate', (event) => self.clients.claim());
self.addEventListener('fetch', (event) => {});
"#;

const LAYOUT: &str = r#"
export const metadata = {
  title: 'AEYE',
  manifest: '/manifest.json',
}
"#;

fn write(root: &Path, relative: &str, contents: &[u8]) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

/// A project that satisfies every check.
fn installable_project() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let root = temp_dir.path();
    write(root, "public/manifest.json", MANIFEST.as_bytes());
    write(root, "public/sw.js", WORKER.as_bytes());
    for name in [
        "icon-192x192.png",
        "icon-512x512.png",
        "favicon-16x16.png",
        "favicon-32x32.png",
    ] {
        write(root, &format!("public/icons/{name}"), b"\x89PNG");
    }
    write(root, "public/favicon.ico", b"\0\0\x01\0");
    write(root, "src/app/layout.tsx", LAYOUT.as_bytes());
    temp_dir
}

fn validate(root: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_validate-pwa"))
        .arg("--root")
        .arg(root)
        .output()
        .expect("Failed to run validate-pwa")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn complete_project_passes() {
    let project = installable_project();
    let output = validate(project.path());
    assert!(output.status.success(), "{}", stdout(&output));
    assert!(stdout(&output).contains("All installability requirements met"));
}

#[test]
fn worker_without_fetch_and_activate_fails() {
    let project = installable_project();
    write(
        project.path(),
        "public/sw.js",
        b"self.addEventListener('install', (event) => {});",
    );

    let output = validate(project.path());
    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("Missing event listeners: activate, fetch"), "{text}");
    assert!(text.contains("4/5 checks passed"), "{text}");
}

#[test]
fn every_check_runs_even_when_all_fail() {
    let temp_dir = TempDir::new().unwrap();
    let output = validate(temp_dir.path());
    assert_eq!(output.status.code(), Some(1));

    let text = stdout(&output);
    assert!(text.contains("manifest could not be read"), "{text}");
    assert!(text.contains("Service worker not found"), "{text}");
    assert!(text.contains("Icons directory not found"), "{text}");
    assert!(text.contains("HTTPS"), "{text}");
    assert!(text.contains("does not contain manifest: '/manifest.json'"), "{text}");
    assert!(text.contains("1/5 checks passed"), "{text}");
}

#[test]
fn empty_icon_file_fails_the_inventory() {
    let project = installable_project();
    write(project.path(), "public/icons/icon-512x512.png", b"");

    let output = validate(project.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("icon-512x512.png is empty (0 bytes)"));
}

#[test]
fn create_logo_populates_a_fresh_project() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("public/icons");
    let favicon = temp_dir.path().join("public/favicon.ico");

    let output = Command::new(env!("CARGO_BIN_EXE_create-logo"))
        .arg("--out-dir")
        .arg(&out_dir)
        .arg("--favicon")
        .arg(&favicon)
        .arg("--accent")
        .arg("#ffd700")
        .output()
        .expect("Failed to run create-logo");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(std::fs::read_dir(&out_dir).unwrap().count(), 16);
    assert!(favicon.is_file());
    assert!(stdout(&output).contains("icon-512x512-maskable.png"));
}
