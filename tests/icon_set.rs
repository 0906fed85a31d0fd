use aeye_icons::checklist::validate_icons;
use aeye_icons::icon_gen::{generate_icons, FaviconOutcome, GenerateOptions, ICON_TABLE};
use aeye_icons::style::LogoStyle;
use tempfile::TempDir;

fn options(root: &TempDir, style: LogoStyle) -> GenerateOptions {
    GenerateOptions {
        style,
        out_dir: root.path().join("public").join("icons"),
        favicon: root.path().join("public").join("favicon.ico"),
    }
}

#[test]
fn writes_sixteen_icons_and_a_favicon() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let options = options(&temp_dir, LogoStyle::classic());

    let report = generate_icons(&options).expect("icon generation failed");
    assert_eq!(report.written.len(), 16);
    assert!(report.failed.is_empty(), "{:?}", report.failed);
    assert_eq!(report.favicon, FaviconOutcome::MultiResolution);

    let files: Vec<_> = std::fs::read_dir(&options.out_dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(files.len(), 16);
    assert!(options.favicon.is_file());

    for entry in ICON_TABLE {
        let img = image::open(options.out_dir.join(entry.filename))
            .unwrap_or_else(|e| panic!("{} unreadable: {e}", entry.filename));
        assert_eq!(img.width(), entry.size, "{}", entry.filename);
        assert_eq!(img.height(), entry.size, "{}", entry.filename);
    }

    // The ICO decoder hands back the largest frame.
    let favicon = image::open(&options.favicon).expect("favicon should be a valid ICO");
    assert_eq!(favicon.width(), 32);

    assert!(validate_icons(&options.out_dir, &options.favicon).passed());
}

#[test]
fn one_unwritable_entry_does_not_stop_the_rest() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let options = options(&temp_dir, LogoStyle::professional());

    // A directory squatting on the file name makes that single write fail.
    std::fs::create_dir_all(options.out_dir.join("icon-48x48.png")).unwrap();

    let report = generate_icons(&options).expect("icon generation failed");
    assert_eq!(report.written.len(), 15);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "icon-48x48.png");
    assert!(options.out_dir.join("icon-1024x1024.png").is_file());
    assert_eq!(report.favicon, FaviconOutcome::MultiResolution);
}
