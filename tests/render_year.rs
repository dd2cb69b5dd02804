use std::path::Path;
use wallcal::{
    config::{Config, Margins, Theme},
    generate, Error,
};

fn reduced_config() -> Config {
    let mut config = Config::default();
    config.set_canvas(960, 540);
    config.set_margins(Margins {
        left: 12,
        right: 12,
        top: 50,
        bottom: 50,
    });
    config
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_default_themes_written() {
    let dir = tempfile::tempdir().unwrap();
    let report = generate(2026, &reduced_config(), dir.path()).unwrap();

    assert!(report.is_success());
    assert_eq!(report.written.len(), 3);
    assert_eq!(
        file_names(dir.path()),
        vec![
            "2026_calendar_gray.png",
            "2026_calendar_ivory.png",
            "2026_calendar_taupe.png",
        ]
    );

    for path in &report.written {
        assert_eq!(image::image_dimensions(path).unwrap(), (960, 540));
    }
}

#[test]
fn test_output_dir_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("a").join("b");

    let report = generate(2030, &reduced_config(), &out).unwrap();
    assert!(report.is_success());
    assert_eq!(file_names(&out).len(), 3);
}

#[test]
fn test_year_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = reduced_config();
    config.set_themes(vec![Theme::new("plain", [255, 255, 255])]);

    for year in [1899, 2101, 0, -5] {
        assert!(matches!(
            generate(year, &config, dir.path()),
            Err(Error::InvalidYear { .. })
        ));
    }
    assert!(file_names(dir.path()).is_empty());

    for year in [1900, 2100] {
        let report = generate(year, &config, dir.path()).unwrap();
        assert!(report.is_success(), "{year}");
    }
    assert_eq!(
        file_names(dir.path()),
        vec!["1900_calendar_plain.png", "2100_calendar_plain.png"]
    );
}

#[test]
fn test_lunar_and_parallel() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = reduced_config();
    config.set_lunar_enabled(true);
    config.set_parallel(true);

    let report = generate(2025, &config, dir.path()).unwrap();
    assert!(report.is_success());
    assert_eq!(file_names(dir.path()).len(), 3);
}

#[test]
fn test_jpeg_extension() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = reduced_config();
    config.set_extension("jpg".to_string());

    let paths = generate(2026, &config, dir.path())
        .unwrap()
        .into_result()
        .unwrap();
    assert!(paths.iter().all(|p| p.extension().unwrap() == "jpg"));
    assert_eq!(image::image_dimensions(&paths[0]).unwrap(), (960, 540));
}

#[test]
fn test_invalid_config_renders_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = reduced_config();
    config.set_themes(vec![]);

    assert!(matches!(
        generate(2026, &config, dir.path()),
        Err(Error::Config(_))
    ));
    assert!(file_names(dir.path()).is_empty());
}

#[test]
fn test_unwritable_output_reports_each_theme() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let report = generate(2026, &reduced_config(), &file.path().join("out")).unwrap();

    assert!(report.written.is_empty());
    let themes: Vec<&str> = report.failures.iter().map(|f| f.theme.as_str()).collect();
    assert_eq!(themes, vec!["gray", "ivory", "taupe"]);
}

#[test]
fn test_one_bad_theme_leaves_the_rest_written() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let mut config = reduced_config();
    config.set_themes(vec![
        Theme::new("ok", [255, 255, 255]),
        Theme::new("bad/x", [0, 0, 0]),
    ]);

    let report = generate(2026, &config, &out).unwrap();
    assert_eq!(report.written, vec![out.join("2026_calendar_ok.png")]);

    let failed: Vec<&str> = report.failures.iter().map(|f| f.theme.as_str()).collect();
    assert_eq!(failed, vec!["bad/x"]);
    assert!(matches!(report.failures[0].error, Error::Image { .. }));

    let image = image::open(&report.written[0]).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (960, 540));
    assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255]);
    assert_eq!(file_names(&out), vec!["2026_calendar_ok.png"]);
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wallcal.conf");

    let mut config = reduced_config();
    config.set_themes(vec![Theme::new("slate", [47, 79, 79])]);
    config.save(Some(path.clone())).unwrap();

    let loaded = Config::load(Some(path)).unwrap();
    let out = dir.path().join("out");
    let report = generate(2026, &loaded, &out).unwrap();
    assert_eq!(file_names(&out), vec!["2026_calendar_slate.png"]);
    assert!(report.is_success());
}
