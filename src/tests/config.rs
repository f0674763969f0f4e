use super::Config;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_missing_file_gives_defaults() {
    let config = Config::load_from(std::path::Path::new("no/such/markgraph.toml"));
    assert_eq!(config, Config::default());
    assert_eq!(config.wrap_width, 30);
    assert_eq!(config.renderer, "dot");
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "wrap_width = 12\nrenderer = \"neato\"").unwrap();

    let config = Config::load_from(file.path());
    assert_eq!(config.wrap_width, 12);
    assert_eq!(config.renderer, "neato");
    assert_eq!(config.output_dir, "");
    assert_eq!(config.rankdir, "TB");
}

#[test]
fn test_explicit_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_explicit(&dir.path().join("absent.toml"));
    assert_eq!(config, Config::default());
}

#[test]
fn test_explicit_file_is_loaded() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "rankdir = \"LR\"").unwrap();

    let config = Config::load_explicit(file.path());
    assert_eq!(config.rankdir, "LR");
    assert_eq!(config.wrap_width, 30);
}
