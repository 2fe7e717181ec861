use std::fs::{self, File};
use std::path::Path;
use std::process::Command;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::Parser;
use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;

use tools::commands::embed_profile;
use tools::commands::inspect_tiff::{command, Config, USAGE};

fn write_tiff(path: &Path) {
    let mut file = File::create(path).unwrap();
    let mut encoder = TiffEncoder::new(&mut file).unwrap();
    let mut image = encoder.new_image::<colortype::RGB8>(3, 2).unwrap();
    image.encoder().write_tag(Tag::Software, "tools test").unwrap();
    image.write_data(&[0u8; 3 * 2 * 3]).unwrap();
}

fn run(args: &[&str]) -> (u8, String) {
    let mut argv = vec!["inspect_tiff"];
    argv.extend_from_slice(args);
    let cfg = Config::try_parse_from(argv).unwrap();
    let mut out = Vec::new();
    let code = command(cfg, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn test_usage_without_files() {
    let (code, out) = run(&[]);
    assert_eq!(code, 1);
    assert_eq!(out, format!("{}\n", USAGE));

    let (code, _) = run(&["--summary"]);
    assert_eq!(code, 1);
}

#[test]
fn test_flag_position() {
    let cfg = Config::try_parse_from(["inspect_tiff", "a.tif", "--summary", "b.tif"]).unwrap();
    assert!(cfg.summary);
    assert_eq!(cfg.files.len(), 2);
    assert_eq!(cfg.files[0].to_str(), Some("a.tif"));
    assert_eq!(cfg.files[1].to_str(), Some("b.tif"));
}

#[test]
fn test_hyphenated_tokens_are_paths() {
    let (code, out) = run(&["-scan.tif"]);
    assert_eq!(code, 0);
    assert_eq!(out, "File not found: -scan.tif\n");

    let cfg = Config::try_parse_from(["inspect_tiff", "--", "--help", "-V", "--version", "-h"])
        .unwrap();
    assert!(!cfg.summary);
    let names: Vec<_> = cfg.files.iter().map(|p| p.to_str().unwrap()).collect();
    assert_eq!(names, ["--", "--help", "-V", "--version", "-h"]);
}

#[test]
fn test_repeated_summary_flag() {
    let cfg = Config::try_parse_from(["inspect_tiff", "--summary", "a.tif", "--summary"]).unwrap();
    assert!(cfg.summary);
    assert_eq!(cfg.files.len(), 1);
    assert_eq!(cfg.files[0].to_str(), Some("a.tif"));
}

#[test]
fn test_missing_file_text_mode() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.tif");
    let present = dir.path().join("here.tif");
    write_tiff(&present);

    let (code, out) = run(&[missing.to_str().unwrap(), present.to_str().unwrap()]);
    assert_eq!(code, 0);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], format!("File not found: {}", missing.display()));
    assert_eq!(lines[1], "=== here.tif ===");
    assert_eq!(lines[2], "size: (3, 2)");
    assert_eq!(lines[3], "mode: RGB");
    assert!(lines[4].starts_with("info: {'compression': "));
    assert!(lines.contains(&"305:Software -> tools test"));
}

#[test]
fn test_unreadable_file_text_mode() {
    let dir = tempfile::tempdir().unwrap();
    let notes = dir.path().join("notes.txt");
    fs::write(&notes, "not an image at all").unwrap();

    let (code, out) = run(&[notes.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(out.starts_with(&format!("Cannot open {}: ", notes.display())));
}

#[test]
fn test_summary_objects_per_file() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.tif");
    let second = dir.path().join("second.tif");
    write_tiff(&first);
    write_tiff(&second);

    let (code, out) = run(&["--summary", first.to_str().unwrap(), second.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(out.starts_with("{\n  \"file\": \"first.tif\",\n  \"size\": [\n    3,\n    2\n  ],"));
    let objects: Vec<serde_json::Value> = serde_json::Deserializer::from_str(&out)
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(objects.len(), 2);
    assert_eq!(objects[1]["file"], "second.tif");
    assert_eq!(objects[1]["mode"], "RGB");
    assert_eq!(objects[1]["tags"]["305:Software"], "tools test");
}

// summary mode does not guard missing files; the whole run stops
#[test]
fn test_missing_file_summary_mode_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.tif");
    let present = dir.path().join("here.tif");
    write_tiff(&present);

    let cfg = Config::try_parse_from([
        "inspect_tiff",
        "--summary",
        missing.to_str().unwrap(),
        present.to_str().unwrap(),
    ])
    .unwrap();
    let mut out = Vec::new();
    assert!(command(cfg, &mut out).is_err());
    assert!(out.is_empty());

    let output = Command::new(env!("CARGO_BIN_EXE_inspect_tiff"))
        .arg("--summary")
        .arg(&missing)
        .arg(&present)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_inspect_binary_exit_codes() {
    let output = Command::new(env!("CARGO_BIN_EXE_inspect_tiff"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), USAGE);

    let output = Command::new(env!("CARGO_BIN_EXE_inspect_tiff"))
        .arg("does-not-exist.tif")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "File not found: does-not-exist.tif"
    );

    let output = Command::new(env!("CARGO_BIN_EXE_inspect_tiff"))
        .arg("--help")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "File not found: --help"
    );
}

#[test]
fn test_embed_profile_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let profile: Vec<u8> = (0..2000u32).map(|i| (i * 7 % 256) as u8).collect();
    fs::write(dir.path().join("CoatedFOGRA39.icc"), &profile).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_embed_profile"))
        .current_dir(dir.path())
        .status()
        .unwrap();
    assert!(status.success());

    let script = fs::read_to_string(dir.path().join("coated_fogra39_profile.js")).unwrap();
    let lines: Vec<&str> = script.lines().collect();
    assert_eq!(lines[0], "window.COATED_FOGRA39_BASE64 = \"\" +");
    assert_eq!(*lines.last().unwrap(), "  \"\";");
    let chunks: Vec<&str> = lines[1..lines.len() - 1]
        .iter()
        .map(|l| l.trim().trim_end_matches(" +").trim_matches('"'))
        .collect();
    assert!(chunks.iter().all(|c| c.len() <= 120));
    assert_eq!(STANDARD.decode(chunks.concat()).unwrap(), profile);
}

#[test]
fn test_embed_profile_ignores_arguments() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("CoatedFOGRA39.icc"), b"abc").unwrap();
    fs::write(dir.path().join("p.icc"), b"xyz").unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_embed_profile"))
        .current_dir(dir.path())
        .args(["--input", "p.icc", "--output", "out.js"])
        .status()
        .unwrap();
    assert!(status.success());
    assert!(!dir.path().join("out.js").exists());
    assert_eq!(
        fs::read_to_string(dir.path().join("coated_fogra39_profile.js")).unwrap(),
        "window.COATED_FOGRA39_BASE64 = \"\" +\n  \"YWJj\" +\n  \"\";\n"
    );
}

#[test]
fn test_embed_profile_overwrites_and_fails_on_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.js");
    fs::write(&output, "stale content that is longer than the new script").unwrap();
    fs::write(dir.path().join("p.icc"), b"abc").unwrap();

    let cfg = embed_profile::Config {
        input: dir.path().join("p.icc"),
        output: output.clone(),
        name: "P".to_string(),
    };
    embed_profile::command(cfg).unwrap();
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "window.P = \"\" +\n  \"YWJj\" +\n  \"\";\n"
    );

    let cfg = embed_profile::Config {
        input: dir.path().join("absent.icc"),
        output: dir.path().join("other.js"),
        ..Default::default()
    };
    assert!(embed_profile::command(cfg).is_err());
    assert!(!dir.path().join("other.js").exists());

    let status = Command::new(env!("CARGO_BIN_EXE_embed_profile"))
        .current_dir(dir.path())
        .status()
        .unwrap();
    assert!(!status.success());
    assert!(!dir.path().join("coated_fogra39_profile.js").exists());
}
