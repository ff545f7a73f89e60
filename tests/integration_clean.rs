//! Integration tests for the sanitizer.
//!
//! These tests run whole directories through `clean_all_with` and check:
//! - One output per supported input, same name, same format
//! - EXIF is gone and pixels survive
//! - Unsupported and corrupt files are contained
//! - Re-running produces identical bytes

mod common;

use assert_fs::prelude::*;
use exif_cleaner::core::metadata::{ExifExtractor, KamadakExtractor};
use exif_cleaner::core::sanitizer::Sanitizer;
use exif_cleaner::core::sniff::{sniff, ImageKind};
use exif_cleaner::error::MetadataError;
use exif_cleaner::events::null_sender;
use image::{GenericImageView, ImageFormat};
use predicates::prelude::*;
use std::fs;

fn clean(input: &assert_fs::TempDir, output: &std::path::Path) -> String {
    let sanitizer = Sanitizer::new(input.path(), output).unwrap();
    let mut diagnostics = Vec::new();
    sanitizer
        .clean_all_with(&mut diagnostics, &null_sender())
        .unwrap();
    String::from_utf8(diagnostics).unwrap()
}

#[test]
fn cleans_every_supported_format() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();

    common::write(
        &input.path().join("camera.jpg"),
        &common::jpeg_with_make(&common::gradient(32, 16), "Canon"),
    );
    common::write(
        &input.path().join("logo.png"),
        &common::encode(&common::half_transparent(8, 8), ImageFormat::Png),
    );
    common::write(
        &input.path().join("board.gif"),
        &common::encode(&common::checkerboard(6), ImageFormat::Gif),
    );

    let diagnostics = clean(&input, output.path());

    assert!(diagnostics.is_empty());
    for (name, kind) in [
        ("camera.jpg", ImageKind::Jpeg),
        ("logo.png", ImageKind::Png),
        ("board.gif", ImageKind::Gif),
    ] {
        output.child(name).assert(predicate::path::is_file());
        let bytes = fs::read(output.path().join(name)).unwrap();
        assert_eq!(sniff(&bytes), Some(kind), "{} changed format", name);
    }
}

#[test]
fn jpeg_exif_is_removed_and_pixels_survive() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    let source = input.path().join("camera.jpg");
    let original = common::gradient(32, 16);
    common::write(&source, &common::jpeg_with_make(&original, "Canon"));

    assert!(KamadakExtractor.extract(&source).is_ok());

    clean(&input, output.path());

    let cleaned_path = output.path().join("camera.jpg");
    assert!(matches!(
        KamadakExtractor.extract(&cleaned_path),
        Err(MetadataError::NotFound { .. })
    ));

    let bytes = fs::read(&cleaned_path).unwrap();
    assert!(!bytes.windows(5).any(|w| w == b"Canon"));

    let before = image::load_from_memory(&fs::read(&source).unwrap()).unwrap();
    let after = image::load_from_memory(&bytes).unwrap();
    assert_eq!(after.dimensions(), (32, 16));
    assert!(common::max_channel_diff(&before, &after) <= 8);
}

#[test]
fn png_transparency_is_preserved() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    let original = common::half_transparent(8, 8);
    common::write(
        &input.path().join("logo.png"),
        &common::encode(&original, ImageFormat::Png),
    );

    clean(&input, output.path());

    let cleaned = image::open(output.path().join("logo.png")).unwrap();
    assert!(cleaned.color().has_alpha());
    assert_eq!(cleaned.get_pixel(0, 0).0[3], 0);
    assert_eq!(cleaned.to_rgba8(), original.to_rgba8());
}

#[test]
fn gif_pixels_survive() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    let original = common::checkerboard(6);
    common::write(
        &input.path().join("board.gif"),
        &common::encode(&original, ImageFormat::Gif),
    );

    clean(&input, output.path());

    let cleaned = image::open(output.path().join("board.gif")).unwrap();
    assert_eq!(cleaned.to_rgba8(), original.to_rgba8());
}

#[test]
fn unsupported_content_gets_one_diagnostic_and_no_output() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    let fake = input.child("fake.jpg");
    fake.write_str("this is not an image").unwrap();
    let webp = input.child("disguised.png");
    webp.write_binary(b"RIFF\x1a\x00\x00\x00WEBPVP8 ").unwrap();

    let diagnostics = clean(&input, output.path());

    let mut lines: Vec<_> = diagnostics.lines().collect();
    lines.sort();
    assert_eq!(
        lines,
        vec![
            format!("Unsupported file type: {}", webp.path().display()),
            format!("Unsupported file type: {}", fake.path().display()),
        ]
    );
    output.child("fake.jpg").assert(predicate::path::missing());
    output.child("disguised.png").assert(predicate::path::missing());
}

#[test]
fn corrupt_image_is_skipped_without_stopping_the_batch() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    input
        .child("broken.jpg")
        .write_binary(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x00, 0x01])
        .unwrap();
    common::write(
        &input.path().join("good.png"),
        &common::encode(&common::gradient(4, 4), ImageFormat::Png),
    );

    let diagnostics = clean(&input, output.path());

    assert!(diagnostics.is_empty());
    output.child("broken.jpg").assert(predicate::path::missing());
    output.child("good.png").assert(predicate::path::is_file());
}

#[test]
fn non_matching_names_are_ignored() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    let png = common::encode(&common::gradient(4, 4), ImageFormat::Png);
    common::write(&input.path().join("UPPER.PNG"), &png);
    common::write(&input.path().join("photo.webp"), &png);
    common::write(&input.path().join(".hidden.png"), &png);

    let diagnostics = clean(&input, output.path());

    assert!(diagnostics.is_empty());
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn second_run_is_bit_identical() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    common::write(
        &input.path().join("camera.jpg"),
        &common::jpeg_with_make(&common::gradient(16, 16), "Nikon Corp"),
    );
    common::write(
        &input.path().join("logo.png"),
        &common::encode(&common::half_transparent(8, 8), ImageFormat::Png),
    );
    common::write(
        &input.path().join("board.gif"),
        &common::encode(&common::checkerboard(4), ImageFormat::Gif),
    );

    clean(&input, output.path());
    let first: Vec<_> = ["camera.jpg", "logo.png", "board.gif"]
        .iter()
        .map(|n| fs::read(output.path().join(n)).unwrap())
        .collect();

    clean(&input, output.path());
    let second: Vec<_> = ["camera.jpg", "logo.png", "board.gif"]
        .iter()
        .map(|n| fs::read(output.path().join(n)).unwrap())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn empty_directory_produces_nothing() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();

    let diagnostics = clean(&input, output.path());

    assert!(diagnostics.is_empty());
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn nested_output_directory_is_created() {
    let input = assert_fs::TempDir::new().unwrap();
    let root = assert_fs::TempDir::new().unwrap();
    let output = root.path().join("deep").join("clean");

    common::write(
        &input.path().join("a.png"),
        &common::encode(&common::gradient(2, 2), ImageFormat::Png),
    );

    clean(&input, &output);

    root.child("deep/clean/a.png").assert(predicate::path::is_file());
}
