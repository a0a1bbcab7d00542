use std::path::Path;

use pretty_assertions::assert_eq;
use strip_engine::{
    editor::{EditState, UndoState},
    load_strip_file, save_strip_file, EngineError, Palette, PixelBuffer, StripDocument,
};

fn sample_document() -> StripDocument {
    // 5 wide on purpose: BMP rows need padding to a 4-byte stride.
    let palette = Palette::from_rgb_bytes(&[
        0, 0, 0, //
        255, 0, 255, //
        10, 20, 30, //
        200, 100, 50, //
    ])
    .unwrap();
    let data: Vec<u8> = (0..5 * 6).map(|i| (i % 4) as u8).collect();
    let buffer = PixelBuffer::from_data((5, 6), data).unwrap();
    StripDocument::new(buffer, palette)
}

fn assert_file_round_trip(path: &Path) {
    let document = sample_document();
    save_strip_file(path, &document.buffer, &document.palette).unwrap();

    let loaded = load_strip_file(path).unwrap();
    assert_eq!(document.buffer, loaded.buffer);
    assert_eq!(document.palette.to_rgb_bytes(), loaded.palette.to_rgb_bytes());
}

#[test]
fn test_bmp_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    assert_file_round_trip(&dir.path().join("strip.bmp"));
}

#[test]
fn test_png_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    assert_file_round_trip(&dir.path().join("strip.png"));
}

#[test]
fn test_extension_detection_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    assert_file_round_trip(&dir.path().join("STRIP.BMP"));
}

#[test]
fn test_unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strip.gif");
    let document = sample_document();

    let result = save_strip_file(&path, &document.buffer, &document.palette);
    assert!(matches!(result, Err(EngineError::UnsupportedFormat { .. })));
    assert!(matches!(load_strip_file(&path), Err(EngineError::UnsupportedFormat { .. })));
}

#[test]
fn test_missing_file_reports_the_path() {
    let result = load_strip_file(Path::new("/nonexistent/strip.bmp"));
    assert!(matches!(result, Err(EngineError::OpenFile { .. })));
}

#[test]
fn test_load_file_resets_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strip.png");
    let document = sample_document();
    save_strip_file(&path, &document.buffer, &document.palette).unwrap();

    let mut state = EditState::from_document(sample_document());
    state.save_state("Draw");
    state.set_pixel(0, 0, 3).unwrap();
    state.undo().unwrap();
    state.begin_selection(0, 0).unwrap();
    assert!(state.can_redo());

    state.load_file(&path).unwrap();
    assert!(!state.can_undo());
    assert!(!state.can_redo());
    assert!(!state.is_something_selected());
    assert_eq!(Some(path.as_path()), state.file_name());
}

#[test]
fn test_save_without_a_file_name_fails() {
    let state = EditState::from_document(sample_document());
    assert!(matches!(state.save(), Err(EngineError::NoFileName)));
}

#[test]
fn test_edit_save_reload_preserves_the_palette() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strip.bmp");
    let document = sample_document();
    let palette_bytes = document.palette.to_rgb_bytes();
    save_strip_file(&path, &document.buffer, &document.palette).unwrap();

    let mut state = EditState::default();
    state.load_file(&path).unwrap();
    state.save_state("Draw");
    state.set_pixel(2, 2, 1).unwrap();
    state.save().unwrap();

    let reloaded = load_strip_file(&path).unwrap();
    assert_eq!(palette_bytes, reloaded.palette.to_rgb_bytes());
    assert_eq!(1, reloaded.buffer.get(2, 2).unwrap());
}
