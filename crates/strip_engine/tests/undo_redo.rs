use strip_engine::{
    editor::{EditState, UndoState},
    Color, EngineError, Palette, PixelBuffer, Size, StripDocument,
};

fn test_state(width: i32, height: i32) -> EditState {
    let palette = Palette::from_slice(&[
        Color::new(0, 0, 0),
        Color::new(255, 0, 0),
        Color::new(0, 255, 0),
        Color::new(0, 0, 255),
    ])
    .unwrap();
    EditState::from_document(StripDocument::new(PixelBuffer::new((width, height)), palette))
}

#[test]
fn test_undo_restores_previous_buffer() {
    let mut state = test_state(4, 4);
    state.save_state("Draw");
    state.set_pixel(1, 2, 3).unwrap();
    assert_eq!(3, state.get_pixel(1, 2).unwrap());

    assert!(state.undo().unwrap());
    assert_eq!(0, state.get_pixel(1, 2).unwrap());

    assert!(state.redo().unwrap());
    assert_eq!(3, state.get_pixel(1, 2).unwrap());
}

#[test]
fn test_undo_redo_are_inverse() {
    let mut state = test_state(4, 4);
    for i in 0..3 {
        state.save_state("Draw");
        state.set_pixel(i, 0, 1).unwrap();
    }
    let edited = state.get_buffer().clone();

    assert!(state.undo().unwrap());
    assert!(state.undo().unwrap());
    assert!(state.redo().unwrap());
    assert!(state.redo().unwrap());
    assert_eq!(edited, *state.get_buffer());
}

#[test]
fn test_empty_stacks_are_a_noop() {
    let mut state = test_state(4, 4);
    assert!(!state.can_undo());
    assert!(!state.can_redo());
    assert!(!state.undo().unwrap());
    assert!(!state.redo().unwrap());
}

#[test]
fn test_descriptions_carry_snapshot_labels() {
    let mut state = test_state(4, 4);
    assert_eq!(None, state.undo_description());

    state.save_state("Draw");
    assert_eq!(Some("Draw".to_string()), state.undo_description());

    state.undo().unwrap();
    assert_eq!(Some("Current".to_string()), state.redo_description());
}

#[test]
fn test_history_bound_evicts_oldest() {
    let mut state = test_state(2, 2).with_max_history(2);
    state.set_pixel(0, 0, 1).unwrap();
    state.save_state("Draw");
    state.set_pixel(0, 0, 2).unwrap();
    state.save_state("Draw");
    state.set_pixel(0, 0, 3).unwrap();
    state.save_state("Draw");
    assert_eq!(2, state.undo_stack_len());

    assert!(state.undo().unwrap());
    assert!(state.undo().unwrap());
    // The first snapshot (index 1) was evicted; the trail ends here.
    assert!(!state.undo().unwrap());
    assert_eq!(2, state.get_pixel(0, 0).unwrap());
}

#[test]
fn test_save_state_clears_redo() {
    let mut state = test_state(4, 4);
    state.save_state("Draw");
    state.set_pixel(0, 0, 1).unwrap();
    state.undo().unwrap();
    assert!(state.can_redo());

    state.save_state("Draw");
    assert!(!state.can_redo());
    assert!(!state.redo().unwrap());
}

#[test]
fn test_dimension_mismatch_consumes_the_entry() {
    let mut state = test_state(4, 4);
    state.save_state("Draw");
    state.set_pixel(0, 0, 1).unwrap();

    state.replace_buffer(PixelBuffer::new((8, 8)));
    let result = state.undo();
    assert!(matches!(
        result,
        Err(EngineError::SnapshotSizeMismatch {
            snapshot: Size { width: 4, height: 4 },
            buffer: Size { width: 8, height: 8 },
        })
    ));

    // The mismatching entry is gone, the buffer untouched, and the
    // pre-undo state still landed on the redo stack.
    assert!(!state.can_undo());
    assert_eq!(Size::new(8, 8), state.get_buffer().get_size());
    assert_eq!(1, state.redo_stack_len());
}

#[test]
fn test_redo_dimension_mismatch_consumes_the_entry() {
    let mut state = test_state(4, 4);
    state.save_state("Draw");
    state.set_pixel(0, 0, 1).unwrap();
    state.undo().unwrap();

    state.replace_buffer(PixelBuffer::new((8, 8)));
    let result = state.redo();
    assert!(matches!(
        result,
        Err(EngineError::SnapshotSizeMismatch {
            snapshot: Size { width: 4, height: 4 },
            buffer: Size { width: 8, height: 8 },
        })
    ));

    // Symmetric to the undo side: the redo entry is consumed, the buffer
    // untouched, and the pre-redo state stays on the undo stack.
    assert!(!state.can_redo());
    assert_eq!(Size::new(8, 8), state.get_buffer().get_size());
    assert_eq!(1, state.undo_stack_len());
}
