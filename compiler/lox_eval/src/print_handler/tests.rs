use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_buffer_collects_lines() {
    let handler = buffer_handler();
    handler.println("1");
    handler.println("two");
    assert_eq!(handler.output(), "1\ntwo\n");
}

#[test]
fn test_take_output_clears_buffer() {
    let handler = buffer_handler();
    handler.println("first");
    assert_eq!(handler.take_output(), "first\n");
    handler.println("second");
    assert_eq!(handler.output(), "second\n");
}

#[test]
fn test_silent_and_stdout_capture_nothing() {
    let silent = silent_handler();
    silent.println("dropped");
    assert_eq!(silent.output(), "");
    assert_eq!(stdout_handler().take_output(), "");
}

#[test]
fn test_buffer_is_shared_across_threads() {
    let handler = buffer_handler();
    let writer = Arc::clone(&handler);
    let thread = std::thread::spawn(move || {
        for _ in 0..50 {
            writer.println("a");
        }
    });
    for _ in 0..50 {
        handler.println("b");
    }
    assert!(thread.join().is_ok());
    assert_eq!(handler.output().lines().count(), 100);
}
