use std::sync::Arc;
use std::time::Duration;

use pistonite_ga as ga;

use ga::{AnsiTerminal, GlyphSupport, Manager, StreamManager};

fn stream_manager() -> Arc<StreamManager<Vec<u8>>> {
    let term = AnsiTerminal::new(false, GlyphSupport::Full);
    let manager = StreamManager::new(term, vec![])
        .with_width(20)
        .with_min_delta(Duration::ZERO);
    Arc::new(manager)
}

fn take_output(manager: Arc<StreamManager<Vec<u8>>>) -> String {
    let bytes = Arc::try_unwrap(manager).unwrap().into_inner();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn test_stream_output() {
    let manager = stream_manager();
    assert_eq!(manager.width(), 20);
    assert_eq!(manager.min_delta(), Duration::ZERO);

    let mut counter = ga::counter("Test")
        .total(2)
        .bar_format("{desc} {count}/{total}")
        .spawn(manager.clone())
        .unwrap();
    counter.update(1).unwrap();
    counter.update(1).unwrap();
    counter.close(false).unwrap();

    assert_eq!(take_output(manager), "\rTest 1/2\rTest 2/2\rTest 2/2\n");
}

#[test]
fn test_stream_clear() {
    let manager = stream_manager();
    let mut counter = ga::counter("Test")
        .total(2)
        .bar_format("{desc} {count}/{total}")
        .leave(false)
        .spawn(manager.clone())
        .unwrap();
    counter.update(1).unwrap();
    counter.close(false).unwrap();

    assert_eq!(take_output(manager), "\rTest 1/2\r\x1b[2K");
}

#[test]
fn test_stream_bar_width() {
    let manager = stream_manager();
    let mut counter = ga::counter("")
        .total(4)
        .bar_format("|{bar}|")
        .spawn(manager.clone())
        .unwrap();
    counter.update(4).unwrap();
    drop(counter);

    assert_eq!(take_output(manager), "\r|██████████████████|");
}
