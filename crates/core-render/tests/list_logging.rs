use core_config::{HeightMode, ListConfig};
use core_render::{RenderItemProps, VirtualList};
use core_terminal::{SizeSource, TerminalSize};
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::Level;
use tracing::subscriber::with_default;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone)]
struct BufferWriter {
    inner: Arc<Mutex<Vec<u8>>>,
}

struct LockedWriter<'a> {
    guard: MutexGuard<'a, Vec<u8>>,
}

impl<'a> Write for LockedWriter<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = LockedWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LockedWriter {
            guard: self.inner.lock().expect("log buffer poisoned"),
        }
    }
}

#[test]
fn resize_logs_capacity_change() {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_ansi(false)
        .without_time()
        .with_writer(BufferWriter {
            inner: buffer.clone(),
        })
        .finish();

    with_default(subscriber, || {
        let source = SizeSource::interactive(TerminalSize::new(30, 80));
        let config = ListConfig::default().with_height(HeightMode::Fill);
        let mut list = VirtualList::builder(|p: RenderItemProps<'_, usize>| p.index.to_string())
            .config(config)
            .mount(source.subscribe(), 200, 150);
        source.apply_resize(80, 12);
        list.remeasure();
    });

    let log = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
    assert!(log.contains("DEBUG render.list:"), "log was: {log}");
    assert!(log.contains("list_mounted"));
    assert!(log.contains("capacity_changed"));
    assert!(log.contains("from=28"));
    assert!(log.contains("to=10"));
}
