//! vlist entrypoint: browse a newline-separated file through a windowed list.
use anyhow::Result;
use clap::Parser;
use core_config::{HeightMode, ItemHeight, ListConfig, load_from};
use core_events::{EVENT_CHANNEL_CAP, Event, InputEvent};
use core_render::Writer;
use core_terminal::{CrosstermBackend, SizeSource, TerminalBackend};
use std::fmt;
use std::io::{Stdout, stdout};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, trace, warn};
use tracing_appender::non_blocking::WorkerGuard;

mod nav;
mod scroll_bar;
mod session;

use nav::command_for_key;
use session::{GENERATED_ITEM_COUNT, ListSession, Step, generated_items, load_items};

const STATUS_ROWS: u16 = 1;
const SCROLL_BAR_ROWS: u16 = 1;
const SCROLL_BAR_WIDTH: usize = 20;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "vlist", version, about = "Windowed list browser")]
struct Args {
    /// Newline-separated items. If omitted, 1000 numbered items are generated.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `vlist.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Rows for the list (indicators included), or `fill`.
    #[arg(long)]
    pub height: Option<HeightMode>,
    /// Rows kept free when the height is `fill`.
    #[arg(long = "reserved")]
    pub reserved: Option<u16>,
    #[arg(long = "item-height")]
    pub item_height: Option<ItemHeight>,
    #[arg(long = "no-indicators")]
    pub no_indicators: bool,
    /// Append a position bar below the list.
    #[arg(long)]
    pub scrollbar: bool,
}

impl Args {
    /// Command line values win over the file.
    fn apply_overrides(&self, mut list: ListConfig) -> ListConfig {
        if let Some(height) = self.height {
            list = list.with_height(height);
        }
        if let Some(reserved) = self.reserved {
            list = list.with_reserved_lines(reserved);
        }
        if let Some(item_height) = self.item_height {
            list = list.with_item_height(item_height);
        }
        if self.no_indicators {
            list = list.with_overflow_indicators(false);
        }
        list
    }
}

/// A filling list leaves room for the status line and, with `--scrollbar`,
/// for the position bar painted under the list.
fn reserve_rows(list: ListConfig, scroll_bar: bool) -> ListConfig {
    let needed = STATUS_ROWS + if scroll_bar { SCROLL_BAR_ROWS } else { 0 };
    if list.height == HeightMode::Fill && list.reserved_lines < needed {
        return list.with_reserved_lines(needed);
    }
    list
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

struct RuntimeContext<'a> {
    items: Vec<String>,
    list: ListConfig,
    scroll_bar: bool,
    terminal_guard: core_terminal::TerminalGuard<'a>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            log_guard: None,
        }
    }

    fn run<'a>(&'a mut self) -> Result<RuntimeContext<'a>> {
        self.configure_logging()?;
        Self::install_panic_hook();

        info!(target: "runtime", "startup");
        let args = Args::parse();
        let config = load_from(args.config.clone())?;
        let list = reserve_rows(args.apply_overrides(config.list), args.scrollbar);
        let items = match args.path.as_deref() {
            Some(path) => load_items(path)?,
            None => generated_items(GENERATED_ITEM_COUNT),
        };

        self.backend.set_title("vlist")?;
        let guard = self.backend.enter_guard()?;

        let path_str = args.path.as_ref().map(|p| p.to_string_lossy().to_string());
        info!(
            target: "runtime.startup",
            path = path_str.as_deref(),
            items = items.len(),
            config_override = args.config.is_some(),
            height = ?list.height,
            item_height = list.item_height.get(),
            indicators = list.show_overflow_indicators,
            "bootstrap_complete"
        );

        Ok(RuntimeContext {
            items,
            list,
            scroll_bar: args.scrollbar,
            terminal_guard: guard,
        })
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join("vlist.log");
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, "vlist.log");
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global subscriber already installed; dropping the guard stops the writer.
            }
        }

        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

enum LoopControl {
    Continue { repaint: bool },
    Break { reason: ShutdownReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownReason {
    CtrlC,
    KeyQuit,
    ChannelClosed,
}

impl ShutdownReason {
    fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::CtrlC => "ctrl_c",
            ShutdownReason::KeyQuit => "key_quit",
            ShutdownReason::ChannelClosed => "channel_closed",
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn log_shutdown_stage(reason: ShutdownReason, stage: &'static str) {
    info!(
        target: "runtime.shutdown",
        reason = reason.as_str(),
        stage = stage,
        "shutdown_stage"
    );
}

struct ListRuntime<'a> {
    session: ListSession,
    size: SizeSource,
    out: Stdout,
    rx: mpsc::Receiver<Event>,
    tx: Option<mpsc::Sender<Event>>,
    input_task: Option<tokio::task::JoinHandle<()>>,
    input_shutdown: Option<core_input::AsyncInputShutdown>,
    _terminal_guard: core_terminal::TerminalGuard<'a>,
}

impl<'a> ListRuntime<'a> {
    fn new(
        context: RuntimeContext<'a>,
        size: SizeSource,
        tx: mpsc::Sender<Event>,
        rx: mpsc::Receiver<Event>,
        input_task: tokio::task::JoinHandle<()>,
        input_shutdown: core_input::AsyncInputShutdown,
    ) -> Self {
        let RuntimeContext {
            items,
            list,
            scroll_bar,
            terminal_guard,
        } = context;
        let scroll_bar_width = scroll_bar.then_some(SCROLL_BAR_WIDTH);
        let session = ListSession::new(items, list, scroll_bar_width, size.subscribe());
        Self {
            session,
            size,
            out: stdout(),
            rx,
            tx: Some(tx),
            input_task: Some(input_task),
            input_shutdown: Some(input_shutdown),
            _terminal_guard: terminal_guard,
        }
    }

    async fn run(&mut self) -> Result<()> {
        self.paint();
        let loop_span = tracing::debug_span!(target: "runtime", "event_loop");
        let _enter_loop = loop_span.enter();
        let mut shutdown_reason = ShutdownReason::ChannelClosed;
        while let Some(event) = self.rx.recv().await {
            let control = match &event {
                Event::Input(input) => self.handle_input_event(input),
            };
            match control {
                LoopControl::Break { reason } => {
                    shutdown_reason = reason;
                    break;
                }
                LoopControl::Continue { repaint } => {
                    if repaint {
                        self.paint();
                    }
                }
            }
        }
        self.rx.close();
        self.finalize_shutdown(shutdown_reason).await;
        Ok(())
    }

    fn handle_input_event(&mut self, input: &InputEvent) -> LoopControl {
        match input {
            InputEvent::CtrlC => {
                info!(target: "runtime", "shutdown");
                LoopControl::Break {
                    reason: ShutdownReason::CtrlC,
                }
            }
            InputEvent::Key(key) => match command_for_key(key) {
                Some(cmd) => match self.session.apply(cmd) {
                    Step::Quit => LoopControl::Break {
                        reason: ShutdownReason::KeyQuit,
                    },
                    Step::Continue => LoopControl::Continue { repaint: true },
                },
                None => LoopControl::Continue { repaint: false },
            },
            InputEvent::Resize(columns, rows) => {
                if self.size.apply_resize(*columns, *rows) {
                    self.session.on_resize();
                }
                LoopControl::Continue { repaint: true }
            }
        }
    }

    fn paint(&mut self) {
        let rows = self.size.current().rows;
        let list_rows = rows.saturating_sub(STATUS_ROWS);
        let frame = self.session.frame();
        let mut writer = Writer::new();
        writer.paint_frame(&frame, 0, list_rows);
        if rows > 0 {
            writer.move_to(0, list_rows);
            writer.clear_line(list_rows);
            writer.dim(true);
            writer.print(self.session.status_line());
            writer.dim(false);
        }
        if let Err(e) = writer.flush_to(&mut self.out) {
            error!(target: "render.list", ?e, "paint_error");
        }
    }

    async fn finalize_shutdown(&mut self, reason: ShutdownReason) {
        log_shutdown_stage(reason, "begin");
        if let Some(tx) = self.tx.take() {
            trace!(
                target: "runtime.shutdown",
                reason = reason.as_str(),
                "dropping_runtime_sender"
            );
            drop(tx);
        }
        if let Some(shutdown) = self.input_shutdown.take() {
            trace!(
                target: "runtime.shutdown",
                reason = reason.as_str(),
                "input_task_shutdown_signal"
            );
            shutdown.signal();
        }
        if let Some(handle) = self.input_task.take() {
            match tokio::time::timeout(Duration::from_millis(200), handle).await {
                Ok(Ok(_)) => trace!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "input_task_joined"
                ),
                Ok(Err(err)) if err.is_cancelled() => trace!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "input_task_cancelled"
                ),
                Ok(Err(err)) => error!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    ?err,
                    "input_task_join_failed"
                ),
                Err(_) => warn!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "input_task_timeout"
                ),
            }
        }
        info!(
            target: "runtime.shutdown",
            keypresses = core_events::KEYPRESS_TOTAL.load(Ordering::Relaxed),
            resizes = core_events::RESIZE_TOTAL.load(Ordering::Relaxed),
            sends = core_events::CHANNEL_SENDS.load(Ordering::Relaxed),
            send_failures = core_events::CHANNEL_SEND_FAILURES.load(Ordering::Relaxed),
            "event_totals"
        );
        log_shutdown_stage(reason, "complete");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut startup = AppStartup::new();
    let context = startup.run()?;
    let size = SizeSource::detect();
    let (tx, rx) = mpsc::channel::<Event>(EVENT_CHANNEL_CAP);
    let (input_task, input_shutdown) = core_input::spawn_async_input(tx.clone());

    let mut runtime = ListRuntime::new(context, size, tx, rx, input_task, input_shutdown);
    runtime.run().await
}
