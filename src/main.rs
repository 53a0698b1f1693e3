use std::sync::Arc;
use std::time::Instant;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use crossterm::event::EventStream;
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::Terminal;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use twig::app::{App, Flow};
use twig::cli::{parse_args, run_cli_command};
use twig::config::AppConfig;
use twig::input::{from_crossterm, HostEvent};
use twig::logging::init_logging;
use twig::services::{FileSettings, MemorySource, Services, SystemNotifier};
use twig::terminal::{setup_panic_hook, TerminalManager};

fn main() -> Result<()> {
    // CLI commands run before the terminal is touched
    let options = match run_cli_command(parse_args(std::env::args())) {
        Ok(options) => options,
        Err(code) => std::process::exit(code),
    };

    color_eyre::install()?;

    let config = AppConfig::from_env().with_options(&options);
    if let Err(e) = init_logging(&config.log_config()) {
        eprintln!("warning: logging disabled: {}", e);
    }
    info!("twig starting, data dir {}", config.data_dir.display());

    let settings = FileSettings::open(config.settings_path())
        .wrap_err("failed to load settings")?;
    let source = MemorySource::open(config.messages_path())
        .wrap_err("failed to load messages")?;
    let services = Services::new(
        Arc::new(settings),
        Arc::new(SystemNotifier),
        Arc::new(source),
    );

    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let mut app = App::new(services, config.ui, Instant::now())?;

    setup_panic_hook();
    let mut term = TerminalManager::new()?;
    let result = runtime.block_on(run_app(term.terminal(), &mut app, config.invalidate));
    term.restore()?;

    info!("twig exiting");
    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    invalidate: bool,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();
    let mut ticker = tokio::time::interval(app.ui_config().frame_tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let now = Instant::now();
        if invalidate || app.needs_frame(now) {
            terminal.draw(|frame| app.draw(frame, now))?;
        }

        let event = tokio::select! {
            _ = ticker.tick() => HostEvent::Frame,

            event_result = event_stream.next() => match event_result {
                Some(Ok(event)) => match from_crossterm(event) {
                    Some(event) => event,
                    None => continue,
                },
                Some(Err(e)) => {
                    warn!("Terminal event error: {}", e);
                    continue;
                }
                None => HostEvent::Shutdown,
            },

            _ = tokio::signal::ctrl_c() => HostEvent::Shutdown,
        };

        match app.step(event, Instant::now()) {
            Flow::Continue => {}
            Flow::BackExhausted | Flow::Exit => return Ok(()),
        }
    }
}
