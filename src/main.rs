use anyhow::Result;
use clap::Parser;
use crossterm::event::Event;
use overlay_tui::action::Action;
use overlay_tui::app::App;
use overlay_tui::cli::Cli;
use overlay_tui::config::Config;
use overlay_tui::logging;
use overlay_tui::services::TransferRequest;
use overlay_tui::tui::Tui;
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging is optional; the UI still works without a writable home
    if let Err(e) = logging::init() {
        eprintln!("Logging disabled: {:#}", e);
    }
    let config = Config::load().unwrap_or_default();

    if cli.save_config {
        config.save()?;
        if let Some(dir) = Config::config_dir() {
            println!("Config written to {}", dir.join("config.json").display());
        }
        return Ok(());
    }

    tracing::info!(?config, "starting overlay-tui");

    let request = TransferRequest {
        title: "Downloading".to_string(),
        url: cli.url,
        destination: cli.output,
    };
    let mut app = App::new(config, request);

    let mut tui = Tui::new()?;
    tui.enter()?;
    let result = run_app(&mut tui, &mut app);
    tui.exit()?;

    if let Err(err) = &result {
        tracing::error!(error = ?err, "application error");
    }
    result
}

fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    let tick_rate = app.config.tick_rate();
    let mut last_tick = Instant::now();

    while !app.should_quit {
        tui.draw(|frame| app.draw(frame, frame.area()))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if let Some(event) = tui.next_event(timeout)? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key),
                Event::Mouse(mouse) => app.handle_mouse_event(mouse),
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            let mut current = action;
            while let Some(a) = current {
                current = app.update(a)?;
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_rate {
            last_tick = Instant::now();
            app.update(Action::Tick(elapsed))?;
        }
    }

    Ok(())
}
