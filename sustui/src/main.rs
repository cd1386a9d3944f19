mod app;
mod handlers;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::App;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use state::TICK_RATE;
use std::io;
use susconfig::SustainConfig;
use tokio::runtime::Runtime;

fn main() -> Result<()> {
    let config = SustainConfig::load().with_context(|| "Failed to load sustainlite config")?;
    let runtime = Runtime::new().with_context(|| "Failed to start async runtime")?;

    let mut app = App::new(config);
    app.startup(&runtime);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, &runtime);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    runtime: &Runtime,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render_app(f, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Press && handlers::handle_key(app, key, runtime)
                {
                    return Ok(());
                }
            }
        }

        app.clear_expired_status();
    }
}
