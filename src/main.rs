mod api;
mod app;
mod autoplay;
mod data;
mod db;
mod deck;
mod error;
mod models;
mod srs;
mod tui;
mod ui;

#[cfg(test)]
mod app_tests;

use std::sync::Arc;
use std::time::Duration;

use app::App;
use color_eyre::eyre::Result;
use crossterm::event::{self, Event};
use db::Db;
use tokio::sync::Mutex;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    env_logger::init();

    let db_url =
        std::env::var("IVRIT_DB").unwrap_or_else(|_| "sqlite://ivrit.db?mode=rwc".to_string());
    let db = Db::new(&db_url).await?;
    let app = Arc::new(Mutex::new(App::new(db).await?));

    // Optional HTTP surface for a web frontend, next to the TUI.
    if let Ok(addr) = std::env::var("IVRIT_API_ADDR") {
        let state = api::ApiState { app: app.clone() };
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        log::info!("api listening on {addr}");
        tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, api::app_router(state)).await {
                log::error!("api server: {err}");
            }
        });
    }

    let mut terminal = tui::init()?;
    let res = run_app(&mut terminal, app).await;
    tui::restore()?; // Ensure terminal is restored properly

    res
}

async fn run_app(terminal: &mut tui::Tui, app: Arc<Mutex<App>>) -> Result<()> {
    loop {
        {
            let guard = app.lock().await;
            if guard.exit {
                return Ok(());
            }
            terminal.draw(|frame| ui::render(&guard, frame))?;
        }

        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                let ticket = {
                    let mut guard = app.lock().await;
                    guard.handle_key_event(key).await?;
                    guard.take_pending_autoplay()
                };
                // Spawning happens outside the lock; the driver revalidates
                // its ticket before every step anyway.
                if let Some(ticket) = ticket {
                    autoplay::spawn_driver(app.clone(), ticket);
                }
            }
        }
    }
}
