//! Wiki Search Demo: A debounced typeahead over a canned article index.
//!
//! Demonstrates:
//! - SearchBox with debounced suggestion fetching
//! - TimerActor (startup focus + debounce slots)
//! - LookupActor running a slow suggestion source off the UI loop
//! - TickerActor driving the cursor blink and the loading spinner
//!
//! Keys: type to search, Enter or the button commits, click a suggestion
//! to search it directly, Tab toggles the disabled state, ESC exits.

use std::fs::File;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{select, unbounded, Sender};
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};
use typeahead::{
    Cell, Engine, InputEvent, KeyCode, LookupActor, Rect, Rgb, SearchBox, SearchBoxConfig,
    SearchReporter, SourceError, SuggestionSource, TickerActor, TimerActor, Widget,
};

/// Article titles served with artificial latency, standing in for a remote
/// suggestion endpoint.
struct CannedTitles {
    latency: Duration,
}

static TITLES: &[&str] = &[
    "Dog",
    "Dog agility",
    "Dog breed",
    "Dog intelligence",
    "Doge (meme)",
    "Dogma",
    "Cat",
    "Cat (Unix)",
    "Caterpillar",
    "Cathedral",
    "Catalonia",
    "Rust (programming language)",
    "Rust Belt",
    "Rustling",
    "Terminal emulator",
    "Terminal velocity",
    "Typewriter",
    "Typeface",
    "Typhoon",
];

impl SuggestionSource for CannedTitles {
    fn fetch(&self, query: &str, locale: &str) -> Result<Vec<String>, SourceError> {
        log::debug!("fetching suggestions for {query:?} ({locale})");
        thread::sleep(self.latency);
        let needle = query.trim().to_lowercase();
        Ok(TITLES
            .iter()
            .filter(|title| title.to_lowercase().contains(&needle))
            .take(6)
            .map(ToString::to_string)
            .collect())
    }
}

/// Forwards committed searches to the UI loop; every keystroke goes to the
/// log so the upstream-ownership seam is visible.
struct ChannelReporter {
    commits: Sender<String>,
}

impl SearchReporter for ChannelReporter {
    fn on_query_change(&self, query: &str) {
        log::trace!("query changed: {query:?}");
    }

    fn on_commit(&self, term: &str) {
        let _ = self.commits.send(term.to_string());
    }
}

fn main() -> typeahead::Result<()> {
    let _ = WriteLogger::init(
        LevelFilter::Debug,
        LogConfig::default(),
        File::create("typeahead-demo.log")?,
    );

    let mut engine = Engine::new()?;
    let width = engine.width();

    // Actors
    let (fired_tx, fired_rx) = unbounded();
    let timer = TimerActor::spawn(fired_tx);

    let (reply_tx, reply_rx) = unbounded();
    let lookup = LookupActor::spawn(
        Arc::new(CannedTitles {
            latency: Duration::from_millis(300),
        }),
        reply_tx,
    );

    let ticker = TickerActor::spawn(Duration::from_millis(50));

    let (commit_tx, commit_rx) = unbounded();
    let reporter = Arc::new(ChannelReporter { commits: commit_tx });

    let mut search = SearchBox::new(
        Rect::new(2, 2, width.saturating_sub(4), 9),
        SearchBoxConfig::default(),
        "en",
        timer.commander(),
        lookup.commander(),
        reporter,
    );

    let mut last_commit = String::new();
    let input_rx = engine.input_receiver().clone();

    draw(&mut engine, &search, &last_commit)?;

    while engine.is_running() {
        select! {
            recv(input_rx) -> result => {
                let Ok(event) = result else { break };
                match &event {
                    InputEvent::Key { code: KeyCode::Esc, .. } => engine.stop(),
                    InputEvent::Key { code: KeyCode::Char('c'), modifiers } if modifiers.control => {
                        engine.stop();
                    }
                    InputEvent::Key { code: KeyCode::Tab, .. } => {
                        search.set_disabled(!search.is_disabled());
                    }
                    InputEvent::Resize { width, height } => {
                        engine.handle_resize(*width, *height);
                        search.set_bounds(Rect::new(2, 2, width.saturating_sub(4), 9));
                    }
                    InputEvent::Shutdown => engine.stop(),
                    _ => {
                        search.handle_input(&event);
                    }
                }
            }

            recv(fired_rx) -> fired => {
                if let Ok(fired) = fired {
                    search.on_timer(fired);
                }
            }

            recv(reply_rx) -> reply => {
                if let Ok(reply) = reply {
                    search.on_suggestions(reply);
                }
            }

            recv(ticker.receiver()) -> tick => {
                if tick.is_ok() {
                    search.tick();
                }
            }
        }

        while let Ok(term) = commit_rx.try_recv() {
            log::info!("search committed: {term:?}");
            last_commit = term;
        }

        if search.needs_redraw() {
            draw(&mut engine, &search, &last_commit)?;
            search.clear_redraw();
        }
    }

    ticker.join();
    timer.join();
    lookup.join();
    Ok(())
}

fn draw(engine: &mut Engine, search: &SearchBox, last_commit: &str) -> typeahead::Result<()> {
    let width = engine.width();
    let height = engine.height();

    let buffer = engine.buffer_mut();
    buffer.clear();
    buffer.fill_rect(Rect::from_size(width, 1), Cell::new(' ').with_bg(Rgb::new(40, 40, 40)));
    buffer.draw_text(1, 0, "Typeahead Demo", Rgb::WHITE, Rgb::new(40, 40, 40));
    buffer.draw_text(
        17,
        0,
        "type to search · Enter commits · Tab toggles disabled · ESC exits",
        Rgb::new(150, 150, 150),
        Rgb::new(40, 40, 40),
    );

    search.render(buffer);

    if !last_commit.is_empty() && height > 13 {
        let status = format!("Searching for: {last_commit}");
        buffer.draw_text(2, 13, &status, Rgb::new(100, 200, 100), Rgb::BLACK);
    }

    engine.present()
}
