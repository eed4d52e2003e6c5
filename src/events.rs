use std::io;
use std::time::Duration;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use futures_util::{Stream, StreamExt};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::app::App;
use crate::poller::PollDriver;

/// Lines moved by PageUp/PageDown.
const PAGE: u16 = 10;

/// How often the screen is redrawn when nothing else happens, so that
/// status messages expire and "updated ago" keeps counting.
pub const REDRAW_INTERVAL: Duration = Duration::from_millis(250);

/// What woke the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// The poll driver changed the view or the schedule.
    Driver,
    /// A terminal event was handled.
    Input,
    /// Nothing happened within [`REDRAW_INTERVAL`].
    Redraw,
    /// The terminal event stream ended.
    InputClosed,
}

/// Create the redraw ticker. The first tick is one interval from now.
pub fn redraw_ticker() -> Interval {
    let mut ticker = interval_at(Instant::now() + REDRAW_INTERVAL, REDRAW_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

/// Wait for the driver, a terminal event, or the redraw tick, and apply
/// whichever comes first to `app`.
pub async fn wait_for_update<S>(
    app: &mut App,
    driver: &mut PollDriver,
    input: &mut S,
    redraw: &mut Interval,
) -> io::Result<Wake>
where
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    tokio::select! {
        biased;

        event = driver.step(&mut app.view) => {
            app.on_driver_event(event);
            Ok(Wake::Driver)
        }
        maybe_event = input.next() => match maybe_event {
            Some(Ok(Event::Key(key))) => {
                handle_key_event(app, key);
                Ok(Wake::Input)
            }
            Some(Ok(Event::Mouse(mouse))) => {
                handle_mouse_event(app, mouse);
                Ok(Wake::Input)
            }
            // Resize and focus changes only need a redraw
            Some(Ok(_)) => Ok(Wake::Input),
            Some(Err(e)) => Err(e),
            None => Ok(Wake::InputClosed),
        },
        _ = redraw.tick() => Ok(Wake::Redraw),
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Ignore key releases on terminals that report them
    if key.kind == KeyEventKind::Release {
        return;
    }

    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // Scrolling
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(PAGE),
        KeyCode::PageDown => app.scroll_down(PAGE),
        KeyCode::Home | KeyCode::Char('g') => app.scroll_top(),
        KeyCode::End | KeyCode::Char('G') => app.scroll_bottom(),

        // Refresh now
        KeyCode::Char('r') => app.request_refresh(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Export
        KeyCode::Char('e') => {
            let export_path = std::path::PathBuf::from("validators_export.html");
            match app.export_html(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_up(3),
        MouseEventKind::ScrollDown => app.scroll_down(3),
        _ => {}
    }
}
