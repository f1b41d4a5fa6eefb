//! Application orchestration module
//!
//! Coordinates the event pump, the builder state, and rendering: keys
//! map to state operations, every loop turn renders the latest
//! snapshot, and copy actions schedule their own feedback expiry.

use std::{future::Future, sync::Arc, time::Duration};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use smol::{future::FutureExt, Task};

use crate::{
    clipboard,
    error::TinttyResult,
    event::{Event, EventHandler},
    state::{AtomicState, BuilderState},
    tui::Tui,
    ui,
};

/// How long copy feedback stays on screen.
const COPY_FEEDBACK: Duration = Duration::from_secs(3);
/// Stop movement per keypress, in percent of the axis.
const POSITION_STEP: f64 = 5.0;
/// Hue rotation per keypress, in degrees.
const HUE_STEP: f64 = 15.0;
/// Saturation/lightness shift per keypress, in percent.
const LEVEL_STEP: f64 = 5.0;

/// Core application struct managing all components
pub struct App {
    /// Terminal interface manager
    tui: Tui<BuilderState>,
    /// Event handling system
    events: Arc<EventHandler>,
    /// Event polling rate
    tick_rate: Duration,
    /// Background task handles
    tasks: Vec<Task<TinttyResult<()>>>,
}

impl App {
    /// Creates a new application instance
    pub fn new(state: BuilderState, tick_rate: Duration) -> TinttyResult<Self> {
        let tui = Tui::new(state)?;
        let events = EventHandler::new();

        Ok(Self {
            tui,
            events: Arc::new(events),
            tick_rate,
            tasks: Vec::new(),
        })
    }

    /// Spawns a background task
    pub fn spawn<F>(&mut self, future: F) -> TinttyResult<()>
    where
        F: Future<Output = TinttyResult<()>> + Send + 'static,
    {
        let task = smol::spawn(future);
        self.tasks.push(task);
        Ok(())
    }

    /// Runs the builder event loop until the user quits
    pub async fn run(&mut self) -> TinttyResult<()> {
        // Spawn event handling task
        let events = self.events.clone();
        let tick_rate = self.tick_rate;
        self.spawn(async move { events.run(tick_rate).await })?;

        while self.tui.state().is_running() {
            // Non-blocking event check
            if let Some(event) = self.events.try_recv()? {
                match event {
                    Event::Quit => {
                        self.tui.state().quit();
                        break;
                    }
                    Event::Key(key) => self.handle_key(key)?,
                    Event::CopyReset { epoch } => self.tui.state().clear_copied(epoch),
                    _ => {}
                }
            }

            // Non-blocking render
            self.tui.render(ui::render)?;

            // Yield to other tasks
            smol::future::yield_now().await;
        }

        // Stop event handler and cleanup tasks
        self.events.stop();
        self.cleanup_tasks().await;

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> TinttyResult<()> {
        if key.kind == KeyEventKind::Release {
            return Ok(());
        }

        match key.code {
            KeyCode::Char('c') => return self.copy(false),
            KeyCode::Char('C') => return self.copy(true),
            _ => {}
        }

        let state = self.tui.state();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => state.quit(),
            KeyCode::Tab | KeyCode::Down => state.select_next(),
            KeyCode::BackTab | KeyCode::Up => state.select_prev(),
            KeyCode::Char('+') | KeyCode::Char('=') => state.increase_count(),
            KeyCode::Char('-') => state.decrease_count(),
            KeyCode::Char('e') => state.redistribute(),
            KeyCode::Char('f') => state.toggle_fixed_selected(),
            KeyCode::Char('r') => state.randomize_unfixed(),
            KeyCode::Char('t') => state.cycle_kind(),
            KeyCode::Char('d') => state.cycle_direction(),
            KeyCode::Char('m') => state.cycle_format(),
            KeyCode::Char('[') => state.nudge_selected_position(-POSITION_STEP),
            KeyCode::Char(']') => state.nudge_selected_position(POSITION_STEP),
            KeyCode::Char('h') => state.rotate_selected_hue(-HUE_STEP),
            KeyCode::Char('H') => state.rotate_selected_hue(HUE_STEP),
            KeyCode::Char('s') => state.saturate_selected(-LEVEL_STEP),
            KeyCode::Char('S') => state.saturate_selected(LEVEL_STEP),
            KeyCode::Char('l') => state.lighten_selected(-LEVEL_STEP),
            KeyCode::Char('L') => state.lighten_selected(LEVEL_STEP),
            _ => {}
        }

        Ok(())
    }

    /// Copy the gradient expression (or the full rule) to the clipboard
    /// and schedule the feedback expiry for this copy.
    fn copy(&mut self, full_rule: bool) -> TinttyResult<()> {
        let snapshot = self.tui.state().snapshot();
        let text = if full_rule {
            snapshot.full_css()
        } else {
            snapshot.gradient_css()
        };

        match clipboard::copy_text(&text) {
            Ok(()) => {
                let epoch = self.tui.state().mark_copied();
                let events = self.events.clone();
                self.spawn(async move {
                    smol::Timer::after(COPY_FEEDBACK).await;
                    // a closed channel means the loop is already gone,
                    // and with it the feedback to clear
                    let _ = events.try_send(Event::CopyReset { epoch });
                    Ok(())
                })?;
            }
            Err(e) => log::warn!("clipboard copy failed: {}", e),
        }

        Ok(())
    }

    /// Cleanup background tasks
    async fn cleanup_tasks(&mut self) {
        let tasks = std::mem::take(&mut self.tasks);
        for task in tasks {
            // Attempt to join task with timeout
            match task
                .or(async {
                    smol::Timer::after(Duration::from_secs(1)).await;
                    Ok(())
                })
                .await
            {
                Ok(_) => {}
                Err(e) => eprintln!("Task cleanup error: {}", e),
            }
        }
    }

    /// Returns a reference to the builder state
    pub fn state(&self) -> &BuilderState {
        self.tui.state()
    }

    /// Returns a reference to the event handler
    pub fn events(&self) -> &EventHandler {
        &self.events
    }
}
