use crate::core::game::{Context, Game};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How long to wait for a key before checking the outbox and tick again
const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Whole milliseconds in `d`, saturating at `u32::MAX`
fn millis_u32(d: Duration) -> u32 {
    u32::try_from(d.as_millis()).unwrap_or(u32::MAX)
}

pub struct Engine<G: Game> {
    game: G,
    state: G::State,
}

impl<G: Game> Engine<G> {
    pub fn new(game: G, state: G::State) -> Self {
        Self { game, state }
    }

    /// Applies every action queued so far, in order
    fn drain(&mut self, outbox: &mut tokio::sync::mpsc::UnboundedReceiver<G::Action>) {
        while let Ok(action) = outbox.try_recv() {
            debug!(?action, "applying action");
            self.game.handle_action(action, &mut self.state);
        }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<G::State> {
        let mut last_tick = Instant::now();

        let (outbox_tx, mut outbox_rx) = tokio::sync::mpsc::unbounded_channel::<G::Action>();
        let ctx = Context::new(outbox_tx);
        info!("engine started");

        loop {
            terminal.draw(|f| self.game.render(f, &self.state))?;

            // INPUT (Non-blocking)
            if event::poll(Duration::from_millis(0))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if self.game.is_quit(&key) {
                            break;
                        }
                        self.game.handle_input(key, &ctx);
                    }
                }
            }

            let tick_rate = self.game.tick_rate();
            let tick_sleep = tick_rate.unwrap_or(POLL_INTERVAL);

            tokio::select! {
                Some(action) = outbox_rx.recv() => {
                    debug!(?action, "applying action");
                    self.game.handle_action(action, &mut self.state);
                    self.drain(&mut outbox_rx);
                }

                _ = tokio::time::sleep(tick_sleep) => {
                    if tick_rate.is_some() {
                        let dt = millis_u32(last_tick.elapsed());
                        last_tick = Instant::now();
                        self.game.on_tick(dt, &mut self.state);
                    }
                }
            }
        }

        info!("engine stopped");
        Ok(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_delta_saturates() {
        assert_eq!(millis_u32(Duration::from_millis(16)), 16);
        assert_eq!(millis_u32(Duration::from_secs(10_000_000)), u32::MAX);
    }
}
