/// Core game interface for guessterm front ends
use crossterm::event::KeyEvent;
use tokio::sync::mpsc::UnboundedSender;

/// Handle given to games so key handling can queue actions for the engine
pub struct Context<A> {
    pub(crate) tx: UnboundedSender<A>,
}

impl<A> Context<A> {
    pub fn new(tx: UnboundedSender<A>) -> Self {
        Self { tx }
    }

    pub fn send_action(&self, action: A) {
        // The engine owns the receiver for as long as it runs a game.
        let _ = self.tx.send(action);
    }
}

/// Main game trait that all terminal games implement
pub trait Game {
    /// What a key press turns into
    type Action: std::fmt::Debug;
    /// State the actions are applied to and the renderer observes
    type State;

    /// Turn-based games return `None` and are only woken by input
    fn tick_rate(&self) -> Option<std::time::Duration> {
        None
    }

    fn on_tick(&mut self, _dt: u32, _state: &mut Self::State) {}

    /// Map a key press to actions; must not touch the state directly
    fn handle_input(&mut self, event: KeyEvent, ctx: &Context<Self::Action>);

    fn handle_action(&mut self, action: Self::Action, state: &mut Self::State);

    /// Keys that end the game loop
    fn is_quit(&self, event: &KeyEvent) -> bool {
        event.code == crossterm::event::KeyCode::Esc
    }

    fn render(&self, frame: &mut ratatui::Frame, state: &Self::State);
}
