use ratatui::Frame;

use crate::app::{App, AppState};

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
    fn title(&self) -> &'static str;
}

/// The word being guessed, clock and running score
pub struct PlayScreen;

impl Screen for PlayScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
    }

    fn title(&self) -> &'static str {
        "play"
    }
}

/// Final score after a round ends
pub struct ScoreScreen;

impl Screen for ScoreScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
    }

    fn title(&self) -> &'static str {
        "score"
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: AppState) -> Box<dyn Screen> {
    match state {
        AppState::Playing => Box::new(PlayScreen),
        AppState::Score => Box::new(ScoreScreen),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_follows_state() {
        assert_eq!(current_screen(AppState::Playing).title(), "play");
        assert_eq!(current_screen(AppState::Score).title(), "score");
    }
}
