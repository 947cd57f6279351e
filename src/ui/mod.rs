pub mod dialog;
pub mod home;
pub mod tabs;

use ratatui::prelude::*;

use crate::app::{App, Tab};

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),   // Content
        ])
        .split(frame.area());

    tabs::render_tabs(frame, app, chunks[0]);

    match (app.current_tab, app.screen.as_mut()) {
        (Tab::Play(_), Some(screen)) => screen.render(frame, chunks[1]),
        _ => home::render_home(frame, chunks[1], app.selected_game, app.notice.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::games::GameKind;
    use crate::progress::ProgressReporter;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn renders_home_and_active_game() {
        let config = Config::default();
        let reporter = ProgressReporter::disabled(config.player.clone());
        let mut app = App::new(config, reporter);
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();

        terminal.draw(|f| render(f, &mut app)).unwrap();
        for kind in GameKind::all() {
            app.open(*kind);
            terminal.draw(|f| render(f, &mut app)).unwrap();
        }
        let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Wordle"));
    }
}
