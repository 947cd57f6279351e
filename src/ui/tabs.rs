use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Standing, Tab};

const HOME_ACCENT: Color = Color::Rgb(255, 220, 80);
const IDLE: Color = Color::Rgb(120, 120, 140);

fn accent(tab: Tab) -> Color {
    match tab {
        Tab::Home => HOME_ACCENT,
        Tab::Play(kind) => kind.color(),
    }
}

fn standing_line(standing: Standing) -> Line<'static> {
    let accent = standing.kind.color();
    let mut spans = vec![
        Span::styled(" Score ", Style::default().fg(IDLE)),
        Span::styled(
            standing.score.to_string(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
    ];
    if standing.finished {
        spans.push(Span::styled(" ✓ done", Style::default().fg(Color::Rgb(120, 220, 120))));
    }
    spans.push(Span::raw(" "));
    Line::from(spans).right_aligned()
}

/// Tab strip across the top. The active tab and the frame take the colour of
/// the open game.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let active = accent(app.current_tab);
    let titles: Vec<Line> = Tab::all()
        .into_iter()
        .map(|t| {
            let style = if t == app.current_tab {
                Style::default().fg(accent(t)).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(IDLE)
            };
            Line::from(Span::styled(t.title(), style))
        })
        .collect();

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(active))
        .border_type(BorderType::Rounded)
        .title(" 🕹 Quizcade ")
        .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
    if let Some(standing) = app.standing() {
        block = block.title_top(standing_line(standing));
    }

    let tabs = Tabs::new(titles)
        .block(block)
        .select(app.current_tab.index())
        .highlight_style(Style::default().fg(active).add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
        .divider(Span::styled("│", Style::default().fg(Color::Rgb(60, 60, 80))));

    frame.render_widget(tabs, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::games::GameKind;
    use crate::progress::ProgressReporter;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn app() -> App {
        let config = Config::default();
        let reporter = ProgressReporter::disabled(config.player.clone());
        App::new(config, reporter)
    }

    fn draw(app: &App) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(200, 3)).unwrap();
        terminal.draw(|f| render_tabs(f, app, f.area())).unwrap();
        terminal
    }

    fn text(terminal: &Terminal<TestBackend>) -> String {
        terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn home_uses_the_house_colour_and_no_score() {
        let terminal = draw(&app());
        assert_eq!(terminal.backend().buffer()[(0, 0)].fg, HOME_ACCENT);
        assert!(!text(&terminal).contains("Score"));
    }

    #[test]
    fn open_game_tints_the_bar_and_shows_its_score() {
        let mut app = app();
        app.open(GameKind::Math);
        let terminal = draw(&app);
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(0, 0)].fg, GameKind::Math.color());

        let text = text(&terminal);
        assert!(text.contains("Score 0"));
        assert!(!text.contains("done"));

        // The active title is drawn in the game's accent.
        let width = buffer.area.width as usize;
        let row: Vec<_> = buffer.content()[width..2 * width].iter().collect();
        let math = row
            .windows(4)
            .position(|w| w.iter().map(|c| c.symbol()).collect::<String>() == "Math")
            .unwrap();
        assert_eq!(row[math].fg, GameKind::Math.color());
    }
}
