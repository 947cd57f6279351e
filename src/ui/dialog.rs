use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::round::Summary;

fn centered(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width.saturating_sub(4));
    let h = h.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(w) / 2;
    let y = area.y + area.height.saturating_sub(h) / 2;
    Rect::new(x, y, w, h)
}

/// End-of-quiz overlay. Holds no state; the hosting screen handles
/// Play Again / Back.
pub fn render_completion(frame: &mut Frame, area: Rect, summary: &Summary, accent: Color) {
    let overlay = centered(area, 44, 12);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(accent))
        .title(" 🏁 All done! ")
        .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let stars = summary.tier.stars() as usize;
    let star_line = format!("{}{}", "★ ".repeat(stars), "☆ ".repeat(3 - stars.min(3)));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            star_line.trim_end().to_string(),
            Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            summary.tier.headline(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} of {} correct  │  Score: {}", summary.correct, summary.total, summary.score),
            Style::default().fg(Color::Rgb(180, 180, 200)),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
            Span::styled(" play again  ", Style::default().fg(Color::Rgb(100, 100, 130))),
            Span::styled("Esc", Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
            Span::styled(" back", Style::default().fg(Color::Rgb(100, 100, 130))),
        ]),
    ];

    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    frame.render_widget(p, inner);
}

/// One-line banner for the puzzle games' win/lose states.
pub fn render_banner(frame: &mut Frame, area: Rect, title: &str, detail: &str, color: Color) {
    let overlay = centered(area, 40, 7);
    frame.render_widget(Clear, overlay);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(title.to_string(), Style::default().fg(color).add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(detail.to_string(), Style::default().fg(Color::Rgb(180, 180, 200)))),
        Line::from(Span::styled(
            "Enter play again  Esc back",
            Style::default().fg(Color::Rgb(100, 100, 130)),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).style(Style::default().bg(Color::Rgb(15, 15, 25))),
        inner,
    );
}
