use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::TILES_PER_ROW;
use crate::games::GameKind;

const BANNER: &str = r#"
 ╔════════════════════════════════════════════════════════════════════════╗
 ║   ██████╗  ██╗   ██╗ ██╗ ███████╗  ██████╗  █████╗  ██████╗  ███████╗  ║
 ║  ██╔═══██╗ ██║   ██║ ██║ ╚══███╔╝ ██╔════╝ ██╔══██╗ ██╔══██╗ ██╔════╝  ║
 ║  ██║   ██║ ██║   ██║ ██║   ███╔╝  ██║      ███████║ ██║  ██║ █████╗    ║
 ║  ██║▄▄ ██║ ██║   ██║ ██║  ███╔╝   ██║      ██╔══██║ ██║  ██║ ██╔══╝    ║
 ║  ╚██████╔╝ ╚██████╔╝ ██║ ███████╗ ╚██████╗ ██║  ██║ ██████╔╝ ███████╗  ║
 ║   ╚══▀▀═╝   ╚═════╝  ╚═╝ ╚══════╝  ╚═════╝ ╚═╝  ╚═╝ ╚═════╝  ╚══════╝  ║
 ╚════════════════════════════════════════════════════════════════════════╝"#;

fn render_game_tile(frame: &mut Frame, area: Rect, key: usize, kind: GameKind, selected: bool) {
    let dim = match kind.color() {
        Color::Rgb(r, g, b) => Color::Rgb(r / 2, g / 2, b / 2),
        other => other,
    };
    let border_color = if selected { Color::Rgb(255, 220, 80) } else { dim };
    let border_type = if selected { BorderType::Double } else { BorderType::Rounded };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 { return; }

    let mut lines: Vec<Line> = Vec::new();

    // Key + Icon + Name line
    let name_color = if selected { Color::Rgb(255, 255, 255) } else { kind.color() };
    lines.push(Line::from(vec![
        Span::styled(format!("[{}] ", (key + 1) % 10), Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(format!("{} ", kind.icon()), Style::default()),
        Span::styled(kind.name(), Style::default().fg(name_color).add_modifier(Modifier::BOLD)),
    ]));

    for desc_line in kind.description().split('\n') {
        lines.push(Line::from(vec![
            Span::styled(desc_line, Style::default().fg(if selected { Color::Rgb(180, 180, 200) } else { Color::Rgb(120, 120, 140) })),
        ]));
    }

    if selected {
        lines.push(Line::from(vec![
            Span::styled("▶ Enter to play", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        ]));
    }

    let p = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(p, inner);
}

fn controls(kind: GameKind) -> &'static [(&'static str, &'static str)] {
    const QUIZ: &[(&str, &str)] = &[
        ("← →", "Pick an answer"),
        ("Enter / Space", "Answer"),
        ("1-9", "Quick pick"),
        ("R", "Start over"),
    ];
    match kind {
        GameKind::NumberMatch
        | GameKind::Math
        | GameKind::WordBuilder
        | GameKind::ColorShape
        | GameKind::Patterns
        | GameKind::Capitals => QUIZ,
        GameKind::Snake => &[("↑ ↓ ← →", "Steer"), ("P", "Pause"), ("R", "Restart")],
        GameKind::SlidingPuzzle => &[("↑ ↓ ← →", "Slide a tile"), ("R", "New puzzle")],
        GameKind::Sudoku => &[
            ("↑ ↓ ← →", "Move cursor"),
            ("1-9", "Write a number"),
            ("0 / Del", "Clear cell"),
            ("R", "New puzzle"),
        ],
        GameKind::Wordle => &[
            ("A-Z", "Type a letter"),
            ("Backspace", "Erase"),
            ("Enter", "Check the guess"),
            ("Esc", "Back"),
        ],
    }
}

fn game_controls(kind: GameKind) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {} {}", kind.icon(), kind.name()), Style::default().fg(kind.color()).add_modifier(Modifier::BOLD)),
        ]),
    ];
    for desc_line in kind.description().split('\n') {
        lines.push(Line::from(vec![
            Span::styled(format!("  {desc_line}"), Style::default().fg(Color::Rgb(100, 100, 120))),
        ]));
    }
    if kind.is_timed() {
        let hint = if kind.has_time_bonus() {
            "  ⏱ Beat the clock for bonus points!"
        } else {
            "  ⏱ Answer before the clock runs out!"
        };
        lines.push(Line::from(vec![
            Span::styled(hint, Style::default().fg(Color::Rgb(255, 180, 60))),
        ]));
    }
    lines.push(Line::from(""));
    for (keys, action) in controls(kind) {
        lines.push(Line::from(vec![
            Span::styled(format!("    {keys:<17}"), Style::default().fg(Color::Rgb(80, 200, 255))),
            Span::styled(*action, Style::default().fg(Color::Rgb(140, 140, 140))),
        ]));
    }
    lines
}

pub fn render_home(frame: &mut Frame, area: Rect, selected_game: usize, notice: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Banner
            Constraint::Length(2),  // Subtitle
            Constraint::Length(12), // Game tiles (2 rows)
            Constraint::Min(10),   // Controls area
            Constraint::Length(2),  // Footer
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(80, 200, 255)))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let subtitle = Paragraph::new(Line::from(vec![
        Span::styled(
            "  ⭐ Play, learn and collect stars! ⭐  ",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    let games_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" 🎮 Games: ↑↓←→ Select, Enter to Play ")
        .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD));
    let games_inner = games_block.inner(chunks[2]);
    frame.render_widget(games_block, chunks[2]);

    let tile_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(games_inner);

    let games = GameKind::all();
    for (row, row_area) in tile_rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, TILES_PER_ROW as u32); TILES_PER_ROW])
            .split(*row_area);
        for (col, col_area) in cols.iter().enumerate() {
            let idx = row * TILES_PER_ROW + col;
            if let Some(kind) = games.get(idx) {
                render_game_tile(frame, *col_area, idx, *kind, selected_game == idx);
            }
        }
    }

    // Navigation left, selected game right
    let ctrl_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[3]);

    let controls = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  🔧 Navigation", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("    Tab / Shift+Tab  ", Style::default().fg(Color::Rgb(80, 200, 255))),
            Span::styled("Switch tabs", Style::default().fg(Color::Rgb(140, 140, 140))),
        ]),
        Line::from(vec![
            Span::styled("    1-9, 0           ", Style::default().fg(Color::Rgb(80, 200, 255))),
            Span::styled("Launch game", Style::default().fg(Color::Rgb(140, 140, 140))),
        ]),
        Line::from(vec![
            Span::styled("    ↑ ↓ ← →         ", Style::default().fg(Color::Rgb(80, 200, 255))),
            Span::styled("Select game", Style::default().fg(Color::Rgb(140, 140, 140))),
        ]),
        Line::from(vec![
            Span::styled("    Enter            ", Style::default().fg(Color::Rgb(80, 200, 255))),
            Span::styled("Play selected", Style::default().fg(Color::Rgb(140, 140, 140))),
        ]),
        Line::from(vec![
            Span::styled("    Esc              ", Style::default().fg(Color::Rgb(80, 200, 255))),
            Span::styled("Return to Home", Style::default().fg(Color::Rgb(140, 140, 140))),
        ]),
        Line::from(vec![
            Span::styled("    q / Ctrl+C       ", Style::default().fg(Color::Rgb(80, 200, 255))),
            Span::styled("Quit", Style::default().fg(Color::Rgb(140, 140, 140))),
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
            .title(" ⌨ Navigation Control ")
            .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(controls, ctrl_cols[0]);

    let kind = games.get(selected_game).copied().unwrap_or(GameKind::NumberMatch);
    let game_ctrl = Paragraph::new(game_controls(kind))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Rgb(50, 100, 140)))
                .title(format!(" 🎮 {} Control ", kind.name()))
                .title_style(Style::default().fg(kind.color()).add_modifier(Modifier::BOLD)),
        );
    frame.render_widget(game_ctrl, ctrl_cols[1]);

    let footer = match notice {
        Some(text) => Line::from(vec![
            Span::styled("  ⚠ ", Style::default().fg(Color::Rgb(255, 120, 80))),
            Span::styled(text.to_string(), Style::default().fg(Color::Rgb(255, 160, 120)).add_modifier(Modifier::BOLD)),
        ]),
        None => Line::from(vec![
            Span::styled("  🦀 ", Style::default().fg(Color::Rgb(255, 100, 50))),
            Span::styled(concat!("v", env!("CARGO_PKG_VERSION")), Style::default().fg(Color::Rgb(80, 80, 100))),
            Span::styled("  │  ", Style::default().fg(Color::Rgb(40, 40, 60))),
            Span::styled("⭐", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
            Span::styled(" Finish a quiz to earn stars", Style::default().fg(Color::Rgb(100, 100, 130))),
        ]),
    };
    frame.render_widget(Paragraph::new(footer).alignment(Alignment::Center), chunks[4]);
}
