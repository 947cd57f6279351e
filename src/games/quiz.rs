use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::games::{Game, Nav};
use crate::progress::{ProgressReporter, QuestType};
use crate::round::{GameSession, GenerationError, Phase, Quiz, SessionEvent, SessionSettings};
use crate::ui::dialog;

/// Presentation half of a quiz game.
pub trait QuizView: Quiz {
    fn title(&self) -> &'static str;
    fn accent(&self) -> Color;
    fn prompt_lines(&self, content: &Self::Content) -> Vec<Line<'static>>;
    fn option_label(&self, answer: &Self::Answer) -> Line<'static>;
}

/// Screen hosting one [`GameSession`]. Dropping the screen drops the session
/// and its timers.
pub struct QuizScreen<Q: QuizView> {
    session: GameSession<Q>,
    cursor: usize,
    best: u32,
    reporter: ProgressReporter,
}

impl<Q: QuizView> QuizScreen<Q> {
    pub fn new(quiz: Q, settings: SessionSettings, reporter: ProgressReporter) -> Result<Self, GenerationError> {
        Ok(Self {
            session: GameSession::with_entropy(quiz, settings)?,
            cursor: 0,
            best: 0,
            reporter,
        })
    }

    pub fn session(&self) -> &GameSession<Q> {
        &self.session
    }

    fn answer(&mut self, option: usize) {
        if let Some(event) = self.session.select(option) {
            self.on_event(event);
        }
    }

    fn on_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::RoundStarted(_) => self.cursor = 0,
            SessionEvent::Completed(summary) => {
                self.best = self.best.max(summary.score);
                self.reporter.report(QuestType::CompleteGames, 1);
                self.reporter.report(QuestType::EarnStars, summary.tier.stars());
            }
            SessionEvent::Answered(_) | SessionEvent::TimedOut => {}
        }
    }

    fn option_style(&self, idx: usize) -> (Color, BorderType) {
        let round = self.session.round();
        match self.session.phase() {
            Phase::ShowingFeedback => {
                if idx == round.correct_index() {
                    (Color::Rgb(80, 220, 100), BorderType::Double)
                } else if self.session.selected() == Some(idx) {
                    (Color::Rgb(230, 70, 70), BorderType::Double)
                } else {
                    (Color::Rgb(60, 60, 80), BorderType::Rounded)
                }
            }
            _ if idx == self.cursor => (Color::Rgb(255, 220, 80), BorderType::Double),
            _ => (Color::Rgb(100, 100, 130), BorderType::Rounded),
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let round = self.session.round();
        let mut spans = vec![
            Span::styled(
                format!(" Round {}/{} ", round.index(), round.total()),
                Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Score: {} ", self.session.score()),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("🏆 Best: {} ", self.best), Style::default().fg(Color::Cyan)),
        ];
        if let Some(countdown) = self.session.countdown() {
            let width = 10usize;
            let filled = (countdown.ratio() * width as f64).ceil() as usize;
            let color = if countdown.seconds_left() <= 3 {
                Color::Rgb(230, 70, 70)
            } else {
                Color::Rgb(80, 220, 100)
            };
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(
                format!("⏱ {:>2}s ", countdown.seconds_left()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!("{}{}", "█".repeat(filled.min(width)), "░".repeat(width - filled.min(width))),
                Style::default().fg(color),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_options(&self, frame: &mut Frame, area: Rect) {
        let options = self.session.round().options();
        if options.is_empty() {
            return;
        }
        let n = options.len() as u32;
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints((0..n).map(|_| Constraint::Ratio(1, n)).collect::<Vec<_>>())
            .split(area);
        for (idx, answer) in options.iter().enumerate() {
            let (color, border) = self.option_style(idx);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(border)
                .border_style(Style::default().fg(color))
                .title(format!(" {} ", idx + 1))
                .title_style(Style::default().fg(Color::Rgb(255, 220, 80)));
            let inner = block.inner(cols[idx]);
            frame.render_widget(block, cols[idx]);
            let pad = inner.height.saturating_sub(1) / 2;
            let mut lines: Vec<Line> = (0..pad).map(|_| Line::from("")).collect();
            lines.push(self.session.quiz().option_label(answer));
            frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
        }
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let line = match (self.session.phase(), self.session.feedback()) {
            (Phase::ShowingFeedback, Some(fb)) if fb.correct => Line::from(vec![Span::styled(
                format!(" 🎉 Correct! +{} ", fb.points),
                Style::default().fg(Color::Rgb(80, 220, 100)).add_modifier(Modifier::BOLD),
            )]),
            (Phase::ShowingFeedback, Some(fb)) if fb.selected.is_none() => Line::from(vec![Span::styled(
                " ⏰ Time's up! ",
                Style::default().fg(Color::Rgb(255, 180, 60)).add_modifier(Modifier::BOLD),
            )]),
            (Phase::ShowingFeedback, _) => Line::from(vec![Span::styled(
                " Oops! The right answer is highlighted. ",
                Style::default().fg(Color::Rgb(230, 70, 70)).add_modifier(Modifier::BOLD),
            )]),
            _ => Line::from(vec![
                Span::styled(" ←→ Choose ", Style::default().fg(Color::DarkGray)),
                Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("ENTER Answer ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("1-9 Quick pick ", Style::default().fg(Color::DarkGray)),
                Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("R Restart ", Style::default().fg(Color::DarkGray)),
                Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("Esc Back", Style::default().fg(Color::DarkGray)),
            ]),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl<Q: QuizView> Game for QuizScreen<Q> {
    fn update(&mut self, elapsed: Duration) {
        if let Some(event) = self.session.tick(elapsed) {
            self.on_event(event);
        }
    }

    fn handle_input(&mut self, key: KeyEvent) -> Nav {
        if self.session.phase() == Phase::Complete {
            match key.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
                KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => return Nav::Back,
                _ => {}
            }
            return Nav::Stay;
        }

        let n = self.session.round().options().len().max(1);
        match key.code {
            KeyCode::Esc => return Nav::Back,
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
            KeyCode::Left | KeyCode::Up => self.cursor = (self.cursor + n - 1) % n,
            KeyCode::Right | KeyCode::Down => self.cursor = (self.cursor + 1) % n,
            KeyCode::Enter | KeyCode::Char(' ') => self.answer(self.cursor),
            KeyCode::Char(c) => {
                if let Some(d) = c.to_digit(10).filter(|d| *d >= 1) {
                    self.answer(d as usize - 1);
                }
            }
            _ => {}
        }
        Nav::Stay
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let quiz = self.session.quiz();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(quiz.accent()))
            .title(format!(" {} ", quiz.title()))
            .title_style(Style::default().fg(quiz.accent()).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(5),
                Constraint::Length(1),
            ])
            .split(inner);

        self.render_status(frame, chunks[0]);

        let prompt = quiz.prompt_lines(self.session.round().content());
        let pad = chunks[1].height.saturating_sub(prompt.len() as u16) / 2;
        let mut lines: Vec<Line> = (0..pad).map(|_| Line::from("")).collect();
        lines.extend(prompt);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[1]);

        self.render_options(frame, chunks[2]);
        self.render_help(frame, chunks[3]);

        if self.session.phase() == Phase::Complete {
            dialog::render_completion(frame, area, &self.session.summary(), quiz.accent());
        }
    }

    fn reset(&mut self) {
        self.cursor = 0;
        if let Err(err) = self.session.play_again() {
            log::error!("could not restart {}: {err}", self.session.quiz().title());
        }
    }

    fn score(&self) -> u32 {
        self.session.score()
    }

    fn is_finished(&self) -> bool {
        self.session.phase() == Phase::Complete
    }
}
