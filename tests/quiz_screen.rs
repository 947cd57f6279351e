//! Quiz screen integration tests: completion reporting and the dialog.

use std::fs;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use rand::Rng;
use ratatui::backend::TestBackend;
use ratatui::style::Color;
use ratatui::text::Line;
use ratatui::Terminal;

use quizcade::config::Player;
use quizcade::games::number_match::NumberMatch;
use quizcade::games::quiz::{QuizScreen, QuizView};
use quizcade::games::{Game, Nav};
use quizcade::progress::{LedgerSink, ProgressReport, ProgressReporter, ProgressSink, QuestType};
use quizcade::round::{GenerationError, Phase, Prompt, Quiz, SessionSettings};
use quizcade::{Error, Result};

const DELAY: Duration = Duration::from_millis(10);
const WAIT: Duration = Duration::from_secs(2);

struct ChannelSink(mpsc::Sender<ProgressReport>);

impl ProgressSink for ChannelSink {
    fn increment_quest_progress(&mut self, report: &ProgressReport) -> Result<()> {
        let _ = self.0.send(report.clone());
        Ok(())
    }
}

struct FailingSink(mpsc::Sender<()>);

impl ProgressSink for FailingSink {
    fn increment_quest_progress(&mut self, _report: &ProgressReport) -> Result<()> {
        let _ = self.0.send(());
        Err(Error::InvalidConfig("service unavailable".into()))
    }
}

/// A quiz with a single playable round; every later round fails to generate.
struct RunsDry;

impl Quiz for RunsDry {
    type Content = u32;
    type Answer = u32;

    fn generate<R: Rng + ?Sized>(
        &self,
        _rng: &mut R,
        _option_count: usize,
        previous: Option<&u32>,
    ) -> std::result::Result<Prompt<u32, u32>, GenerationError> {
        match previous {
            None => Ok(Prompt { content: 2, options: vec![1, 2, 3, 4] }),
            Some(_) => Err(GenerationError::DomainExhausted { needed: 4, found: 0 }),
        }
    }

    fn is_correct(&self, content: &u32, answer: &u32) -> bool {
        content == answer
    }
}

impl QuizView for RunsDry {
    fn title(&self) -> &'static str {
        "Runs Dry"
    }

    fn accent(&self) -> Color {
        Color::White
    }

    fn prompt_lines(&self, content: &u32) -> Vec<Line<'static>> {
        vec![Line::from(format!("Pick {content}"))]
    }

    fn option_label(&self, answer: &u32) -> Line<'static> {
        Line::from(answer.to_string())
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

fn player() -> Player {
    Player { parent_id: "parent-1".into(), child_id: "child-7".into() }
}

fn screen(rounds: u32, reporter: ProgressReporter) -> QuizScreen<NumberMatch> {
    let settings = SessionSettings {
        total_rounds: rounds,
        option_count: 4,
        feedback_delay: DELAY,
        countdown: None,
    };
    QuizScreen::new(NumberMatch::default(), settings, reporter).unwrap()
}

/// Answer every round, correctly when `correct` is set, via quick-pick keys.
fn play_through(screen: &mut QuizScreen<NumberMatch>, correct: bool) {
    while screen.session().phase() != Phase::Complete {
        let round = screen.session().round();
        let pick = if correct {
            round.correct_index()
        } else {
            (round.correct_index() + 1) % round.options().len()
        };
        let digit = char::from_digit(pick as u32 + 1, 10).unwrap();
        assert_eq!(screen.handle_input(key(KeyCode::Char(digit))), Nav::Stay);
        screen.update(DELAY);
    }
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect()
}

#[test]
fn test_completion_reports_games_and_stars() {
    let (tx, rx) = mpsc::channel();
    let reporter = ProgressReporter::spawn(ChannelSink(tx), player());
    let mut screen = screen(3, reporter);

    play_through(&mut screen, true);
    assert!(screen.is_finished());
    assert_eq!(screen.score(), 3);

    let games = rx.recv_timeout(WAIT).unwrap();
    assert_eq!(games.quest, QuestType::CompleteGames);
    assert_eq!(games.increment, 1);
    assert_eq!(games.parent_id, "parent-1");
    assert_eq!(games.child_id, "child-7");

    let stars = rx.recv_timeout(WAIT).unwrap();
    assert_eq!(stars.quest, QuestType::EarnStars);
    assert_eq!(stars.increment, 3);

    // Nothing more until the next completion.
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
}

#[test]
fn test_no_stars_sends_only_completion() {
    let (tx, rx) = mpsc::channel();
    let reporter = ProgressReporter::spawn(ChannelSink(tx), player());
    let mut screen = screen(2, reporter);

    play_through(&mut screen, false);
    let report = rx.recv_timeout(WAIT).unwrap();
    assert_eq!(report.quest, QuestType::CompleteGames);
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
}

#[test]
fn test_failing_sink_does_not_disturb_play() {
    let (tx, rx) = mpsc::channel();
    let reporter = ProgressReporter::spawn(FailingSink(tx), player());
    let mut screen = screen(2, reporter);

    play_through(&mut screen, true);
    rx.recv_timeout(WAIT).unwrap();
    assert!(screen.is_finished());

    // Play Again from the dialog still works after the failed report.
    assert_eq!(screen.handle_input(key(KeyCode::Enter)), Nav::Stay);
    assert_eq!(screen.session().phase(), Phase::AwaitingInput);
    assert_eq!(screen.session().round().index(), 1);
    assert_eq!(screen.score(), 0);
}

#[test]
fn test_dialog_back_returns_to_host() {
    let mut screen = screen(1, ProgressReporter::disabled(player()));
    play_through(&mut screen, true);
    assert_eq!(screen.handle_input(key(KeyCode::Char('x'))), Nav::Stay);
    assert_eq!(screen.handle_input(key(KeyCode::Char('b'))), Nav::Back);
}

#[test]
fn test_ledger_records_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.jsonl");
    let reporter = ProgressReporter::spawn(LedgerSink::new(&path), player());
    let mut screen = screen(2, reporter);
    play_through(&mut screen, true);

    // The worker appends asynchronously.
    let deadline = std::time::Instant::now() + WAIT;
    let mut lines = Vec::new();
    while std::time::Instant::now() < deadline {
        lines = fs::read_to_string(&path)
            .map(|text| text.lines().map(str::to_string).collect())
            .unwrap_or_default();
        if lines.len() >= 2 {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(lines.len(), 2);

    let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(first["quest"], "COMPLETE_GAMES");
    assert_eq!(first["increment"], 1);
    assert_eq!(first["child_id"], "child-7");
    assert!(first["recorded_at"].is_u64());

    let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
    assert_eq!(second["quest"], "EARN_STARS");
    assert_eq!(second["increment"], 3);
}

#[test]
fn test_completion_dialog_renders_summary() {
    let mut screen = screen(2, ProgressReporter::disabled(player()));
    let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();

    terminal.draw(|f| screen.render(f, f.area())).unwrap();
    assert!(screen_text(&terminal).contains("Round 1/2"));

    play_through(&mut screen, true);
    terminal.draw(|f| screen.render(f, f.area())).unwrap();
    let text = screen_text(&terminal);
    assert!(text.contains("All done!"));
    assert!(text.contains("2 of 2 correct"));
    assert!(text.contains("superstar"));
}

#[test]
fn test_generation_failure_reports_completion_once() {
    let (tx, rx) = mpsc::channel();
    let reporter = ProgressReporter::spawn(ChannelSink(tx), player());
    let settings = SessionSettings {
        total_rounds: 5,
        option_count: 4,
        feedback_delay: DELAY,
        countdown: None,
    };
    let mut screen = QuizScreen::new(RunsDry, settings, reporter).unwrap();

    let pick = screen.session().round().correct_index();
    let digit = char::from_digit(pick as u32 + 1, 10).unwrap();
    screen.handle_input(key(KeyCode::Char(digit)));
    screen.update(DELAY);
    assert!(screen.is_finished());
    assert_eq!(screen.session().round().index(), 1);

    // Further ticks on the finished screen stay quiet.
    screen.update(DELAY);
    screen.update(DELAY);

    let report = rx.recv_timeout(WAIT).unwrap();
    assert_eq!(report.quest, QuestType::CompleteGames);
    assert_eq!(report.increment, 1);
    // 1 of 5 earns no stars, so nothing else is sent.
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
}
