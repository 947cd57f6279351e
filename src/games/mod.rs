pub mod capitals;
pub mod color_shape;
pub mod math;
pub mod number_match;
pub mod pattern;
pub mod quiz;
pub mod sliding;
pub mod snake;
pub mod sudoku;
pub mod word_builder;
pub mod wordle;

use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::prelude::*;

use crate::config::Config;
use crate::error::Result;
use crate::progress::ProgressReporter;

use self::quiz::QuizScreen;

/// What the host should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Stay,
    Back,
}

pub trait Game {
    fn update(&mut self, elapsed: Duration);
    fn handle_input(&mut self, key: KeyEvent) -> Nav;
    fn render(&mut self, frame: &mut Frame, area: Rect);
    fn reset(&mut self);
    fn score(&self) -> u32;
    fn is_finished(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    NumberMatch,
    Math,
    WordBuilder,
    ColorShape,
    Patterns,
    Capitals,
    Snake,
    SlidingPuzzle,
    Sudoku,
    Wordle,
}

impl GameKind {
    pub fn all() -> &'static [GameKind] {
        &[
            GameKind::NumberMatch,
            GameKind::Math,
            GameKind::WordBuilder,
            GameKind::ColorShape,
            GameKind::Patterns,
            GameKind::Capitals,
            GameKind::Snake,
            GameKind::SlidingPuzzle,
            GameKind::Sudoku,
            GameKind::Wordle,
        ]
    }

    pub fn slug(self) -> &'static str {
        match self {
            GameKind::NumberMatch => "number-match",
            GameKind::Math => "math",
            GameKind::WordBuilder => "word-builder",
            GameKind::ColorShape => "color-shape",
            GameKind::Patterns => "patterns",
            GameKind::Capitals => "capitals",
            GameKind::Snake => "snake",
            GameKind::SlidingPuzzle => "sliding-puzzle",
            GameKind::Sudoku => "sudoku",
            GameKind::Wordle => "wordle",
        }
    }

    pub fn from_slug(slug: &str) -> Option<GameKind> {
        GameKind::all().iter().copied().find(|k| k.slug().eq_ignore_ascii_case(slug))
    }

    pub fn name(self) -> &'static str {
        match self {
            GameKind::NumberMatch => "Numbers",
            GameKind::Math => "Math",
            GameKind::WordBuilder => "Words",
            GameKind::ColorShape => "Colors",
            GameKind::Patterns => "Patterns",
            GameKind::Capitals => "Capitals",
            GameKind::Snake => "Snake",
            GameKind::SlidingPuzzle => "Slider",
            GameKind::Sudoku => "Sudoku",
            GameKind::Wordle => "Wordle",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            GameKind::NumberMatch => "🔢",
            GameKind::Math => "➕",
            GameKind::WordBuilder => "🔤",
            GameKind::ColorShape => "🎨",
            GameKind::Patterns => "🧩",
            GameKind::Capitals => "🌍",
            GameKind::Snake => "🐍",
            GameKind::SlidingPuzzle => "🔲",
            GameKind::Sudoku => "🔳",
            GameKind::Wordle => "📝",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GameKind::NumberMatch => "Count the dots,\nfind the number!",
            GameKind::Math => "Add and subtract\nbefore time runs out!",
            GameKind::WordBuilder => "Fill in the\nmissing letter!",
            GameKind::ColorShape => "Spot the right\ncolor and shape!",
            GameKind::Patterns => "What comes\nnext?",
            GameKind::Capitals => "Match countries\nto capitals!",
            GameKind::Snake => "Eat apples,\ndon't bite yourself!",
            GameKind::SlidingPuzzle => "Slide the tiles\ninto order!",
            GameKind::Sudoku => "Fill every row,\ncolumn and box!",
            GameKind::Wordle => "Guess the word\nin six tries!",
        }
    }

    pub fn color(self) -> Color {
        match self {
            GameKind::NumberMatch => Color::Rgb(255, 180, 60),
            GameKind::Math => Color::Rgb(80, 200, 255),
            GameKind::WordBuilder => Color::Rgb(200, 120, 255),
            GameKind::ColorShape => Color::Rgb(255, 110, 150),
            GameKind::Patterns => Color::Rgb(120, 220, 120),
            GameKind::Capitals => Color::Rgb(90, 170, 255),
            GameKind::Snake => Color::Rgb(80, 220, 80),
            GameKind::SlidingPuzzle => Color::Rgb(220, 200, 80),
            GameKind::Sudoku => Color::Rgb(150, 170, 255),
            GameKind::Wordle => Color::Rgb(120, 200, 120),
        }
    }

    /// Quizzes played against a per-round countdown.
    pub fn is_timed(self) -> bool {
        matches!(self, GameKind::Math | GameKind::Capitals)
    }

    /// Timed games where time left on the clock adds points.
    pub fn has_time_bonus(self) -> bool {
        self == GameKind::Math
    }

    /// Build a fresh screen for this game. The caller owns it until the
    /// player leaves.
    pub fn launch(self, config: &Config, reporter: &ProgressReporter) -> Result<Box<dyn Game>> {
        log::info!("launching {}", self.slug());
        let settings = config.session_settings(self.is_timed());
        let reporter = reporter.clone();
        let screen: Box<dyn Game> = match self {
            GameKind::NumberMatch => {
                Box::new(QuizScreen::new(number_match::NumberMatch::default(), settings, reporter)?)
            }
            GameKind::Math => Box::new(QuizScreen::new(math::MathQuiz::default(), settings, reporter)?),
            GameKind::WordBuilder => {
                Box::new(QuizScreen::new(word_builder::WordBuilder::default(), settings, reporter)?)
            }
            GameKind::ColorShape => {
                Box::new(QuizScreen::new(color_shape::ColorShape, settings, reporter)?)
            }
            GameKind::Patterns => Box::new(QuizScreen::new(pattern::Patterns, settings, reporter)?),
            GameKind::Capitals => Box::new(QuizScreen::new(capitals::Capitals, settings, reporter)?),
            GameKind::Snake => Box::new(snake::Snake::new()),
            GameKind::SlidingPuzzle => Box::new(sliding::SlidingPuzzle::new(reporter)),
            GameKind::Sudoku => Box::new(sudoku::Sudoku::new(reporter)),
            GameKind::Wordle => Box::new(wordle::Wordle::new(reporter)),
        };
        Ok(screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip() {
        for kind in GameKind::all() {
            assert_eq!(GameKind::from_slug(kind.slug()), Some(*kind));
        }
        assert_eq!(GameKind::from_slug("WORDLE"), Some(GameKind::Wordle));
        assert_eq!(GameKind::from_slug("pinball"), None);
    }

    #[test]
    fn every_game_launches_with_defaults() {
        let config = Config::default();
        let reporter = ProgressReporter::disabled(config.player.clone());
        for kind in GameKind::all() {
            let game = kind.launch(&config, &reporter).unwrap();
            assert!(!game.is_finished(), "{} starts finished", kind.slug());
            assert_eq!(game.score(), 0);
        }
    }

    #[test]
    fn time_bonus_matches_scoring() {
        use crate::round::Quiz;
        let left = Some(Duration::from_secs(6));
        assert!(math::MathQuiz::default().points(left) > math::MathQuiz::default().points(None));
        assert_eq!(capitals::Capitals.points(left), capitals::Capitals.points(None));

        for kind in GameKind::all() {
            assert!(!kind.has_time_bonus() || kind.is_timed(), "{} has a bonus without a clock", kind.slug());
        }
        assert!(GameKind::Math.has_time_bonus());
        assert!(!GameKind::Capitals.has_time_bonus());
    }
}
