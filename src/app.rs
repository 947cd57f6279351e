use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::Config;
use crate::games::{Game, GameKind, Nav};
use crate::progress::ProgressReporter;

pub const TILES_PER_ROW: usize = 5;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tab {
    Home,
    Play(GameKind),
}

impl Tab {
    pub fn all() -> Vec<Tab> {
        std::iter::once(Tab::Home)
            .chain(GameKind::all().iter().map(|k| Tab::Play(*k)))
            .collect()
    }

    pub fn title(&self) -> String {
        match self {
            Tab::Home => " 🏠 Home ".to_string(),
            Tab::Play(kind) => format!(" {} {} ", kind.icon(), kind.name()),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Play(kind) => GameKind::all().iter().position(|k| k == kind).map_or(0, |i| i + 1),
        }
    }
}

/// Score of the running game, as shown in the tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Standing {
    pub kind: GameKind,
    pub score: u32,
    pub finished: bool,
}

pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    pub selected_game: usize,
    /// The running game. Dropped when the player leaves it.
    pub screen: Option<Box<dyn Game>>,
    pub notice: Option<String>,
    /// Whether the running game was over at the last tick.
    finished: bool,
    config: Config,
    reporter: ProgressReporter,
}

impl App {
    pub fn new(config: Config, reporter: ProgressReporter) -> Self {
        Self {
            should_quit: false,
            current_tab: Tab::Home,
            selected_game: 0,
            screen: None,
            notice: None,
            finished: false,
            config,
            reporter,
        }
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        let Some(screen) = self.screen.as_mut() else { return };
        screen.update(elapsed);

        let finished = screen.is_finished();
        if finished && !self.finished {
            if let Tab::Play(kind) = self.current_tab {
                log::info!("{} finished with score {}", kind.slug(), screen.score());
            }
        }
        self.finished = finished;
    }

    pub fn standing(&self) -> Option<Standing> {
        match (self.current_tab, self.screen.as_ref()) {
            (Tab::Play(kind), Some(screen)) => Some(Standing {
                kind,
                score: screen.score(),
                finished: screen.is_finished(),
            }),
            _ => None,
        }
    }

    /// Start `kind` from scratch, discarding whatever was running.
    pub fn open(&mut self, kind: GameKind) {
        self.screen = None;
        self.finished = false;
        match kind.launch(&self.config, &self.reporter) {
            Ok(screen) => {
                self.screen = Some(screen);
                self.current_tab = Tab::Play(kind);
                self.notice = None;
                if let Some(idx) = GameKind::all().iter().position(|k| *k == kind) {
                    self.selected_game = idx;
                }
            }
            Err(err) => {
                log::error!("could not start {}: {err}", kind.slug());
                self.notice = Some(format!("Couldn't start {}: {err}", kind.name()));
                self.current_tab = Tab::Home;
            }
        }
    }

    pub fn go_home(&mut self) {
        self.screen = None;
        self.finished = false;
        self.current_tab = Tab::Home;
    }

    fn show_tab(&mut self, tab: Tab) {
        match tab {
            Tab::Home => self.go_home(),
            Tab::Play(kind) => self.open(kind),
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.prev_tab();
                } else {
                    self.next_tab();
                }
                return;
            }
            KeyCode::BackTab => {
                self.prev_tab();
                return;
            }
            _ => {}
        }

        if matches!(self.current_tab, Tab::Home) {
            self.on_home_key(key);
            return;
        }

        // Forward to active game
        let nav = match self.screen.as_mut() {
            Some(screen) => screen.handle_input(key),
            None => Nav::Back,
        };
        if nav == Nav::Back {
            self.go_home();
        }
    }

    fn on_home_key(&mut self, key: KeyEvent) {
        let games = GameKind::all();
        let count = games.len();
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(c) if c.is_ascii_digit() => {
                // 1-9 then 0 for the tenth tile
                let idx = match c.to_digit(10) {
                    Some(0) => 9,
                    Some(d) => d as usize - 1,
                    None => return,
                };
                if let Some(kind) = games.get(idx) {
                    self.open(*kind);
                }
            }
            KeyCode::Right => self.selected_game = (self.selected_game + 1) % count,
            KeyCode::Left => self.selected_game = (self.selected_game + count - 1) % count,
            KeyCode::Down | KeyCode::Up => {
                self.selected_game = (self.selected_game + TILES_PER_ROW) % (TILES_PER_ROW * 2);
                self.selected_game = self.selected_game.min(count - 1);
            }
            KeyCode::Enter => {
                if let Some(kind) = games.get(self.selected_game) {
                    self.open(*kind);
                }
            }
            _ => {}
        }
    }

    fn next_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.show_tab(tabs[(idx + 1) % tabs.len()]);
    }

    fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.show_tab(tabs[(idx + tabs.len() - 1) % tabs.len()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    fn app() -> App {
        let config = Config::default();
        let reporter = ProgressReporter::disabled(config.player.clone());
        App::new(config, reporter)
    }

    #[test]
    fn enter_launches_selected_game_and_esc_disposes_it() {
        let mut app = app();
        app.on_key(key(KeyCode::Right));
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.current_tab, Tab::Play(GameKind::Math));
        assert!(app.screen.is_some());

        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.current_tab, Tab::Home);
        assert!(app.screen.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn digit_shortcuts_cover_all_tiles() {
        let mut app = app();
        app.on_key(key(KeyCode::Char('0')));
        assert_eq!(app.current_tab, Tab::Play(GameKind::Wordle));
        app.go_home();
        app.on_key(key(KeyCode::Char('7')));
        assert_eq!(app.current_tab, Tab::Play(GameKind::Snake));
    }

    #[test]
    fn tab_cycles_through_games_and_home() {
        let mut app = app();
        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.current_tab, Tab::Play(GameKind::NumberMatch));
        app.on_key(key(KeyCode::BackTab));
        assert_eq!(app.current_tab, Tab::Home);
        assert!(app.screen.is_none());
        app.on_key(key(KeyCode::BackTab));
        assert_eq!(app.current_tab, Tab::Play(GameKind::Wordle));
    }

    #[test]
    fn vertical_moves_stay_on_the_grid() {
        let mut app = app();
        app.on_key(key(KeyCode::Down));
        assert_eq!(app.selected_game, 5);
        app.on_key(key(KeyCode::Up));
        assert_eq!(app.selected_game, 0);
    }

    #[test]
    fn launch_failure_stays_home_with_notice() {
        let mut config = Config::default();
        config.quiz.option_count = 40;
        let reporter = ProgressReporter::disabled(config.player.clone());
        let mut app = App::new(config, reporter);
        app.open(GameKind::NumberMatch);
        assert_eq!(app.current_tab, Tab::Home);
        assert!(app.screen.is_none());
        assert!(app.notice.is_some());
    }

    #[test]
    fn standing_follows_the_running_game() {
        let mut config = Config::default();
        config.quiz.total_rounds = 1;
        config.quiz.feedback_delay_ms = 10;
        let reporter = ProgressReporter::disabled(config.player.clone());
        let mut app = App::new(config, reporter);
        assert_eq!(app.standing(), None);

        app.open(GameKind::NumberMatch);
        let standing = app.standing().unwrap();
        assert_eq!(standing.kind, GameKind::NumberMatch);
        assert!(!standing.finished);

        app.on_key(key(KeyCode::Char('1')));
        app.on_tick(Duration::from_millis(20));
        assert!(app.standing().unwrap().finished);
        assert!(app.finished);

        // Play Again from the completion dialog starts a fresh game.
        app.on_key(key(KeyCode::Enter));
        app.on_tick(Duration::from_millis(1));
        assert_eq!(app.standing().unwrap().score, 0);
        assert!(!app.finished);

        app.go_home();
        assert_eq!(app.standing(), None);
    }

    #[test]
    fn q_quits_from_home() {
        let mut app = app();
        app.on_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
