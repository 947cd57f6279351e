use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::timer::{Countdown, CountdownStatus, Delay};
use super::{GenerationError, Phase, Quiz, Round, Tier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub total_rounds: u32,
    pub option_count: usize,
    pub feedback_delay: Duration,
    /// Per-round time limit. `None` for untimed games.
    pub countdown: Option<Duration>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            total_rounds: 10,
            option_count: 4,
            feedback_delay: Duration::from_millis(1500),
            countdown: None,
        }
    }
}

/// How the current round was resolved. `selected` is `None` when the
/// countdown ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub selected: Option<usize>,
    pub correct: bool,
    pub points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub score: u32,
    pub correct: u32,
    pub total: u32,
    pub tier: Tier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Answered(Feedback),
    TimedOut,
    RoundStarted(u32),
    Completed(Summary),
}

// Only one timer can be armed: the countdown while awaiting input, the
// feedback delay while showing feedback.
#[derive(Debug, Clone, Copy)]
enum Timer {
    Countdown(Countdown),
    Feedback(Delay),
}

/// One play-through of a quiz, owned by its screen.
pub struct GameSession<Q: Quiz, R: Rng = StdRng> {
    quiz: Q,
    rng: R,
    settings: SessionSettings,
    round: Round<Q::Content, Q::Answer>,
    phase: Phase,
    score: u32,
    correct: u32,
    feedback: Option<Feedback>,
    timer: Option<Timer>,
}

impl<Q: Quiz> GameSession<Q, StdRng> {
    pub fn with_entropy(quiz: Q, settings: SessionSettings) -> Result<Self, GenerationError> {
        Self::new(quiz, settings, StdRng::from_entropy())
    }
}

impl<Q: Quiz, R: Rng> GameSession<Q, R> {
    pub fn new(quiz: Q, mut settings: SessionSettings, mut rng: R) -> Result<Self, GenerationError> {
        settings.total_rounds = settings.total_rounds.max(1);
        let round = Self::make_round(&quiz, &mut rng, &settings, 1, None)?;
        log::debug!(
            "session started: {} rounds, {} options",
            settings.total_rounds,
            settings.option_count
        );
        Ok(Self {
            timer: settings.countdown.map(|d| Timer::Countdown(Countdown::new(d))),
            quiz,
            rng,
            settings,
            round,
            phase: Phase::AwaitingInput,
            score: 0,
            correct: 0,
            feedback: None,
        })
    }

    fn make_round(
        quiz: &Q,
        rng: &mut R,
        settings: &SessionSettings,
        index: u32,
        previous: Option<&Q::Content>,
    ) -> Result<Round<Q::Content, Q::Answer>, GenerationError> {
        let prompt = quiz.generate(rng, settings.option_count, previous)?;
        Round::new(index, settings.total_rounds, prompt, |c, a| quiz.is_correct(c, a))
    }

    pub fn quiz(&self) -> &Q {
        &self.quiz
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn round(&self) -> &Round<Q::Content, Q::Answer> {
        &self.round
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn correct_answers(&self) -> u32 {
        self.correct
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    pub fn selected(&self) -> Option<usize> {
        self.feedback.and_then(|f| f.selected)
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        match &self.timer {
            Some(Timer::Countdown(c)) => Some(c),
            _ => None,
        }
    }

    pub fn feedback_remaining(&self) -> Option<Duration> {
        match &self.timer {
            Some(Timer::Feedback(d)) => Some(d.remaining()),
            _ => None,
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            score: self.score,
            correct: self.correct,
            total: self.settings.total_rounds,
            tier: Tier::from_score(self.correct, self.settings.total_rounds),
        }
    }

    /// Answer the current round. Ignored unless awaiting input.
    pub fn select(&mut self, option: usize) -> Option<SessionEvent> {
        if self.phase != Phase::AwaitingInput {
            return None;
        }
        let answer = self.round.options().get(option)?;
        let correct = self.quiz.is_correct(self.round.content(), answer);
        let points = if correct {
            self.quiz.points(self.countdown().map(|c| c.remaining()))
        } else {
            0
        };
        self.score += points;
        if correct {
            self.correct += 1;
        }
        let feedback = Feedback { selected: Some(option), correct, points };
        log::debug!(
            "round {}/{}: option {} {}",
            self.round.index(),
            self.round.total(),
            option,
            if correct { "correct" } else { "wrong" }
        );
        self.show_feedback(feedback);
        Some(SessionEvent::Answered(feedback))
    }

    /// Advance the armed timer by `elapsed`.
    pub fn tick(&mut self, elapsed: Duration) -> Option<SessionEvent> {
        match self.timer.as_mut()? {
            Timer::Countdown(countdown) => {
                if self.phase != Phase::AwaitingInput {
                    return None;
                }
                match countdown.advance(elapsed) {
                    CountdownStatus::Running { .. } => None,
                    CountdownStatus::Expired => {
                        log::debug!("round {}/{}: time up", self.round.index(), self.round.total());
                        self.show_feedback(Feedback { selected: None, correct: false, points: 0 });
                        Some(SessionEvent::TimedOut)
                    }
                }
            }
            Timer::Feedback(delay) => {
                if self.phase != Phase::ShowingFeedback || !delay.advance(elapsed) {
                    return None;
                }
                Some(self.advance_round())
            }
        }
    }

    /// Start over at round one with fresh content.
    pub fn play_again(&mut self) -> Result<(), GenerationError> {
        let round = Self::make_round(&self.quiz, &mut self.rng, &self.settings, 1, None)?;
        self.round = round;
        self.phase = Phase::AwaitingInput;
        self.score = 0;
        self.correct = 0;
        self.feedback = None;
        self.timer = self.settings.countdown.map(|d| Timer::Countdown(Countdown::new(d)));
        log::debug!("session restarted");
        Ok(())
    }

    fn show_feedback(&mut self, feedback: Feedback) {
        self.feedback = Some(feedback);
        self.phase = Phase::ShowingFeedback;
        self.timer = Some(Timer::Feedback(Delay::new(self.settings.feedback_delay)));
    }

    fn advance_round(&mut self) -> SessionEvent {
        self.timer = None;
        if self.round.is_last() {
            return self.complete();
        }
        let next = self.round.index() + 1;
        match Self::make_round(&self.quiz, &mut self.rng, &self.settings, next, Some(self.round.content())) {
            Ok(round) => {
                self.round = round;
                self.feedback = None;
                self.phase = Phase::AwaitingInput;
                self.timer = self.settings.countdown.map(|d| Timer::Countdown(Countdown::new(d)));
                SessionEvent::RoundStarted(next)
            }
            Err(err) => {
                log::error!("could not generate round {next}: {err}");
                self.complete()
            }
        }
    }

    fn complete(&mut self) -> SessionEvent {
        self.phase = Phase::Complete;
        self.timer = None;
        let summary = self.summary();
        log::info!(
            "session complete: {}/{} correct, score {}, {} stars",
            summary.correct,
            summary.total,
            summary.score,
            summary.tier.stars()
        );
        SessionEvent::Completed(summary)
    }
}
