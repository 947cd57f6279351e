//! Round-based quiz core shared by every quiz game.
//!
//! A game supplies a [`Quiz`]: a content generator plus a correctness
//! predicate. [`GameSession`] drives it through
//! `AwaitingInput -> ShowingFeedback -> (AwaitingInput | Complete)` with
//! cooperative timers advanced by the host's tick.

pub mod sampling;
mod session;
pub mod tier;
pub mod timer;

use std::fmt;
use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

pub use session::{Feedback, GameSession, SessionEvent, SessionSettings, Summary};
pub use tier::Tier;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("content domain exhausted: needed {needed} distinct options, found {found}")]
    DomainExhausted { needed: usize, found: usize },

    #[error("prompt must have exactly one correct option, found {matching}")]
    AmbiguousOptions { matching: usize },
}

/// A game's content generator and correctness predicate.
pub trait Quiz {
    type Content: Clone + PartialEq + fmt::Debug;
    type Answer: Clone + PartialEq + fmt::Debug;

    /// Produce the next prompt. `previous` is the last round's content, for
    /// games that avoid immediate repeats.
    fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        option_count: usize,
        previous: Option<&Self::Content>,
    ) -> Result<Prompt<Self::Content, Self::Answer>, GenerationError>;

    fn is_correct(&self, content: &Self::Content, answer: &Self::Answer) -> bool;

    /// Points for a correct answer. `remaining` is the countdown left when
    /// the answer landed, for timed games.
    fn points(&self, _remaining: Option<Duration>) -> u32 {
        1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prompt<C, A> {
    pub content: C,
    pub options: Vec<A>,
}

impl<C, A> Prompt<C, A> {
    /// Build a prompt from the correct answer and its distractors, shuffled
    /// for display.
    pub fn shuffled<R: Rng + ?Sized>(content: C, correct: A, distractors: Vec<A>, rng: &mut R) -> Self {
        let mut options = Vec::with_capacity(distractors.len() + 1);
        options.push(correct);
        options.extend(distractors);
        options.shuffle(rng);
        Self { content, options }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingInput,
    ShowingFeedback,
    Complete,
}

/// One question within a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Round<C, A> {
    index: u32,
    total: u32,
    content: C,
    options: Vec<A>,
    correct: usize,
}

impl<C, A> Round<C, A> {
    /// Checks that exactly one option satisfies `is_correct`.
    pub fn new(
        index: u32,
        total: u32,
        prompt: Prompt<C, A>,
        is_correct: impl Fn(&C, &A) -> bool,
    ) -> Result<Self, GenerationError> {
        let matching: Vec<usize> = prompt
            .options
            .iter()
            .enumerate()
            .filter(|(_, a)| is_correct(&prompt.content, a))
            .map(|(i, _)| i)
            .collect();
        if matching.len() != 1 {
            return Err(GenerationError::AmbiguousOptions { matching: matching.len() });
        }
        Ok(Self {
            index,
            total,
            content: prompt.content,
            options: prompt.options,
            correct: matching[0],
        })
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn options(&self) -> &[A] {
        &self.options
    }

    pub fn correct_index(&self) -> usize {
        self.correct
    }

    pub fn correct_option(&self) -> &A {
        &self.options[self.correct]
    }

    pub fn is_last(&self) -> bool {
        self.index >= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_finds_the_single_correct_option() {
        let prompt = Prompt { content: 7u32, options: vec![3, 7, 9, 12] };
        let round = Round::new(1, 10, prompt, |c, a| c == a).unwrap();
        assert_eq!(round.correct_index(), 1);
        assert_eq!(*round.correct_option(), 7);
        assert!(!round.is_last());
    }

    #[test]
    fn round_rejects_zero_or_many_correct_options() {
        let none = Prompt { content: 5u32, options: vec![1, 2, 3] };
        assert_eq!(
            Round::new(1, 3, none, |c, a| c == a).unwrap_err(),
            GenerationError::AmbiguousOptions { matching: 0 }
        );

        let twice = Prompt { content: 5u32, options: vec![5, 2, 5] };
        assert_eq!(
            Round::new(1, 3, twice, |c, a| c == a).unwrap_err(),
            GenerationError::AmbiguousOptions { matching: 2 }
        );
    }
}
