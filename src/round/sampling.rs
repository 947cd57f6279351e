//! Bounded distractor sampling.
//!
//! Generators need `option_count - 1` distractors distinct from the correct
//! answer and from each other. Rejection sampling is capped so a domain that
//! is too small fails with [`GenerationError::DomainExhausted`] instead of
//! spinning forever. Callers that know their domain size should also check
//! it up front with [`ensure_domain`].

use rand::Rng;

use super::GenerationError;

/// Draws allowed per requested distractor before giving up.
pub const MAX_SAMPLING_ATTEMPTS: usize = 64;

/// Fails unless a domain of `domain` distinct values can fill `option_count`
/// options.
pub fn ensure_domain(domain: usize, option_count: usize) -> Result<(), GenerationError> {
    if domain < option_count {
        return Err(GenerationError::DomainExhausted { needed: option_count, found: domain });
    }
    Ok(())
}

/// Sample `count` values from `draw` that differ from `correct` and from each
/// other.
pub fn distinct<T, R, F>(rng: &mut R, correct: &T, count: usize, mut draw: F) -> Result<Vec<T>, GenerationError>
where
    T: PartialEq,
    R: Rng + ?Sized,
    F: FnMut(&mut R) -> T,
{
    let mut picked: Vec<T> = Vec::with_capacity(count);
    let budget = MAX_SAMPLING_ATTEMPTS * count.max(1);
    let mut attempts = 0;
    while picked.len() < count {
        if attempts == budget {
            return Err(GenerationError::DomainExhausted {
                needed: count + 1,
                found: picked.len() + 1,
            });
        }
        attempts += 1;
        let candidate = draw(rng);
        if candidate != *correct && !picked.contains(&candidate) {
            picked.push(candidate);
        }
    }
    Ok(picked)
}

/// Pick a new value from `draw` that differs from `previous`, if possible.
/// Falls back to the last draw when the domain only has one value.
pub fn avoid_repeat<T, R, F>(rng: &mut R, previous: Option<&T>, mut draw: F) -> T
where
    T: PartialEq,
    R: Rng + ?Sized,
    F: FnMut(&mut R) -> T,
{
    let mut value = draw(rng);
    let Some(previous) = previous else { return value };
    for _ in 0..MAX_SAMPLING_ATTEMPTS {
        if value != *previous {
            break;
        }
        value = draw(rng);
    }
    value
}
