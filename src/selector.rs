//! Side selection strategies
//!
//! A [`Selector`] decides which side an experiment resolves to when no side
//! is forced. The declared side names are handed to the strategy so the
//! default [`RandomSelector`] can choose among them; custom strategies are
//! free to ignore them.
//!
//! ```rust
//! use simple_ab::selector::{self, FixedSelector, RandomSelector, Selector};
//!
//! let sides = ["A", "B"];
//! assert!(sides.contains(&RandomSelector::new().select(&sides)?.as_str()));
//! assert_eq!(FixedSelector::new("B").select(&sides)?, "B");
//! assert_eq!(selector::from_fn(|| "A").select(&sides)?, "A");
//! # Ok::<(), simple_ab::Error>(())
//! ```

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::StrategyError;
use crate::{Error, Result};

/// Strategy for choosing a side name.
pub trait Selector: Send + Sync {
    /// Return the name of the side to use.
    ///
    /// The returned name is validated by the experiment: a name outside
    /// `sides` is reported as a lookup failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Strategy`] (or any other error) when the strategy
    /// itself cannot produce a choice.
    fn select(&self, sides: &[&str]) -> Result<String>;
}

impl<S: Selector + ?Sized> Selector for Box<S> {
    fn select(&self, sides: &[&str]) -> Result<String> {
        (**self).select(sides)
    }
}

/// Uniform random choice among the declared sides.
///
/// Uses the thread-local generator seeded from the host's default entropy
/// source. Not cryptographically secure; use [`RandomSelector::seeded`] for
/// reproducible sequences.
#[derive(Debug, Default)]
pub struct RandomSelector {
    rng: Option<Mutex<StdRng>>,
}

impl RandomSelector {
    /// Create a selector backed by `rand::thread_rng()`.
    #[must_use]
    pub const fn new() -> Self {
        Self { rng: None }
    }

    /// Create a selector with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }
}

impl Selector for RandomSelector {
    fn select(&self, sides: &[&str]) -> Result<String> {
        let choice = match &self.rng {
            None => sides.choose(&mut rand::thread_rng()),
            Some(rng) => {
                let mut rng = rng
                    .lock()
                    .map_err(|_| Error::strategy("seeded random selector lock poisoned"))?;
                sides.choose(&mut *rng)
            }
        };

        choice
            .map(|side| (*side).to_string())
            .ok_or_else(|| Error::strategy("no candidate sides to choose from"))
    }
}

/// Always selects the same side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSelector {
    side: String,
}

impl FixedSelector {
    /// Create a selector pinned to `side`.
    #[must_use]
    pub fn new(side: impl Into<String>) -> Self {
        Self { side: side.into() }
    }

    /// The pinned side name.
    #[must_use]
    pub fn side(&self) -> &str {
        &self.side
    }
}

impl Selector for FixedSelector {
    fn select(&self, _sides: &[&str]) -> Result<String> {
        Ok(self.side.clone())
    }
}

/// Adapter returned by [`from_fn`].
pub struct FnSelector<F> {
    f: F,
}

impl<F, S> Selector for FnSelector<F>
where
    F: Fn() -> S + Send + Sync,
    S: Into<String>,
{
    fn select(&self, _sides: &[&str]) -> Result<String> {
        Ok((self.f)().into())
    }
}

/// Adapter returned by [`try_from_fn`].
pub struct TryFnSelector<F> {
    f: F,
}

impl<F, S, E> Selector for TryFnSelector<F>
where
    F: Fn() -> std::result::Result<S, E> + Send + Sync,
    S: Into<String>,
    E: Into<StrategyError>,
{
    fn select(&self, _sides: &[&str]) -> Result<String> {
        (self.f)().map(Into::into).map_err(Error::strategy)
    }
}

/// Use an infallible zero-argument closure as a selector.
pub const fn from_fn<F, S>(f: F) -> FnSelector<F>
where
    F: Fn() -> S + Send + Sync,
    S: Into<String>,
{
    FnSelector { f }
}

/// Use a fallible zero-argument closure as a selector.
///
/// Errors returned by the closure surface as [`Error::Strategy`].
pub const fn try_from_fn<F, S, E>(f: F) -> TryFnSelector<F>
where
    F: Fn() -> std::result::Result<S, E> + Send + Sync,
    S: Into<String>,
    E: Into<StrategyError>,
{
    TryFnSelector { f }
}
