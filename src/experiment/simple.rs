//! Declarative experiment - one producer per letter-named side

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, warn};

use super::{fmt_experiment, requested_side, validate_name, AbTest, Letter, Producer};
use crate::selector::{RandomSelector, Selector};
use crate::{Error, Result};

/// Experiment with letter-named sides `A`..=`Z`, each bound to a producer.
///
/// Any subset of letters may be declared; they need not be contiguous. The
/// registry is fixed once built.
///
/// # Example
///
/// ```rust
/// use simple_ab::{AbTest, SimpleAb};
///
/// let mut test = SimpleAb::builder("MyTest")
///     .side('A', || "Side A")
///     .side('B', || "Side B")
///     .side('C', || "Side C")
///     .build()?;
///
/// assert_eq!(test.test(Some("C"))?, "Side C");
/// assert_eq!(test.current_side(), Some("C"));
/// # Ok::<(), simple_ab::Error>(())
/// ```
pub struct SimpleAb<T> {
    name: String,
    sides: BTreeMap<Letter, Producer<T>>,
    selector: Box<dyn Selector>,
    current_side: Option<Letter>,
}

impl<T> SimpleAb<T> {
    /// Create a builder.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> SimpleAbBuilder<T> {
        SimpleAbBuilder::new(name)
    }

    /// Declared letters, in alphabetical order.
    #[must_use]
    pub fn letters(&self) -> Vec<Letter> {
        self.sides.keys().copied().collect()
    }
}

impl<T> AbTest for SimpleAb<T> {
    type Output = T;

    fn name(&self) -> &str {
        &self.name
    }

    fn allowed_sides(&self) -> Vec<&str> {
        self.sides.keys().map(|letter| letter.as_str()).collect()
    }

    fn current_side(&self) -> Option<&str> {
        self.current_side.map(Letter::as_str)
    }

    /// Resolve one side and invoke its producer.
    ///
    /// A requested name that is not a single letter `A`..=`Z` is an
    /// [`Error::UnknownSide`]; a letter with no registered producer is
    /// [`Error::SideNotImplemented`].
    fn test(&mut self, force_side: Option<&str>) -> Result<T> {
        let requested = requested_side(&*self.selector, &self.allowed_sides(), force_side)?;

        let letter: Letter = requested.parse().map_err(|_| Error::UnknownSide {
            test: self.name.clone(),
            side: requested.clone(),
        })?;

        let Some(producer) = self.sides.get(&letter) else {
            if force_side.is_none() {
                warn!(test = %self.name, side = %letter, "selector returned undeclared side");
            }
            return Err(Error::SideNotImplemented {
                test: self.name.clone(),
                side: requested,
            });
        };

        let value = producer();
        debug!(test = %self.name, side = %letter, forced = force_side.is_some(), "resolved side");
        self.current_side = Some(letter);
        Ok(value)
    }
}

impl<T> fmt::Display for SimpleAb<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_experiment(f, "SimpleAb", &self.name, &self.allowed_sides())
    }
}

impl<T> fmt::Debug for SimpleAb<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleAb")
            .field("name", &self.name)
            .field("sides", &self.allowed_sides())
            .field("current_side", &self.current_side())
            .finish_non_exhaustive()
    }
}

/// Builder for `SimpleAb`.
///
/// Letters are validated in [`build`](SimpleAbBuilder::build), so
/// `side('A', ..)` and `side("A", ..)` are both accepted here.
pub struct SimpleAbBuilder<T> {
    name: String,
    sides: Vec<(String, Producer<T>)>,
    selector: Option<Box<dyn Selector>>,
}

impl<T> SimpleAbBuilder<T> {
    /// Create a new builder with the experiment name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sides: Vec::new(),
            selector: None,
        }
    }

    /// Register the producer for `letter`.
    #[must_use]
    pub fn side<L, F>(mut self, letter: L, f: F) -> Self
    where
        L: ToString,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let producer: Producer<T> = Box::new(f);
        self.sides.push((letter.to_string(), producer));
        self
    }

    /// Set the selection strategy (default: uniform random).
    #[must_use]
    pub fn selector<S: Selector + 'static>(mut self, selector: S) -> Self {
        self.selector = Some(Box::new(selector));
        self
    }

    /// Validate and build the `SimpleAb`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the name is blank, no side is
    /// registered, a key is not a letter `A`..=`Z`, or a letter repeats.
    pub fn build(self) -> Result<SimpleAb<T>> {
        let name = validate_name(self.name)?;

        let mut sides = BTreeMap::new();
        for (key, producer) in self.sides {
            let letter: Letter = key.parse()?;
            if sides.insert(letter, producer).is_some() {
                return Err(Error::DuplicateSide { test: name, side: key });
            }
        }

        if sides.is_empty() {
            return Err(Error::NoSides { test: name });
        }

        Ok(SimpleAb {
            name,
            sides,
            selector: self
                .selector
                .unwrap_or_else(|| Box::new(RandomSelector::new())),
            current_side: None,
        })
    }
}

/// Declare a [`SimpleAb`] with its sides colocated.
///
/// Each body is re-evaluated on every resolution of its side.
///
/// ```rust
/// use simple_ab::{simple_ab, AbTest};
///
/// let mut test = simple_ab!("MyTest" => {
///     A => "Side A",
///     B => "Side B",
/// })?;
///
/// assert_eq!(test.test(Some("B"))?, "Side B");
/// assert_eq!(test.allowed_sides(), ["A", "B"]);
/// # Ok::<(), simple_ab::Error>(())
/// ```
///
/// A selector may follow the sides:
///
/// ```rust
/// use simple_ab::selector::FixedSelector;
/// use simple_ab::{simple_ab, AbTest};
///
/// let mut test = simple_ab!("Pinned" => { A => 1, B => 2 }, FixedSelector::new("A"))?;
/// assert_eq!(test.test(None)?, 1);
/// # Ok::<(), simple_ab::Error>(())
/// ```
#[macro_export]
macro_rules! simple_ab {
    ($name:expr => { $($letter:ident => $body:expr),+ $(,)? } $(, $selector:expr)?) => {
        $crate::SimpleAb::builder($name)
            $(.side(stringify!($letter), move || $body))+
            $(.selector($selector))?
            .build()
    };
}
