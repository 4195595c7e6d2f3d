//! Configurable experiment - sides supplied as an explicit mapping

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, warn};

use super::{fmt_experiment, requested_side, validate_name, AbTest, Side, SideName};
use crate::selector::{RandomSelector, Selector};
use crate::{Error, Result};

/// Experiment whose sides are a name to [`Side`] mapping.
///
/// Sides are kept in a `BTreeMap`, so enumeration and display are sorted by
/// side name. When no selector is configured the side is chosen uniformly at
/// random.
///
/// # Example
///
/// ```rust
/// use simple_ab::selector::FixedSelector;
/// use simple_ab::{AbTest, ConfigurableAb};
///
/// let mut test = ConfigurableAb::builder("checkout-button")
///     .literal("A", "green")
///     .literal("B", "blue")
///     .selector(FixedSelector::new("B"))
///     .build()?;
///
/// assert_eq!(test.test(None)?, "blue");
/// assert_eq!(test.current_side(), Some("B"));
/// # Ok::<(), simple_ab::Error>(())
/// ```
pub struct ConfigurableAb<T> {
    name: String,
    sides: BTreeMap<SideName, Side<T>>,
    selector: Box<dyn Selector>,
    current_side: Option<SideName>,
}

impl<T> ConfigurableAb<T> {
    /// Create an experiment with the default random selector.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `name` is blank, `sides` is empty,
    /// a key is blank, or a key repeats.
    pub fn new<I, K>(name: impl Into<String>, sides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Side<T>)>,
        K: Into<String>,
    {
        Self::from_parts(name.into(), sides, None)
    }

    /// Create an experiment whose sides are all plain values.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigurableAb::new`].
    pub fn from_literals<I, K>(
        name: impl Into<String>,
        sides: I,
        selector: Option<Box<dyn Selector>>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
    {
        let sides = sides
            .into_iter()
            .map(|(key, value)| (key, Side::Literal(value)));
        Self::from_parts(name.into(), sides, selector)
    }

    /// Create an experiment with a custom selector.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigurableAb::new`].
    pub fn with_selector<I, K, S>(name: impl Into<String>, sides: I, selector: S) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Side<T>)>,
        K: Into<String>,
        S: Selector + 'static,
    {
        Self::from_parts(name.into(), sides, Some(Box::new(selector)))
    }

    /// Create a builder.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ConfigurableAbBuilder<T> {
        ConfigurableAbBuilder::new(name)
    }

    fn from_parts<I, K>(
        name: String,
        sides: I,
        selector: Option<Box<dyn Selector>>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Side<T>)>,
        K: Into<String>,
    {
        let name = validate_name(name)?;

        let mut table = BTreeMap::new();
        for (key, side) in sides {
            let key = SideName::new(key)?;
            if table.contains_key(&key) {
                return Err(Error::DuplicateSide {
                    test: name,
                    side: key.to_string(),
                });
            }
            table.insert(key, side);
        }

        if table.is_empty() {
            return Err(Error::NoSides { test: name });
        }

        Ok(Self {
            name,
            sides: table,
            selector: selector.unwrap_or_else(|| Box::new(RandomSelector::new())),
            current_side: None,
        })
    }

    /// Look up a declared side.
    #[must_use]
    pub fn side(&self, name: &str) -> Option<&Side<T>> {
        self.sides.get(name)
    }
}

impl<T: Clone> AbTest for ConfigurableAb<T> {
    type Output = T;

    fn name(&self) -> &str {
        &self.name
    }

    fn allowed_sides(&self) -> Vec<&str> {
        self.sides.keys().map(SideName::as_str).collect()
    }

    fn current_side(&self) -> Option<&str> {
        self.current_side.as_ref().map(SideName::as_str)
    }

    fn test(&mut self, force_side: Option<&str>) -> Result<T> {
        let requested = requested_side(&*self.selector, &self.allowed_sides(), force_side)?;

        let Some((key, side)) = self.sides.get_key_value(requested.as_str()) else {
            if force_side.is_none() {
                warn!(test = %self.name, side = %requested, "selector returned undeclared side");
            }
            return Err(Error::UnknownSide {
                test: self.name.clone(),
                side: requested,
            });
        };

        let key = key.clone();
        let value = side.resolve();
        debug!(test = %self.name, side = %key, forced = force_side.is_some(), "resolved side");
        self.current_side = Some(key);
        Ok(value)
    }
}

impl<T> fmt::Display for ConfigurableAb<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sides: Vec<&str> = self.sides.keys().map(SideName::as_str).collect();
        fmt_experiment(f, "ConfigurableAb", &self.name, &sides)
    }
}

impl<T> fmt::Debug for ConfigurableAb<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurableAb")
            .field("name", &self.name)
            .field("sides", &self.sides.keys().collect::<Vec<_>>())
            .field("current_side", &self.current_side)
            .finish_non_exhaustive()
    }
}

/// Builder for `ConfigurableAb`.
pub struct ConfigurableAbBuilder<T> {
    name: String,
    sides: Vec<(String, Side<T>)>,
    selector: Option<Box<dyn Selector>>,
}

impl<T> ConfigurableAbBuilder<T> {
    /// Create a new builder with the experiment name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sides: Vec::new(),
            selector: None,
        }
    }

    /// Declare a side.
    #[must_use]
    pub fn side(mut self, name: impl Into<String>, side: Side<T>) -> Self {
        self.sides.push((name.into(), side));
        self
    }

    /// Declare a side holding a plain value.
    #[must_use]
    pub fn literal(self, name: impl Into<String>, value: T) -> Self {
        self.side(name, Side::Literal(value))
    }

    /// Declare a side computed on each resolution.
    #[must_use]
    pub fn producer<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.side(name, Side::producer(f))
    }

    /// Set the selection strategy.
    #[must_use]
    pub fn selector<S: Selector + 'static>(mut self, selector: S) -> Self {
        self.selector = Some(Box::new(selector));
        self
    }

    /// Validate and build the `ConfigurableAb`.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigurableAb::new`].
    pub fn build(self) -> Result<ConfigurableAb<T>> {
        ConfigurableAb::from_parts(self.name, self.sides, self.selector)
    }
}
