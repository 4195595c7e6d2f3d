//! # simple-ab: Minimal A/B Split Testing
//!
//! **Version**: 0.1.0
//!
//! An experiment holds a set of named sides (variants). Each call to
//! [`AbTest::test`] resolves one side, through a pluggable [`Selector`]
//! (uniform random by default) or an explicit forced side, and returns the
//! value bound to it. The resolved side is kept in
//! [`current_side`](AbTest::current_side) until the next call.
//!
//! ## Design Principles (Toyota Way Aligned)
//!
//! - **Poka-Yoke safety**: side tables are validated when built, never at use
//! - **Jidoka**: unknown sides stop the line with a lookup error, no fallback side
//! - **Muda elimination**: sides are a tagged [`Side`] value, no call-and-catch
//!
//! ## Example Usage
//!
//! ```rust
//! use simple_ab::{quick_test, AbTest, SimpleAb};
//!
//! // Declarative: letter-named producers
//! let mut test = SimpleAb::builder("MyTest")
//!     .side('A', || "Side A")
//!     .side('B', || "Side B")
//!     .build()?;
//! let value = test.test(None)?;
//! assert!(value == "Side A" || value == "Side B");
//!
//! // One-shot: configurable sides, forced choice
//! let value: &str = quick_test("T", [("A", "x"), ("B", "y")], None, Some("A"))?;
//! assert_eq!(value, "x");
//! # Ok::<(), simple_ab::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod error;
pub mod experiment;
pub mod selector;

pub use error::{Error, Result};
pub use experiment::{
    AbTest, ConfigurableAb, ConfigurableAbBuilder, ExperimentSummary, Letter, Side, SideName,
    SimpleAb, SimpleAbBuilder,
};
pub use selector::Selector;

/// Build a [`ConfigurableAb`] from plain side values, resolve it once and
/// return the value.
///
/// The experiment instance is dropped afterwards; use [`ConfigurableAb`]
/// directly to inspect `current_side`.
///
/// # Errors
///
/// Returns the configuration errors of [`ConfigurableAb::new`] and the lookup
/// or strategy errors of [`AbTest::test`].
pub fn quick_test<T, I, K>(
    name: impl Into<String>,
    sides: I,
    selector: Option<Box<dyn Selector>>,
    force_side: Option<&str>,
) -> Result<T>
where
    T: Clone,
    I: IntoIterator<Item = (K, T)>,
    K: Into<String>,
{
    ConfigurableAb::from_literals(name, sides, selector)?.test(force_side)
}
