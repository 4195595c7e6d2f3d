//! A/B experiments
//!
//! Two construction styles share one resolution flow:
//!
//! ```text
//! force_side? ──yes──> validate ──> evaluate side ──> current_side = side
//!      │                  ^
//!      no                 │
//!      └──> Selector ─────┘
//! ```
//!
//! - [`SimpleAb`]: letter-named producers (`A`..=`Z`) registered at
//!   definition time, through [`SimpleAb::builder`] or [`simple_ab!`](crate::simple_ab).
//! - [`ConfigurableAb`]: an explicit side-name to [`Side`] mapping plus an
//!   optional [`Selector`](crate::selector::Selector).
//!
//! ## Usage
//!
//! ```rust
//! use simple_ab::{AbTest, ConfigurableAb, Side};
//!
//! let mut test = ConfigurableAb::new(
//!     "MyTest",
//!     [("A", Side::literal("Side A")), ("B", Side::producer(|| "Side B"))],
//! )?;
//!
//! assert_eq!(test.test(Some("B"))?, "Side B");
//! assert_eq!(test.current_side(), Some("B"));
//! assert_eq!(test.to_string(), "ConfigurableAb [name: MyTest, sides: [A, B]]");
//! # Ok::<(), simple_ab::Error>(())
//! ```

mod configurable;
mod side;
mod simple;
mod summary;

pub use configurable::{ConfigurableAb, ConfigurableAbBuilder};
pub use side::{Letter, Producer, Side, SideName};
pub use simple::{SimpleAb, SimpleAbBuilder};
pub use summary::ExperimentSummary;

use std::fmt;

use crate::selector::Selector;
use crate::Result;

/// Common interface of every experiment style.
pub trait AbTest {
    /// Value produced by resolving a side.
    type Output;

    /// Experiment name.
    fn name(&self) -> &str;

    /// Declared side names, in stable (sorted) order.
    fn allowed_sides(&self) -> Vec<&str>;

    /// Side resolved by the most recent successful [`test`](AbTest::test).
    fn current_side(&self) -> Option<&str>;

    /// Resolve one side and return its value.
    ///
    /// With `force_side` the selector is bypassed. On failure
    /// `current_side` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns a lookup error when the forced or selected side is not
    /// declared, or the selector's own error.
    fn test(&mut self, force_side: Option<&str>) -> Result<Self::Output>;

    /// Serializable snapshot of the experiment.
    fn describe(&self) -> ExperimentSummary {
        ExperimentSummary::new(
            self.name(),
            self.allowed_sides().into_iter().map(str::to_string).collect(),
            self.current_side().map(str::to_string),
        )
    }
}

/// Side requested for this call: the forced one, or the selector's choice.
fn requested_side(
    selector: &dyn Selector,
    declared: &[&str],
    force_side: Option<&str>,
) -> Result<String> {
    match force_side {
        Some(side) => Ok(side.to_string()),
        None => selector.select(declared),
    }
}

fn fmt_experiment(
    f: &mut fmt::Formatter<'_>,
    kind: &str,
    name: &str,
    sides: &[&str],
) -> fmt::Result {
    write!(f, "{kind} [name: {name}, sides: [{}]]", sides.join(", "))
}

fn validate_name(name: String) -> Result<String> {
    if name.trim().is_empty() {
        return Err(crate::Error::UnnamedTest);
    }
    Ok(name)
}
