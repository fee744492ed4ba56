//! Utility functions

pub mod clock;
pub mod id;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use id::{IdGenerator, UuidGenerator};
pub use validation::{validate_choices, validate_cohorts, validate_language};

#[cfg(test)]
pub use id::MockIdGenerator;
