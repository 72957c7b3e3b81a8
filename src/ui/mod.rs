//! Terminal UI components.

mod spinner;
mod style;

pub use spinner::Spinner;
pub use style::Style;
