//! Report composition for the Report Engine.
//!
//! The [`ReportComposer`] assembles report cards, attendance sheets and their
//! class-level batches from the records exposed through the
//! [`store`](crate::store) accessors, using the pure functions in
//! [`statistics`](crate::statistics) for every figure.

mod composer;
mod fan_out;

pub use composer::ReportComposer;
pub use fan_out::ordered_fan_out;
