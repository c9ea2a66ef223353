//! Change classification: raw change sets and their edit summaries.
//!
//! Everything in this module is a pure function of its inputs; calling it
//! twice yields identical output. Memoization lives in
//! [`RecordView`](crate::view::RecordView), not here.

pub mod change_set;
pub mod edit_summary;
pub mod embedded;

pub use change_set::change_set;
pub use edit_summary::edit_summary;
pub use embedded::embedded_delta;
