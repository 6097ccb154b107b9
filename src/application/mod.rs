// Application layer - use cases over the bill store.
// Validation happens here before anything is written; the CLI and tests
// only talk to `BillService`.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
