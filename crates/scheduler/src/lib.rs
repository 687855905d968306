pub mod config;
pub mod driver;
pub mod error;
pub mod session;

pub use config::SessionConfig;
pub use driver::{RunOutcome, SortDriver, TickOutcome};
pub use error::{Result, SchedulerError};
pub use session::{Advance, SortSession, SortSummary};
