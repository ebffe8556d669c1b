//! Run loops for each scheduled flow.
//!
//! Each job owns its collaborators as trait objects and produces a small
//! summary struct for the caller to log or assert on. Selection logic stays
//! in `sampling` and `ranking`; everything here is orchestration: loading,
//! per-record validation, idempotency checks, and structured logging.

pub mod daily;
pub mod sms;
pub mod train;

pub use daily::{DailyRecsJob, RunOutcome, RunSummary};
pub use sms::{SmsRecJob, SmsRunSummary};
pub use train::{TrainJob, TrainSummary};
