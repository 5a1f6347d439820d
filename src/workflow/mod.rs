pub mod item_ctx;
pub mod submission_flow;

pub use item_ctx::ItemCtx;
pub use submission_flow::{ItemOutcome, Stage, SubmissionFlow};
