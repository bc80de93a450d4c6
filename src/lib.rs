//! pathwise: self-paced learning pathways with ordered unlocks, lazily
//! generated lessons and completion awards.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{RuntimeOptions, open};
pub use app::commands::ask::QuestionOutcome;
pub use app::commands::complete::{CompletionOutcome, CompletionReport};
pub use app::commands::list::PathwaySummary;
pub use app::commands::show::{ModuleView, PathwayView};
pub use app::{AppContext, Services};
pub use domain::AppError;
