mod error;
pub mod reporting;
mod service;

pub use error::AppError;
pub use service::PlannerService;
