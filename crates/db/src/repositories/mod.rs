//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod prompt_style_repo;
pub mod scenario_repo;

pub use prompt_style_repo::PromptStyleRepo;
pub use scenario_repo::ScenarioRepo;
