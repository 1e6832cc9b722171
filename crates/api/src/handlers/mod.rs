pub mod prompt_styles;
pub mod prompts;
pub mod scenarios;
pub mod session;
