pub mod audit;
pub mod config;
pub mod export;
pub mod gemini;
pub mod history;
pub mod message;
pub mod orchestrator;
pub mod paths;
pub mod settings;
pub mod share;
pub mod store;
pub mod summary;
pub mod util;
pub mod video;
