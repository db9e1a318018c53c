pub mod program;
pub mod agent;
pub mod arena;
pub mod report;
pub mod error;
