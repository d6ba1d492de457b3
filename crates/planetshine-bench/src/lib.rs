pub mod renderer;
pub mod report;
pub mod runner;
pub mod scenes;
