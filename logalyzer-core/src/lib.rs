pub mod analysis;
pub mod app;
pub mod cli;
pub mod conf;
pub mod discover;
pub mod logging;
pub mod render;
pub mod state;
