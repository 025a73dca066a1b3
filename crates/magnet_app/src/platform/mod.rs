mod app;
mod config;
mod console;
mod effects;
mod logging;
mod render;
#[cfg(test)]
mod test_support;

pub use app::run_app;
