pub mod app;
pub mod events;
pub mod theme;
pub mod ui;
pub mod views;

pub use app::App;
