//! Terminal user interface: app shell, views, widgets and theme.

pub mod app;
pub mod events;
pub mod layout;
pub mod theme;
pub mod views;
pub mod widgets;

pub use app::AppState;
pub use events::{Action, AppEvent, DetailTab};
