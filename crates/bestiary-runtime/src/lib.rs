//! A small event loop for terminal dashboards built on ratatui.
//!
//! Applications implement [`App`], or build on [`ScreenStack`] and implement
//! [`Screen`] for each full-screen view. Frames are drawn only after a screen
//! asks for a redraw or the terminal is resized.

pub use self::{
    app::App,
    event_loop::RenderMode,
    runtime::Runtime,
    screen::{Screen, ScreenStack, ScreenTransition},
};

mod app;
mod event;
mod event_loop;
mod runtime;
mod screen;
