use std::fmt;

use crossterm::event::Event;
use ratatui::Frame;

use crate::{App, Runtime};

/// Individual full-screen view in the application.
///
/// # Lifecycle
///
/// 1. **[`on_active`]** - Screen becomes the foreground screen
/// 2. **Active** - Screen handles events and draws
/// 3. **[`on_inactive`]** - Screen goes to background (Push) or is being removed
/// 4. **[`on_close`]** - Screen is being removed from the stack (Pop/Replace/Exit only)
///
/// ```text
/// on_active() ←──────────┐
///   ↓                     │
/// (Active/Foreground)     │ Child screen pops
///   ↓                     │
/// on_inactive()           │
///   ↓                     │
/// (Background) ──────────┘
///   ↓
/// on_close()  ← Only on Pop/Replace/Exit
/// ```
///
/// Screens configure the [`Runtime`] render mode in [`on_active`], so the
/// setting follows whichever screen is in front.
///
/// ```rust
/// use crossterm::event::Event;
/// use ratatui::Frame;
/// use bestiary_runtime::{RenderMode, Runtime, Screen, ScreenTransition};
///
/// #[derive(Debug)]
/// struct MyScreen {}
///
/// impl Screen for MyScreen {
///     fn on_active(&mut self, runtime: &mut Runtime) {
///         runtime.set_render_mode(RenderMode::throttled_from_rate(30.0));
///     }
///
///     fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) -> ScreenTransition {
///         runtime.request_redraw();
///         ScreenTransition::Stay
///     }
///
///     fn draw(&self, frame: &mut Frame) {}
/// }
/// ```
///
/// [`on_active`]: Self::on_active
/// [`on_inactive`]: Self::on_inactive
/// [`on_close`]: Self::on_close
pub trait Screen: fmt::Debug {
    /// Called when this screen becomes the foreground screen: at startup,
    /// when pushed, and when a child screen on top of it pops.
    fn on_active(&mut self, runtime: &mut Runtime);

    /// Called when this screen leaves the foreground, either because a screen
    /// is pushed on top of it or because it is being removed.
    fn on_inactive(&mut self, _runtime: &mut Runtime) {}

    /// Called after [`on_inactive`](Self::on_inactive) when this screen is
    /// removed from the stack. Not called on Push.
    fn on_close(&mut self, _runtime: &mut Runtime) {}

    /// Handles terminal events and returns transition.
    ///
    /// Call [`Runtime::request_redraw`] if the event changed what is shown.
    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) -> ScreenTransition;

    /// Renders the screen.
    fn draw(&self, frame: &mut Frame);
}

/// Screen transition result from event handling.
#[derive(Debug, derive_more::IsVariant)]
pub enum ScreenTransition {
    /// Stay in the current screen.
    Stay,

    /// Push a new screen on top of the current one.
    ///
    /// Current screen goes to background (`on_inactive` called).
    /// When the new screen is popped, current screen is reactivated (`on_active` called).
    Push(Box<dyn Screen>),

    /// Pop the current screen and return to the previous one.
    ///
    /// Current screen's `on_inactive` and `on_close` are called,
    /// then previous screen's `on_active` is called.
    Pop,

    /// Replace the current screen with a new one.
    ///
    /// Current screen's `on_inactive` and `on_close` are called,
    /// then new screen's `on_active` is called.
    Replace(Box<dyn Screen>),

    /// Exit the application.
    Exit,
}

/// Screen stack manager that implements App.
///
/// Every transition other than `Stay` requests a redraw.
#[derive(Debug)]
pub struct ScreenStack<'a> {
    screens: Vec<Box<dyn Screen + 'a>>,
    should_exit: bool,
}

impl<'a> ScreenStack<'a> {
    /// Creates a new screen stack with an initial screen.
    #[must_use]
    pub fn new(initial: Box<dyn Screen + 'a>) -> Self {
        Self {
            screens: vec![initial],
            should_exit: false,
        }
    }

    /// Number of screens on the stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.screens.len()
    }

    fn apply_transition(&mut self, runtime: &mut Runtime, transition: ScreenTransition) {
        match transition {
            ScreenTransition::Stay => return,

            ScreenTransition::Push(mut new_screen) => {
                if let Some(current) = self.screens.last_mut() {
                    current.on_inactive(runtime);
                }
                new_screen.on_active(runtime);
                self.screens.push(new_screen);
            }

            ScreenTransition::Pop => {
                if let Some(mut old_screen) = self.screens.pop() {
                    old_screen.on_inactive(runtime);
                    old_screen.on_close(runtime);
                }
                if let Some(prev_screen) = self.screens.last_mut() {
                    prev_screen.on_active(runtime);
                }
            }

            ScreenTransition::Replace(mut new_screen) => {
                if let Some(mut old_screen) = self.screens.pop() {
                    old_screen.on_inactive(runtime);
                    old_screen.on_close(runtime);
                }
                new_screen.on_active(runtime);
                self.screens.push(new_screen);
            }

            ScreenTransition::Exit => {
                while let Some(mut screen) = self.screens.pop() {
                    screen.on_inactive(runtime);
                    screen.on_close(runtime);
                }
                self.should_exit = true;
            }
        }
        runtime.request_redraw();
    }
}

impl App for ScreenStack<'_> {
    fn init(&mut self, runtime: &mut Runtime) {
        if let Some(screen) = self.screens.last_mut() {
            screen.on_active(runtime);
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit || self.screens.is_empty()
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        if let Some(current) = self.screens.last_mut() {
            let transition = current.handle_event(runtime, &event);
            self.apply_transition(runtime, transition);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        if let Some(current) = self.screens.last() {
            current.draw(frame);
        }
    }
}
