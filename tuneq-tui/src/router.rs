use anyhow::Result;
use ratatui::{Frame, crossterm::event::KeyCode, layout::Rect};
use strum::EnumIter;
use tuneq_core::engine::QueueEngineHandle;

use crate::{
    routes::{
        library::LibraryRoute, log::LogRoute, playback::PlaybackRoute,
        playlists::PlaylistsRoute, queue::QueueRoute,
    },
    state::AppState,
};

/// Top-level tabs shown in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, strum::Display)]
pub enum Tab {
    Playback,
    Queue,
    Library,
    Playlists,
    Log,
}

impl Tab {
    pub fn next(self) -> Tab {
        match self {
            Tab::Playback => Tab::Queue,
            Tab::Queue => Tab::Library,
            Tab::Library => Tab::Playlists,
            Tab::Playlists => Tab::Log,
            Tab::Log => Tab::Playback,
        }
    }
}

/// Trait that all routes must implement
/// This enables dynamic dispatch and polymorphic behavior
pub trait RouteHandler: std::fmt::Debug {
    /// Render this route's UI
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState);

    /// Handle keyboard input for this route
    /// Returns Ok(RouteAction) to indicate what should happen next
    fn handle_input(
        &mut self,
        key: KeyCode,
        state: &mut AppState,
        handle: &QueueEngineHandle,
    ) -> Result<RouteAction>;

    /// Tab this route belongs to
    fn tab(&self) -> Tab;

    /// Get the display name for breadcrumbs/navigation
    fn name(&self) -> &str;

    /// Optional: Called when entering this route
    fn on_enter(&mut self, _state: &mut AppState, _handle: &QueueEngineHandle) -> Result<()> {
        Ok(())
    }

    /// Optional: Called when leaving this route
    fn on_exit(&mut self, _state: &mut AppState, _handle: &QueueEngineHandle) -> Result<()> {
        Ok(())
    }

    /// Optional: Check if this route can be exited (for validation)
    fn can_exit(&self, _state: &AppState) -> bool {
        true
    }

    fn help_items(&self, _state: &AppState) -> Vec<(&str, &str)> {
        vec![("Tab", "Switch Tab"), ("Q", "Quit")]
    }
}

/// Actions that can be returned from route handlers
#[derive(Debug)]
pub enum RouteAction {
    /// Do nothing, stay on current route
    None,
    /// Go back to previous route
    Pop,
    /// Navigate to a new route
    Push(Box<dyn RouteHandler>),
}

/// Router manages the navigation stack
pub struct Router {
    /// Stack of route handlers, last element is current route
    stack: Vec<Box<dyn RouteHandler>>,
}

impl Router {
    pub fn new(initial_route: Box<dyn RouteHandler>) -> Self {
        Self {
            stack: vec![initial_route],
        }
    }

    /// Get current route (top of stack)
    pub fn current(&self) -> &dyn RouteHandler {
        self.stack
            .last()
            .expect("Stack should never be empty")
            .as_ref()
    }

    /// Get mutable reference to current route
    pub fn current_mut(&mut self) -> &mut Box<dyn RouteHandler> {
        self.stack.last_mut().expect("Stack should never be empty")
    }

    /// Execute a route action
    pub fn execute_action(
        &mut self,
        action: RouteAction,
        state: &mut AppState,
        handle: &QueueEngineHandle,
    ) -> Result<()> {
        match action {
            RouteAction::None => {}
            RouteAction::Pop => {
                self.pop(state, handle)?;
            }
            RouteAction::Push(route) => self.push(route, state, handle)?,
        }
        Ok(())
    }

    /// Navigate to a new route (push onto stack)
    pub fn push(
        &mut self,
        mut route: Box<dyn RouteHandler>,
        state: &mut AppState,
        handle: &QueueEngineHandle,
    ) -> Result<()> {
        route.on_enter(state, handle)?;
        self.stack.push(route);
        Ok(())
    }

    /// Go back (pop from stack)
    pub fn pop(
        &mut self,
        state: &mut AppState,
        handle: &QueueEngineHandle,
    ) -> Result<Option<Box<dyn RouteHandler>>> {
        // Keep at least one route in the stack
        if self.stack.len() > 1 {
            if let Some(current) = self.stack.last() {
                if !current.can_exit(state) {
                    return Ok(None);
                }
            }

            if let Some(mut route) = self.stack.pop() {
                route.on_exit(state, handle)?;
                return Ok(Some(route));
            }
        }
        Ok(None)
    }

    /// Clear the stack and show a tab's root route
    pub fn switch_tab(
        &mut self,
        tab: Tab,
        state: &mut AppState,
        handle: &QueueEngineHandle,
    ) -> Result<()> {
        while let Some(mut old_route) = self.stack.pop() {
            old_route.on_exit(state, handle)?;
        }
        let mut route = route_for_tab(tab);
        route.on_enter(state, handle)?;
        self.stack.push(route);
        Ok(())
    }

    /// Get the depth of navigation
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Route names from the root to the current route
    pub fn breadcrumbs(&self) -> Vec<&str> {
        self.stack.iter().map(|r| r.name()).collect()
    }
}

/// Get the root route handler for a tab
pub fn route_for_tab(tab: Tab) -> Box<dyn RouteHandler> {
    match tab {
        Tab::Playback => Box::new(PlaybackRoute),
        Tab::Queue => Box::new(QueueRoute),
        Tab::Library => Box::new(LibraryRoute::default()),
        Tab::Playlists => Box::new(PlaylistsRoute),
        Tab::Log => Box::new(LogRoute),
    }
}
