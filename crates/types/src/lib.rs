//! Types shared between the registry, the terminal shell and the CLI.

pub mod modules;

pub use modules::{ModuleDescriptor, ModuleId, ParseModuleIdError};

/// Actions a global keyboard shortcut can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutAction {
    /// Open the command palette, or dismiss it when it is already open.
    TogglePalette,
}

/// Messages that can be sent to update the application state.
///
/// This enum defines the system events that can trigger state changes in the
/// shell outside of raw key and mouse input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Terminal resized
    Resize(u16, u16),
    /// A global shortcut fired and was consumed by the shortcut hub
    Shortcut(ShortcutAction),
    /// The router moved to a new location
    RouteChanged(String),
}

/// Side effects that can be triggered by state changes.
///
/// Components never navigate directly; they return effects and the runtime
/// applies them after the event handler has returned, so component state is
/// already settled when the router observes the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the router bridge to move to the given location
    Navigate(String),
    /// Leave the shell
    Quit,
}

/// The capability every page transition goes through.
///
/// Navigation is fire-and-forget: callers neither await nor retry it.
pub trait Router {
    fn navigate_to(&mut self, path: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingRouter {
        calls: Vec<String>,
    }

    impl Router for RecordingRouter {
        fn navigate_to(&mut self, path: &str) {
            self.calls.push(path.to_string());
        }
    }

    #[test]
    fn router_is_object_safe() {
        let mut recording = RecordingRouter::default();
        {
            let router: &mut dyn Router = &mut recording;
            router.navigate_to("/crm");
        }
        assert_eq!(recording.calls, vec!["/crm".to_string()]);
    }
}
