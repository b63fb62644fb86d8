//! Application state for the Atrium shell.
//!
//! [`App`] owns everything the components share: the resolved shell inputs,
//! the router, the shortcut hub and the per-component states. Components get
//! `&mut App` in their handlers and report navigation back as effects.

use atrium_registry::{Dictionary, ModuleRegistry, ShellInputs};
use atrium_types::{Effect, Msg, Router};
use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::router::HistoryRouter;
use crate::shortcuts::ShortcutHub;
use crate::ui::components::header::HeaderState;
use crate::ui::components::nav_rail::NavRailState;
use crate::ui::components::palette::PaletteState;
use crate::ui::theme::Theme;

/// Whether the shell has finished its first render.
///
/// Global listeners are attached only once the shell is `Active`; shortcuts
/// pressed while `Initializing` reach nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShellPhase {
    #[default]
    Initializing,
    Active,
}

/// Cross-cutting context owned by the App.
#[derive(Debug)]
pub struct SharedCtx {
    pub app_name: String,
    pub registry: ModuleRegistry,
    pub dictionary: Dictionary,
    pub theme: Box<dyn Theme>,
}

#[derive(Debug)]
pub struct App {
    pub ctx: SharedCtx,
    pub phase: ShellPhase,
    pub router: HistoryRouter,
    pub shortcuts: ShortcutHub,
    pub nav_rail: NavRailState,
    pub header: HeaderState,
    pub palette: PaletteState,
    pub focus: Focus,
    root_focus: FocusFlag,
}

impl App {
    pub fn new(inputs: ShellInputs, theme: Box<dyn Theme>) -> Self {
        let ShellInputs {
            app_name,
            registry,
            dictionary,
            initial_path,
        } = inputs;
        let mut app = Self {
            ctx: SharedCtx {
                app_name,
                registry,
                dictionary,
                theme,
            },
            phase: ShellPhase::Initializing,
            router: HistoryRouter::new(initial_path),
            shortcuts: ShortcutHub::new(),
            nav_rail: NavRailState::new(),
            header: HeaderState::new(),
            palette: PaletteState::new(),
            focus: Focus::default(),
            root_focus: FocusFlag::named("atrium"),
        };
        app.refresh_navigation();
        app.focus = FocusBuilder::build_for(&app);
        app
    }

    /// Leaves `Initializing` and mounts the global listeners. Calling it
    /// again has no effect.
    pub fn activate(&mut self) {
        if self.phase == ShellPhase::Active {
            return;
        }
        self.phase = ShellPhase::Active;
        self.palette.mount(&self.shortcuts);
        debug!("shell active");
    }

    /// Unmounts the global listeners before the shell goes away.
    pub fn deactivate(&mut self) {
        self.palette.unmount();
    }

    /// Moves the router and recomputes the rail for the new location.
    /// Returns `false` when `path` is already the current location.
    pub fn navigate(&mut self, path: &str) -> bool {
        if path == self.router.location() {
            debug!(location = %path, "already at location");
            return false;
        }
        self.router.navigate_to(path);
        self.refresh_navigation();
        true
    }

    pub fn refresh_navigation(&mut self) {
        self.nav_rail
            .refresh(&self.ctx.registry, &self.ctx.dictionary, self.router.location());
    }

    /// Clears every focus flag outside the palette.
    pub fn clear_shell_focus(&self) {
        let rail = &self.nav_rail;
        rail.container_focus.set(false);
        rail.toggle_focus.set(false);
        rail.item_focus_flags.iter().for_each(|flag| flag.set(false));
        self.header.container_focus.set(false);
        self.header.f_search.set(false);
    }

    /// Applies an application-level message to shared state.
    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::Shortcut(action) => self.palette.handle_shortcut(*action),
            Msg::RouteChanged(location) => {
                info!(location = %location, "route changed");
            }
            Msg::Resize(width, height) => {
                debug!(width, height, "terminal resized");
            }
        }
        Vec::new()
    }
}

impl HasFocus for App {
    /// While the palette is open it is the only focus target.
    fn build(&self, builder: &mut FocusBuilder) {
        if self.palette.is_open() {
            builder.widget(&self.palette);
            return;
        }
        builder.widget(&self.nav_rail);
        builder.widget(&self.header);
    }

    fn focus(&self) -> FocusFlag {
        self.root_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}
