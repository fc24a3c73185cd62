//! Events and navigation types flowing through the Elm-architecture loop.

use crate::core::catalog::WorldSnapshot;

/// Events consumed by the main event loop.
#[derive(Debug)]
pub enum AppEvent {
    /// Periodic tick for notification TTLs.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// Result of a (re)load of catalogs + roster.
    WorldLoaded(WorldSnapshot),
    /// Notification to display to the user.
    Notification(Notification),
    /// Request to quit the application.
    Quit,
}

/// High-level actions dispatched by the global input mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ShowHelp,
    CloseHelp,
    /// Re-fetch catalogs and roster from the data source.
    Reload,
    /// Leave the detail view, back to the gallery.
    Back,
}

/// Detail-view tabs. Exactly one is active at a time; transitions happen
/// only on explicit user selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailTab {
    Profile,
    Stats,
    Abilities,
    Resonances,
    Memory,
    Bonds,
}

impl DetailTab {
    pub const ALL: [DetailTab; 6] = [
        DetailTab::Profile,
        DetailTab::Stats,
        DetailTab::Abilities,
        DetailTab::Resonances,
        DetailTab::Memory,
        DetailTab::Bonds,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DetailTab::Profile => "Perfil",
            DetailTab::Stats => "Stats",
            DetailTab::Abilities => "Habilidades",
            DetailTab::Resonances => "Resonancias",
            DetailTab::Memory => "Recuerdo",
            DetailTab::Bonds => "Vínculos",
        }
    }

    pub fn next(self) -> DetailTab {
        let idx = DetailTab::ALL.iter().position(|&t| t == self).unwrap_or(0);
        DetailTab::ALL[(idx + 1) % DetailTab::ALL.len()]
    }

    pub fn prev(self) -> DetailTab {
        let idx = DetailTab::ALL.iter().position(|&t| t == self).unwrap_or(0);
        DetailTab::ALL[(idx + DetailTab::ALL.len() - 1) % DetailTab::ALL.len()]
    }

    /// Tab for a number-row key (1-6).
    pub fn from_index(idx: usize) -> Option<DetailTab> {
        DetailTab::ALL.get(idx).copied()
    }
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}
