use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::core::catalog::WorldSnapshot;
use crate::core::loader::DataLoader;
use crate::core::prefs::PreferenceStore;

use super::events::{Action, AppEvent, Notification, NotificationLevel};
use super::layout::{centered_rect, AppLayout};
use super::theme;
use super::views::detail::{DetailResult, DetailState};
use super::views::gallery::{GalleryResult, GalleryState};

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Gallery (roster browser) state; always present.
    pub gallery: GalleryState,
    /// Detail view state (Some when a character is open).
    pub detail: Option<DetailState>,
    /// Loaded catalogs + roster.
    pub world: WorldSnapshot,
    /// Per-character ability level / memory grade preferences.
    pub prefs: PreferenceStore,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Receiver for backend events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Sender for pushing events from within the app.
    event_tx: mpsc::UnboundedSender<AppEvent>,
    /// Data source handle, used by reloads.
    loader: DataLoader,
    /// Character ids to (re)load.
    roster_ids: Vec<String>,
}

impl AppState {
    pub fn new(
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
        world: WorldSnapshot,
        prefs: PreferenceStore,
        loader: DataLoader,
        roster_ids: Vec<String>,
    ) -> Self {
        Self {
            running: true,
            gallery: GalleryState::new(),
            detail: None,
            world,
            prefs,
            notifications: Vec::new(),
            notification_counter: 0,
            show_help: false,
            event_rx,
            event_tx,
            loader,
            roster_ids,
        }
    }

    /// Open the detail view for a character id. No-op if the id is not in
    /// the loaded roster.
    pub fn open_character(&mut self, id: &str) {
        if let Some(character) = self.world.character(id) {
            self.detail = Some(DetailState::open(character, &self.prefs));
        }
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        while self.running {
            // Render
            terminal.draw(|frame| self.render(frame))?;

            // Select next event
            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                // Priority 1: Help modal consumes everything while open
                if self.show_help {
                    if let Some(action) = map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                // Priority 2: Active view
                if self.dispatch_view_input(&crossterm_event) {
                    return;
                }

                // Priority 3: Global keybindings
                if let Some(action) = map_input_to_action(&crossterm_event) {
                    self.handle_action(action);
                }
            }
            AppEvent::Tick => self.on_tick(),
            AppEvent::WorldLoaded(world) => self.apply_world(world),
            AppEvent::Notification(n) => {
                self.push_notification(n.message, n.level);
            }
            AppEvent::Quit => self.running = false,
        }
    }

    /// Route input to the detail view when one is open, else the gallery.
    /// Returns true if the view consumed the event.
    fn dispatch_view_input(&mut self, event: &Event) -> bool {
        if let Some(detail) = self.detail.as_mut() {
            let id = detail.character_id.clone();
            let Some(character) = self.world.character(&id) else {
                self.detail = None;
                return false;
            };
            return match detail.handle_input(
                event,
                character,
                &self.world.catalogs,
                &mut self.prefs,
            ) {
                Some(DetailResult::Consumed) => true,
                Some(DetailResult::Back) => {
                    self.detail = None;
                    true
                }
                None => false,
            };
        }

        match self
            .gallery
            .handle_input(event, &self.world.roster, &self.world.catalogs)
        {
            Some(GalleryResult::Consumed) => true,
            Some(GalleryResult::Open(id)) => {
                self.open_character(&id);
                true
            }
            None => false,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
            Action::Back => self.detail = None,
            Action::Reload => self.spawn_reload(),
        }
    }

    /// Re-fetch catalogs and roster in the background; the result comes
    /// back through the event channel as `WorldLoaded`.
    fn spawn_reload(&mut self) {
        self.push_notification("Recargando datos…".into(), NotificationLevel::Info);

        let loader = self.loader.clone();
        let roster_ids = self.roster_ids.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let world = WorldSnapshot::load(&loader, &roster_ids).await;
            let message = format!("Datos recargados: {} personajes", world.roster.len());
            let _ = tx.send(AppEvent::WorldLoaded(world));
            let _ = tx.send(AppEvent::Notification(Notification {
                id: 0,
                message,
                level: NotificationLevel::Success,
                ttl_ticks: 100,
            }));
        });
    }

    /// Swap in a freshly loaded world. If the open character vanished from
    /// the roster, fall back to the gallery with a warning.
    fn apply_world(&mut self, world: WorldSnapshot) {
        self.world = world;

        if let Some(detail) = &self.detail {
            if self.world.character(&detail.character_id).is_none() {
                let message = format!("Personaje no encontrado: {}", detail.character_id);
                self.detail = None;
                self.push_notification(message, NotificationLevel::Warning);
            }
        }
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            message,
            level,
            ttl_ticks: 100,
        });

        while self.notifications.len() > 3 {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let layout = AppLayout::compute(area);

        match self.detail.as_ref() {
            Some(detail) => {
                if let Some(character) = self.world.character(&detail.character_id) {
                    detail.render(
                        frame,
                        layout.main,
                        character,
                        &self.world.catalogs,
                        &self.prefs,
                    );
                }
            }
            None => {
                let world = &self.world;
                self.gallery
                    .render(frame, layout.main, &world.roster, &world.catalogs);
            }
        }

        self.render_status_bar(frame, layout.status);

        // Overlays
        self.render_notifications(frame, area);
        if self.show_help {
            render_help_modal(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(" COURTSIDE ", theme::brand_badge()),
            Span::raw(" "),
        ];

        if self.detail.is_some() {
            spans.extend([
                Span::styled("Tab", theme::key_hint()),
                Span::raw(":pestaña "),
                Span::styled("1-6", theme::key_hint()),
                Span::raw(":saltar "),
                Span::styled("←/→", theme::key_hint()),
                Span::raw(":nivel/grado "),
                Span::styled("Esc", theme::key_hint()),
                Span::raw(":volver "),
            ]);
        } else {
            spans.extend([
                Span::styled("/", theme::key_hint()),
                Span::raw(":buscar "),
                Span::styled("s/p/r", theme::key_hint()),
                Span::raw(":filtros "),
                Span::styled("Enter", theme::key_hint()),
                Span::raw(":abrir "),
            ]);
        }

        spans.extend([
            Span::styled("?", theme::key_hint()),
            Span::raw(":ayuda "),
            Span::styled("Ctrl+R", theme::key_hint()),
            Span::raw(":recargar "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":salir"),
        ]);

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let y = 1;

        let notification_area = Rect::new(x, y, max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(
                        format!(" {prefix} "),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(&n.message),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }
}

/// While the help modal is open, any close key dismisses it.
fn map_help_input(event: &Event) -> Option<Action> {
    let Event::Key(KeyEvent {
        code,
        kind: KeyEventKind::Press,
        ..
    }) = event
    else {
        return None;
    };
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseHelp),
        _ => None,
    }
}

/// Global keybindings, applied only when no view consumed the input.
fn map_input_to_action(event: &Event) -> Option<Action> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        ..
    }) = event
    else {
        return None;
    };

    match (*modifiers, *code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
        (KeyModifiers::CONTROL, KeyCode::Char('r')) => Some(Action::Reload),
        (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Action::Quit),
        (KeyModifiers::NONE, KeyCode::Char('?'))
        | (KeyModifiers::SHIFT, KeyCode::Char('?')) => Some(Action::ShowHelp),
        (KeyModifiers::NONE, KeyCode::Esc) => Some(Action::Back),
        _ => None,
    }
}

fn render_help_modal(frame: &mut Frame, area: Rect) {
    let modal = centered_rect(60, 80, area);

    let keybindings = [
        ("Global:", ""),
        ("q", "Salir"),
        ("?", "Mostrar/ocultar esta ayuda"),
        ("Ctrl+R", "Recargar catálogos y personajes"),
        ("Ctrl+C", "Salida forzada"),
        ("", ""),
        ("Galería:", ""),
        ("/", "Buscar por nombre"),
        ("j/k", "Mover selección"),
        ("g / G", "Primero / último"),
        ("s / p / r", "Ciclar escuela / posición / rareza"),
        ("S / P / R", "Ciclar en sentido inverso"),
        ("c", "Limpiar todos los filtros"),
        ("Enter", "Abrir ficha del personaje"),
        ("", ""),
        ("Ficha:", ""),
        ("Tab / Shift+Tab", "Pestaña siguiente / anterior"),
        ("1-6", "Saltar a pestaña"),
        ("j/k", "Mover cursor (habilidades, vínculos)"),
        ("←/→", "Cambiar nivel de habilidad o grado"),
        ("Esc", "Volver a la galería"),
    ];

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, description)| {
            if description.is_empty() {
                Line::from(Span::styled(key.to_string(), theme::heading()))
            } else {
                Line::from(vec![
                    Span::styled(format!("  {key:<16}"), theme::key_hint()),
                    Span::raw(description.to_string()),
                ])
            }
        })
        .collect();

    frame.render_widget(Clear, modal);
    frame.render_widget(
        Paragraph::new(lines).block(theme::block_focused("Ayuda")),
        modal,
    );
}
