//! Gallery view: searchable, filterable roster list.
//!
//! A filter bar (free-text search plus three cycling categorical filters)
//! over a scrollable list of character rows. The filter re-evaluates on
//! every keystroke; Enter on a row opens the detail view.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::catalog::{Catalog, CatalogSet};
use crate::core::filter::RosterFilter;
use crate::core::model::Character;

use super::super::theme;

/// Outcome of gallery input handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryResult {
    Consumed,
    /// Open the detail view for this character id.
    Open(String),
}

pub struct GalleryState {
    pub filter: RosterFilter,
    /// Index into the filtered list.
    pub selected: usize,
    /// Whether keystrokes go to the search input.
    pub search_focused: bool,
    scroll: usize,
}

impl GalleryState {
    pub fn new() -> Self {
        Self {
            filter: RosterFilter::default(),
            selected: 0,
            search_focused: false,
            scroll: 0,
        }
    }

    /// The currently visible (filtered) roster.
    pub fn visible<'a>(&self, roster: &'a [Character]) -> Vec<&'a Character> {
        self.filter.apply(roster)
    }

    /// Keep selection inside the filtered list after a filter change.
    fn clamp_selection(&mut self, visible_len: usize) {
        if visible_len == 0 {
            self.selected = 0;
        } else if self.selected >= visible_len {
            self.selected = visible_len - 1;
        }
    }

    pub fn handle_input(
        &mut self,
        event: &Event,
        roster: &[Character],
        catalogs: &CatalogSet,
    ) -> Option<GalleryResult> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        if self.search_focused {
            // Ctrl chords (force quit, reload) stay global even while typing.
            if modifiers.contains(KeyModifiers::CONTROL) {
                return None;
            }
            match code {
                KeyCode::Esc | KeyCode::Enter => self.search_focused = false,
                KeyCode::Backspace => {
                    self.filter.query.pop();
                    self.clamp_selection(self.visible(roster).len());
                }
                KeyCode::Char(c)
                    if *modifiers == KeyModifiers::NONE
                        || *modifiers == KeyModifiers::SHIFT =>
                {
                    self.filter.query.push(*c);
                    self.clamp_selection(self.visible(roster).len());
                }
                _ => {}
            }
            return Some(GalleryResult::Consumed);
        }

        let shift = modifiers.contains(KeyModifiers::SHIFT);
        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('/')) => {
                self.search_focused = true;
            }
            (KeyModifiers::NONE, KeyCode::Char('j')) | (KeyModifiers::NONE, KeyCode::Down) => {
                let len = self.visible(roster).len();
                if len > 0 && self.selected + 1 < len {
                    self.selected += 1;
                }
            }
            (KeyModifiers::NONE, KeyCode::Char('k')) | (KeyModifiers::NONE, KeyCode::Up) => {
                self.selected = self.selected.saturating_sub(1);
            }
            (KeyModifiers::NONE, KeyCode::Char('g')) => {
                self.selected = 0;
            }
            (KeyModifiers::SHIFT, KeyCode::Char('G')) => {
                self.selected = self.visible(roster).len().saturating_sub(1);
            }
            // Plain/shifted only: Ctrl chords (reload, force quit) stay global.
            (KeyModifiers::NONE, KeyCode::Char('s'))
            | (KeyModifiers::SHIFT, KeyCode::Char('S')) => {
                self.filter.school = cycle(&self.filter.school, &catalogs.schools, shift);
                self.clamp_selection(self.visible(roster).len());
            }
            (KeyModifiers::NONE, KeyCode::Char('p'))
            | (KeyModifiers::SHIFT, KeyCode::Char('P')) => {
                self.filter.position = cycle(&self.filter.position, &catalogs.positions, shift);
                self.clamp_selection(self.visible(roster).len());
            }
            (KeyModifiers::NONE, KeyCode::Char('r'))
            | (KeyModifiers::SHIFT, KeyCode::Char('R')) => {
                self.filter.rarity = cycle(&self.filter.rarity, &catalogs.rarities, shift);
                self.clamp_selection(self.visible(roster).len());
            }
            (KeyModifiers::NONE, KeyCode::Char('c')) => {
                self.filter.clear();
                self.selected = 0;
            }
            (KeyModifiers::NONE, KeyCode::Enter) => {
                let visible = self.visible(roster);
                if let Some(ch) = visible.get(self.selected) {
                    return Some(GalleryResult::Open(ch.id.clone()));
                }
            }
            _ => return None,
        }
        Some(GalleryResult::Consumed)
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        roster: &[Character],
        catalogs: &CatalogSet,
    ) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Filter bar
            Constraint::Min(1),    // Roster list
        ])
        .split(area);

        let visible = self.visible(roster);
        self.clamp_selection(visible.len());

        self.render_filter_bar(frame, chunks[0], visible.len(), catalogs);
        self.render_roster(frame, chunks[1], &visible, catalogs);
    }

    fn render_filter_bar(
        &self,
        frame: &mut Frame,
        area: Rect,
        result_count: usize,
        catalogs: &CatalogSet,
    ) {
        let block = if self.search_focused {
            theme::block_focused("Filtros")
        } else {
            theme::block_default("Filtros")
        };
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let query_style = if self.search_focused {
            Style::default().fg(theme::ACCENT)
        } else {
            Style::default().fg(theme::TEXT)
        };
        let cursor = if self.search_focused { "▏" } else { "" };

        let filter_label = |label: &str, value: &str, catalog: &Catalog| {
            let display = if value.is_empty() {
                "todas".to_string()
            } else {
                catalog.name(value).unwrap_or(value).to_string()
            };
            format!("{label}:{display}")
        };

        let line = Line::from(vec![
            Span::styled(" Buscar: ", theme::muted()),
            Span::styled(format!("{}{cursor}", self.filter.query), query_style),
            Span::raw("  "),
            Span::styled(
                filter_label("[s]Escuela", &self.filter.school, &catalogs.schools),
                if self.filter.school.is_empty() { theme::dim() } else { theme::highlight() },
            ),
            Span::raw(" "),
            Span::styled(
                filter_label("[p]Posición", &self.filter.position, &catalogs.positions),
                if self.filter.position.is_empty() { theme::dim() } else { theme::highlight() },
            ),
            Span::raw(" "),
            Span::styled(
                filter_label("[r]Rareza", &self.filter.rarity, &catalogs.rarities),
                if self.filter.rarity.is_empty() { theme::dim() } else { theme::highlight() },
            ),
            Span::raw("  "),
            Span::styled(format!("{result_count} resultados"), theme::muted()),
        ]);

        frame.render_widget(Paragraph::new(line), inner);
    }

    fn render_roster(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        visible: &[&Character],
        catalogs: &CatalogSet,
    ) {
        let block = theme::block_default("Personajes");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if visible.is_empty() {
            frame.render_widget(
                Paragraph::new(vec![
                    Line::raw(""),
                    Line::from(Span::styled("No hay resultados", theme::muted())),
                    Line::raw(""),
                    Line::from(Span::styled(
                        "Pulsa 'c' para limpiar los filtros",
                        theme::dim(),
                    )),
                ])
                .alignment(Alignment::Center),
                inner,
            );
            return;
        }

        // Keep the selected row inside the viewport.
        let height = inner.height as usize;
        if height > 0 {
            if self.selected < self.scroll {
                self.scroll = self.selected;
            } else if self.selected >= self.scroll + height {
                self.scroll = self.selected - height + 1;
            }
        }

        let lines: Vec<Line> = visible
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(height)
            .map(|(i, ch)| self.roster_row(i, ch, catalogs))
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }

    /// One roster row: marker, rarity, name, kanji, school/position,
    /// specialty names. Dangling catalog references are omitted.
    fn roster_row(&self, index: usize, ch: &Character, catalogs: &CatalogSet) -> Line<'static> {
        let is_selected = index == self.selected;
        let marker = if is_selected { "▸ " } else { "  " };
        let name_style = if is_selected {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::TEXT)
        };

        let mut spans = vec![Span::styled(marker.to_string(), name_style)];

        if let Some(rarity) = catalogs.rarities.name(&ch.rarity) {
            spans.push(Span::styled(
                format!("[{rarity}] "),
                Style::default().fg(theme::PRIMARY_LIGHT),
            ));
        }

        spans.push(Span::styled(ch.name.clone(), name_style));

        if let Some(kanji) = &ch.name_kanji {
            spans.push(Span::styled(format!(" {kanji}"), theme::dim()));
        }

        let mut info: Vec<String> = Vec::new();
        if let Some(school) = catalogs.schools.name(&ch.school) {
            info.push(school.to_string());
        }
        if let Some(position) = catalogs.positions.name(&ch.position) {
            info.push(position.to_string());
        }
        if !info.is_empty() {
            spans.push(Span::styled(
                format!("  {}", info.join(" · ")),
                theme::muted(),
            ));
        }

        let specialties = catalogs.specialty_names(&ch.specialties);
        if !specialties.is_empty() {
            spans.push(Span::styled(
                format!("  ⟨{}⟩", specialties.join(", ")),
                theme::dim(),
            ));
        }

        Line::from(spans)
    }
}

/// Cycle a categorical filter through "" followed by the catalog ids,
/// in catalog order. `reverse` walks backwards.
fn cycle(current: &str, catalog: &Catalog, reverse: bool) -> String {
    let mut options: Vec<&str> = vec![""];
    options.extend(catalog.ids());

    let idx = options.iter().position(|&id| id == current).unwrap_or(0);
    let len = options.len();
    let next = if reverse {
        (idx + len - 1) % len
    } else {
        (idx + 1) % len
    };
    options[next].to_string()
}
