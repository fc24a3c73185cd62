//! Character detail view: a tabbed state machine.
//!
//! One tab is active at a time (Profile first); transitions happen only on
//! explicit selection. Each tab renders independently, so a level or grade
//! change only touches its own tab's content. The memory tab keeps a cached
//! chart model that is torn down and rebuilt on every grade change.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::core::catalog::CatalogSet;
use crate::core::model::{AbilityKind, Bond, BondKind, Character, Grade, Memory};
use crate::core::prefs::PreferenceStore;

use super::super::events::DetailTab;
use super::super::theme;
use super::super::widgets::StatBars;

/// Base-stat chart scale.
const STATS_SCALE: u32 = 2000;
/// Memory stats-boost chart scale.
const BOOST_SCALE: u32 = 1000;

/// Outcome of detail input handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailResult {
    Consumed,
    /// Leave the detail view.
    Back,
}

/// Cached chart model for the memory tab. Rebuilt from scratch whenever
/// the selected grade changes so stale chart state never leaks across
/// grade selections.
#[derive(Debug, Clone)]
struct BoostChartModel {
    grade: Grade,
    deltas: [(&'static str, u32); 6],
}

impl BoostChartModel {
    fn build(memory: &Memory, grade: Grade) -> Self {
        Self {
            grade,
            deltas: memory.stats_boost.labeled(),
        }
    }
}

pub struct DetailState {
    pub character_id: String,
    pub tab: DetailTab,
    /// Cursor into the character's ability list (abilities tab).
    pub ability_cursor: usize,
    /// Cursor into the associated-bonds list (bonds tab).
    pub bond_cursor: usize,
    memory_chart: Option<BoostChartModel>,
}

impl DetailState {
    /// Open the detail view for a character, restoring the persisted
    /// memory grade into the chart model.
    pub fn open(character: &Character, prefs: &PreferenceStore) -> Self {
        let memory_chart = character
            .memory
            .as_ref()
            .map(|memory| BoostChartModel::build(memory, prefs.memory_grade(&character.id)));

        Self {
            character_id: character.id.clone(),
            tab: DetailTab::Profile,
            ability_cursor: 0,
            bond_cursor: 0,
            memory_chart,
        }
    }

    /// Tear down and rebuild the memory chart for the current grade.
    fn rebuild_memory_chart(&mut self, character: &Character, grade: Grade) {
        self.memory_chart = None;
        if let Some(memory) = &character.memory {
            self.memory_chart = Some(BoostChartModel::build(memory, grade));
        }
    }

    pub fn handle_input(
        &mut self,
        event: &Event,
        character: &Character,
        catalogs: &CatalogSet,
        prefs: &mut PreferenceStore,
    ) -> Option<DetailResult> {
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
            (KeyModifiers::NONE, KeyCode::Esc) => return Some(DetailResult::Back),
            (KeyModifiers::NONE, KeyCode::Tab) => self.tab = self.tab.next(),
            (KeyModifiers::SHIFT, KeyCode::BackTab) | (KeyModifiers::NONE, KeyCode::BackTab) => {
                self.tab = self.tab.prev();
            }
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='6')) => {
                if let Some(tab) = DetailTab::from_index(c as usize - '1' as usize) {
                    self.tab = tab;
                }
            }
            (KeyModifiers::NONE, KeyCode::Char('j')) | (KeyModifiers::NONE, KeyCode::Down) => {
                self.move_cursor(character, catalogs, 1);
            }
            (KeyModifiers::NONE, KeyCode::Char('k')) | (KeyModifiers::NONE, KeyCode::Up) => {
                self.move_cursor(character, catalogs, -1);
            }
            (KeyModifiers::NONE, KeyCode::Left | KeyCode::Char('h')) => {
                self.adjust_selection(character, prefs, -1);
            }
            (KeyModifiers::NONE, KeyCode::Right | KeyCode::Char('l')) => {
                self.adjust_selection(character, prefs, 1);
            }
            _ => return None,
        }
        Some(DetailResult::Consumed)
    }

    fn move_cursor(&mut self, character: &Character, catalogs: &CatalogSet, delta: i32) {
        match self.tab {
            DetailTab::Abilities => {
                let len = character.abilities.len();
                self.ability_cursor = step(self.ability_cursor, len, delta);
            }
            DetailTab::Bonds => {
                let len = catalogs.bonds_for(&character.id).len();
                self.bond_cursor = step(self.bond_cursor, len, delta);
            }
            _ => {}
        }
    }

    /// Left/Right semantics per tab: ability level on the abilities tab,
    /// memory grade on the memory tab. Both write through immediately.
    fn adjust_selection(
        &mut self,
        character: &Character,
        prefs: &mut PreferenceStore,
        delta: i32,
    ) {
        match self.tab {
            DetailTab::Abilities => {
                let Some(ability) = character.abilities.get(self.ability_cursor) else {
                    return;
                };
                let current = ability.clamp_level(prefs.ability_level(&character.id, &ability.id));
                let target = if delta < 0 {
                    current.saturating_sub(1)
                } else {
                    current.saturating_add(1)
                };
                let target = ability.clamp_level(target);
                if target != current {
                    prefs.set_ability_level(&character.id, &ability.id, target);
                }
            }
            DetailTab::Memory => {
                if character.memory.is_none() {
                    return;
                }
                let current = prefs.memory_grade(&character.id);
                let target = if delta < 0 { current.prev() } else { current.next() };
                if target != current {
                    prefs.set_memory_grade(&character.id, target);
                    self.rebuild_memory_chart(character, target);
                }
            }
            _ => {}
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        character: &Character,
        catalogs: &CatalogSet,
        prefs: &PreferenceStore,
    ) {
        let chunks = Layout::vertical([
            Constraint::Length(2), // Tab bar
            Constraint::Min(1),    // Tab content
        ])
        .split(area);

        self.render_tab_bar(frame, chunks[0], character);

        match self.tab {
            DetailTab::Profile => self.render_profile(frame, chunks[1], character, catalogs),
            DetailTab::Stats => self.render_stats(frame, chunks[1], character),
            DetailTab::Abilities => {
                self.render_abilities(frame, chunks[1], character, prefs);
            }
            DetailTab::Resonances => self.render_resonances(frame, chunks[1], character),
            DetailTab::Memory => {
                self.render_memory(frame, chunks[1], character, catalogs, prefs);
            }
            DetailTab::Bonds => self.render_bonds(frame, chunks[1], character, catalogs),
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect, character: &Character) {
        let mut spans = vec![Span::styled(
            format!(" {} ", character.name),
            theme::title(),
        )];
        spans.push(Span::raw(" "));

        for (i, tab) in DetailTab::ALL.iter().enumerate() {
            let style = if *tab == self.tab {
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                theme::muted()
            };
            spans.push(Span::styled(format!(" {}:{} ", i + 1, tab.label()), style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_profile(
        &self,
        frame: &mut Frame,
        area: Rect,
        character: &Character,
        catalogs: &CatalogSet,
    ) {
        let block = theme::block_default(DetailTab::Profile.label());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::raw("")];
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(character.name.clone(), theme::title()),
            Span::styled(
                character
                    .name_kanji
                    .as_ref()
                    .map(|k| format!("  {k}"))
                    .unwrap_or_default(),
                theme::muted(),
            ),
        ]));
        lines.push(Line::raw(""));

        // Dangling catalog references are silently omitted.
        let labeled = [
            ("Rareza", catalogs.rarities.name(&character.rarity)),
            ("Escuela", catalogs.schools.name(&character.school)),
            ("Posición", catalogs.positions.name(&character.position)),
        ];
        for (label, value) in labeled {
            if let Some(value) = value {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {label:<12}"), theme::muted()),
                    Span::styled(value.to_string(), Style::default().fg(theme::TEXT)),
                ]));
            }
        }

        let specialties = catalogs.specialty_names(&character.specialties);
        if !specialties.is_empty() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<12}", "Especialidades"), theme::muted()),
                Span::styled(
                    specialties.join(", "),
                    Style::default().fg(theme::PRIMARY_LIGHT),
                ),
            ]));
        }

        if !character.image_profile.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(
                format!("  {}", character.image_profile),
                theme::dim(),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect, character: &Character) {
        let block = theme::block_default(DetailTab::Stats.label());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).split(inner);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" Stats base (escala 0-{STATS_SCALE})"),
                theme::heading(),
            ))),
            chunks[0],
        );

        let entries = character.stats.labeled();
        frame.render_widget(StatBars::new(&entries, STATS_SCALE), chunks[1]);
    }

    fn render_abilities(
        &self,
        frame: &mut Frame,
        area: Rect,
        character: &Character,
        prefs: &PreferenceStore,
    ) {
        let block = theme::block_default(DetailTab::Abilities.label());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if character.abilities.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "No hay habilidades disponibles",
                    theme::muted(),
                )))
                .alignment(Alignment::Center),
                inner,
            );
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        let mut cursor_line = 0usize;

        for (i, ability) in character.abilities.iter().enumerate() {
            let is_current = i == self.ability_cursor;
            if is_current {
                cursor_line = lines.len();
            }
            let level = ability.clamp_level(prefs.ability_level(&character.id, &ability.id));

            // Header: marker, name, tags.
            let marker = if is_current { "▸ " } else { "  " };
            let name_style = match (is_current, ability.kind) {
                (_, AbilityKind::Ultimate) => theme::ultimate_tag(),
                (true, _) => theme::highlight(),
                (false, _) => Style::default().fg(theme::TEXT),
            };
            let mut header = vec![
                Span::styled(marker.to_string(), theme::highlight()),
                Span::styled(ability.display_name().to_string(), name_style),
            ];
            for tag in &ability.tags {
                let tag_style = if tag == "Definitiva" {
                    theme::ultimate_tag()
                } else {
                    theme::dim()
                };
                header.push(Span::styled(format!("  [{tag}]"), tag_style));
            }
            lines.push(Line::from(header));

            // Level selector: Nivel: 1 2 [3] 4 5
            let mut selector = vec![Span::styled("    Nivel: ", theme::muted())];
            for lvl in 1..=ability.max_level {
                if lvl == level {
                    selector.push(Span::styled(format!("[{lvl}]"), theme::highlight()));
                } else {
                    selector.push(Span::styled(format!(" {lvl} "), theme::dim()));
                }
            }
            lines.push(Line::from(selector));

            // Description for the selected level.
            let description = ability
                .description(level)
                .unwrap_or("Sin descripción para este nivel");
            lines.push(Line::from(Span::styled(
                format!("    {description}"),
                Style::default().fg(theme::TEXT),
            )));
            lines.push(Line::raw(""));
        }

        // Scroll so the focused ability's card is visible.
        let height = inner.height as usize;
        let scroll = if height > 0 && cursor_line + 1 > height {
            (cursor_line + 1 - height) as u16
        } else {
            0
        };

        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((scroll, 0)),
            inner,
        );
    }

    fn render_resonances(&self, frame: &mut Frame, area: Rect, character: &Character) {
        let block = theme::block_default(DetailTab::Resonances.label());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if character.resonances.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "No hay resonancias disponibles",
                    theme::muted(),
                )))
                .alignment(Alignment::Center),
                inner,
            );
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        for grade in Grade::ALL {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  Resonancia de Habilidad {grade}"),
                    theme::heading(),
                ),
                Span::styled(
                    format!("  · Nivel requerido: {}", grade.resonance_threshold()),
                    theme::dim(),
                ),
            ]));
            match character.resonances.get(&grade) {
                Some(description) => lines.push(Line::from(Span::styled(
                    format!("    {description}"),
                    Style::default().fg(theme::TEXT),
                ))),
                None => lines.push(Line::from(Span::styled("    —", theme::dim()))),
            }
            lines.push(Line::raw(""));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }

    fn render_memory(
        &self,
        frame: &mut Frame,
        area: Rect,
        character: &Character,
        catalogs: &CatalogSet,
        prefs: &PreferenceStore,
    ) {
        let block = theme::block_default(DetailTab::Memory.label());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(memory) = &character.memory else {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "No hay recuerdo disponible",
                    theme::muted(),
                )))
                .alignment(Alignment::Center),
                inner,
            );
            return;
        };

        let grade = prefs.memory_grade(&character.id);

        let chunks = Layout::vertical([
            Constraint::Length(6), // Header + grade selector + effect
            Constraint::Min(1),    // Boost chart
        ])
        .split(inner);

        let mut lines = vec![Line::from(vec![
            Span::styled(format!("  {}", memory.name), theme::title()),
            Span::styled(format!("  Nivel: {}", memory.level), theme::muted()),
        ])];

        // Grade selector: Recuerdo de Grado: [I] II III IV V
        let mut selector = vec![Span::styled("  Recuerdo de Grado: ", theme::muted())];
        for g in Grade::ALL {
            if g == grade {
                selector.push(Span::styled(format!("[{g}]"), theme::highlight()));
            } else {
                selector.push(Span::styled(format!(" {g} "), theme::dim()));
            }
        }
        lines.push(Line::from(selector));
        lines.push(Line::raw(""));

        // Exclusive effect, headed by the character's position when the
        // catalog reference resolves.
        let effect_header = match catalogs.positions.name(&character.position) {
            Some(position) => format!("  EFECTO EXCLUSIVO DE {}", position.to_uppercase()),
            None => "  EFECTO EXCLUSIVO".to_string(),
        };
        lines.push(Line::from(Span::styled(effect_header, theme::heading())));
        let effect = memory
            .exclusive_effects
            .get(&grade)
            .map(String::as_str)
            .unwrap_or("—");
        lines.push(Line::from(Span::styled(
            format!("  {effect}"),
            Style::default().fg(theme::TEXT),
        )));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[0]);

        // Boost chart from the cached model; rebuilt on every grade change.
        let boost_chunks =
            Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).split(chunks[1]);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " Mejoras de Stats",
                theme::heading(),
            ))),
            boost_chunks[0],
        );

        if let Some(chart) = self.memory_chart.as_ref().filter(|c| c.grade == grade) {
            frame.render_widget(
                StatBars::new(&chart.deltas, BOOST_SCALE).color(theme::PRIMARY_LIGHT),
                boost_chunks[1],
            );
        }
    }

    fn render_bonds(
        &self,
        frame: &mut Frame,
        area: Rect,
        character: &Character,
        catalogs: &CatalogSet,
    ) {
        let bonds = catalogs.bonds_for(&character.id);

        let block = theme::block_default(DetailTab::Bonds.label());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if bonds.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "No hay vínculos disponibles",
                    theme::muted(),
                )))
                .alignment(Alignment::Center),
                inner,
            );
            return;
        }

        let chunks = Layout::horizontal([
            Constraint::Percentage(30), // Bond list
            Constraint::Percentage(70), // Bond detail
        ])
        .split(inner);

        let cursor = self.bond_cursor.min(bonds.len() - 1);

        let list_lines: Vec<Line> = bonds
            .iter()
            .enumerate()
            .map(|(i, bond)| {
                let is_selected = i == cursor;
                let marker = if is_selected { "▸ " } else { "  " };
                let style = if is_selected {
                    theme::highlight()
                } else {
                    Style::default().fg(theme::TEXT)
                };
                Line::from(Span::styled(format!("{marker}{}", bond.name), style))
            })
            .collect();
        frame.render_widget(Paragraph::new(list_lines), chunks[0]);

        self.render_bond_detail(frame, chunks[1], bonds[cursor], character);
    }

    fn render_bond_detail(
        &self,
        frame: &mut Frame,
        area: Rect,
        bond: &Bond,
        character: &Character,
    ) {
        let mut lines = vec![
            Line::from(Span::styled(format!("  {}", bond.name), theme::title())),
            Line::raw(""),
        ];

        match bond.kind {
            BondKind::Bonus => {
                lines.push(Line::from(Span::styled(
                    "  Ventaja de Atributos de Vínculo",
                    theme::heading(),
                )));
                match bond.bonus_for(&character.id) {
                    Some(levels) => {
                        for level in 1..=5u8 {
                            if let Some(text) = levels.get(&level) {
                                lines.push(Line::from(vec![
                                    Span::styled(format!("  Nivel {level}: "), theme::muted()),
                                    Span::styled(
                                        text.clone(),
                                        Style::default().fg(theme::TEXT),
                                    ),
                                ]));
                            }
                        }
                    }
                    None => lines.push(Line::from(Span::styled(
                        "  No hay bonificaciones disponibles",
                        theme::muted(),
                    ))),
                }
            }
            BondKind::Lineup => {
                lines.push(Line::from(Span::styled(
                    "  Efecto de la habilidad del vínculo",
                    theme::heading(),
                )));
                for level in 1..=5u8 {
                    if let Some(text) = bond.effects.get(&level) {
                        lines.push(Line::from(vec![
                            Span::styled(format!("  Nivel {level}: "), theme::muted()),
                            Span::styled(text.clone(), Style::default().fg(theme::TEXT)),
                        ]));
                    }
                }
            }
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
    }
}

/// Move a cursor by `delta` inside `[0, len)`, clamping at the ends.
fn step(current: usize, len: usize, delta: i32) -> usize {
    if len == 0 {
        return 0;
    }
    if delta < 0 {
        current.saturating_sub(delta.unsigned_abs() as usize)
    } else {
        (current + delta as usize).min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Ability;
    use std::collections::BTreeMap;

    fn character_with_ability(max_level: u8) -> Character {
        let mut descriptions = BTreeMap::new();
        for lvl in 1..=max_level {
            descriptions.insert(lvl, format!("nivel {lvl}"));
        }
        let json = serde_json::json!({
            "id": "oikawa-ur",
            "name": "Oikawa Tooru",
            "rarity": "ur",
            "id_school": "aobajohsai",
            "position": "colocador",
            "stats": {
                "colocacion": 1800, "saque": 1500, "recuperacion": 1100,
                "bloqueo": 900, "recepcion": 1000,
                "ataque_rapido": 1200, "ataque_poderoso": 1300
            },
            "memory": {
                "name": "Gran Rey",
                "level": 30,
                "exclusive_effects": {"I": "e1", "V": "e5"},
                "stats_boost": {
                    "colocacion": 300, "saque": 250, "recuperacion": 100,
                    "bloqueo": 50, "recepcion": 80, "remate": 200
                }
            }
        });
        let mut ch: Character = serde_json::from_value(json).unwrap();
        ch.abilities.push(Ability {
            id: "killer-serve".into(),
            name: "Killer Serve".into(),
            name_es: None,
            kind: AbilityKind::Ultimate,
            tags: vec!["Definitiva".into()],
            max_level,
            descriptions,
            icon: String::new(),
        });
        ch
    }

    fn prefs_in(dir: &std::path::Path) -> PreferenceStore {
        PreferenceStore::open(dir.join("preferences.json"))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_initial_tab_is_profile() {
        let dir = tempfile::tempdir().unwrap();
        let ch = character_with_ability(3);
        let state = DetailState::open(&ch, &prefs_in(dir.path()));
        assert_eq!(state.tab, DetailTab::Profile);
    }

    #[test]
    fn test_tab_transitions_only_on_explicit_selection() {
        let dir = tempfile::tempdir().unwrap();
        let ch = character_with_ability(3);
        let mut prefs = prefs_in(dir.path());
        let catalogs = CatalogSet::default();
        let mut state = DetailState::open(&ch, &prefs);

        state.handle_input(&key(KeyCode::Tab), &ch, &catalogs, &mut prefs);
        assert_eq!(state.tab, DetailTab::Stats);
        state.handle_input(&key(KeyCode::Char('6')), &ch, &catalogs, &mut prefs);
        assert_eq!(state.tab, DetailTab::Bonds);
        state.handle_input(&key(KeyCode::BackTab), &ch, &catalogs, &mut prefs);
        assert_eq!(state.tab, DetailTab::Memory);
    }

    #[test]
    fn test_level_changes_persist_through_store() {
        let dir = tempfile::tempdir().unwrap();
        let ch = character_with_ability(3);
        let mut prefs = prefs_in(dir.path());
        let catalogs = CatalogSet::default();
        let mut state = DetailState::open(&ch, &prefs);
        state.tab = DetailTab::Abilities;

        // Default level is 1; two steps right land on max_level 3.
        state.handle_input(&key(KeyCode::Right), &ch, &catalogs, &mut prefs);
        state.handle_input(&key(KeyCode::Right), &ch, &catalogs, &mut prefs);
        state.handle_input(&key(KeyCode::Right), &ch, &catalogs, &mut prefs);
        assert_eq!(prefs.ability_level("oikawa-ur", "killer-serve"), 3);

        // A fresh store still sees level 3.
        let reloaded = prefs_in(dir.path());
        assert_eq!(reloaded.ability_level("oikawa-ur", "killer-serve"), 3);
    }

    #[test]
    fn test_level_clamps_at_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let ch = character_with_ability(2);
        let mut prefs = prefs_in(dir.path());
        let catalogs = CatalogSet::default();
        let mut state = DetailState::open(&ch, &prefs);
        state.tab = DetailTab::Abilities;

        state.handle_input(&key(KeyCode::Left), &ch, &catalogs, &mut prefs);
        assert_eq!(prefs.ability_level("oikawa-ur", "killer-serve"), 1);
        for _ in 0..5 {
            state.handle_input(&key(KeyCode::Right), &ch, &catalogs, &mut prefs);
        }
        assert_eq!(prefs.ability_level("oikawa-ur", "killer-serve"), 2);
    }

    #[test]
    fn test_grade_change_rebuilds_chart_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let ch = character_with_ability(3);
        let mut prefs = prefs_in(dir.path());
        let catalogs = CatalogSet::default();
        let mut state = DetailState::open(&ch, &prefs);
        state.tab = DetailTab::Memory;

        assert_eq!(state.memory_chart.as_ref().unwrap().grade, Grade::I);

        state.handle_input(&key(KeyCode::Right), &ch, &catalogs, &mut prefs);
        assert_eq!(prefs.memory_grade("oikawa-ur"), Grade::II);
        assert_eq!(state.memory_chart.as_ref().unwrap().grade, Grade::II);

        // Saturates at V.
        for _ in 0..10 {
            state.handle_input(&key(KeyCode::Right), &ch, &catalogs, &mut prefs);
        }
        assert_eq!(prefs.memory_grade("oikawa-ur"), Grade::V);
        assert_eq!(state.memory_chart.as_ref().unwrap().grade, Grade::V);
    }

    #[test]
    fn test_esc_leaves_detail() {
        let dir = tempfile::tempdir().unwrap();
        let ch = character_with_ability(3);
        let mut prefs = prefs_in(dir.path());
        let catalogs = CatalogSet::default();
        let mut state = DetailState::open(&ch, &prefs);

        let result = state.handle_input(&key(KeyCode::Esc), &ch, &catalogs, &mut prefs);
        assert_eq!(result, Some(DetailResult::Back));
    }

    #[test]
    fn test_step_clamps() {
        assert_eq!(step(0, 3, -1), 0);
        assert_eq!(step(2, 3, 1), 2);
        assert_eq!(step(1, 3, 1), 2);
        assert_eq!(step(0, 0, 1), 0);
    }
}
