// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The editing session controller.
//!
//! One [`Session`] owns the workspace, the label store, the selection, the
//! active input mode and the relabel debounce. Every keyboard affordance is
//! a method here; the TUI is a thin dispatcher over them. Nothing in this
//! module returns an error to the caller — failures become status toasts.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::label::{relabel, LabelSnapshot, LabelStore};
use crate::model::{BlockId, Catalog, Workspace, WorkspacePoint};
use crate::ops::{Negotiator, NegotiatorState};
use crate::query::{find_by_label, navigate, parse_label, ranked_templates, Direction};

/// Structural-change notifications within this window coalesce into a
/// single relabel pass.
pub const RELABEL_DEBOUNCE: Duration = Duration::from_millis(50);

/// How long a status toast stays visible.
pub const STATUS_TTL: Duration = Duration::from_secs(5);

const SPAWN_BASE: WorkspacePoint = WorkspacePoint { x: 120, y: 120 };
const SPAWN_STEP: i32 = 40;
const SPAWN_SLOTS: i32 = 5;

/// Where toolbox navigation currently points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolboxCursor {
    Categories { index: usize },
    Blocks { category: usize, index: usize },
    SearchResults { query: String, index: usize },
}

/// State for the one-line note/tag editor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteDraft {
    pub buffer: String,
    pub suggestion_index: usize,
}

/// The active input mode; keys mean different things per mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Workspace,
    Toolbox(ToolboxCursor),
    ConnectSource,
    ConnectTarget,
    NoteEdit(NoteDraft),
    Search { buffer: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StatusMessage {
    text: String,
    expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct Session {
    workspace: Workspace,
    catalog: Catalog,
    store: LabelStore,
    negotiator: Negotiator,
    selected: Option<BlockId>,
    mode: Mode,
    used_tags: BTreeSet<String>,
    relabel_due: Option<Instant>,
    status: Option<StatusMessage>,
    spawn_serial: i32,
}

impl Session {
    pub fn new(workspace: Workspace, catalog: Catalog) -> Self {
        let mut session = Self {
            workspace,
            catalog,
            store: LabelStore::new(),
            negotiator: Negotiator::new(),
            selected: None,
            mode: Mode::Workspace,
            used_tags: BTreeSet::new(),
            relabel_due: None,
            status: None,
            spawn_serial: 0,
        };
        session.relabel_now();
        session
    }

    // ---- read surface ---------------------------------------------------

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn store(&self) -> &LabelStore {
        &self.store
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selected(&self) -> Option<&BlockId> {
        self.selected.as_ref()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn used_tags(&self) -> &BTreeSet<String> {
        &self.used_tags
    }

    pub fn status_line(&self, now: Instant) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|message| message.expires_at > now)
            .map(|message| message.text.as_str())
    }

    /// When the pending debounced relabel is due, if one is pending.
    pub fn relabel_due_at(&self) -> Option<Instant> {
        self.relabel_due
    }

    /// The `A2`-style display label for a block, when it has one.
    pub fn display_label(&self, block_id: &BlockId) -> Option<String> {
        crate::label::display_label(&self.workspace, &self.store, block_id)
    }

    /// The serialized label maps, for export to a host or the clipboard.
    pub fn label_snapshot(&self) -> LabelSnapshot {
        self.store.snapshot()
    }

    // ---- time -----------------------------------------------------------

    /// Runs the debounced relabel pass if its deadline has passed.
    /// Returns true when a pass ran.
    pub fn poll_at(&mut self, now: Instant) -> bool {
        match self.relabel_due {
            Some(due) if due <= now => {
                self.relabel_now();
                true
            }
            _ => false,
        }
    }

    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    /// Recomputes labels immediately and clears any pending deadline.
    pub fn relabel_now(&mut self) {
        self.relabel_due = None;
        let outcome = relabel(&self.workspace, &mut self.store);
        if !outcome.healed().is_empty() {
            let restored: Vec<String> = outcome
                .healed()
                .iter()
                .map(|(block_id, name)| format!("{name} ({block_id})"))
                .collect();
            self.set_status(format!(
                "Warning: restored lost stack name(s): {}",
                restored.join(", ")
            ));
        }
    }

    fn sync_events(&mut self) {
        let events = self.workspace.take_events();
        if events.iter().any(|event| event.is_structural()) {
            // A fresh burst supersedes any pending deadline.
            self.relabel_due = Some(Instant::now() + RELABEL_DEBOUNCE);
        }
    }

    fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            expires_at: Instant::now() + STATUS_TTL,
        });
    }

    /// Lets the shell surface its own outcomes (clipboard, IO) through the
    /// same toast channel.
    pub fn note_shell_status(&mut self, text: impl Into<String>) {
        self.set_status(text);
    }

    // ---- selection ------------------------------------------------------

    pub fn select(&mut self, block_id: &BlockId) {
        if let Some(block) = self.workspace.block(block_id) {
            let label = self
                .display_label(block_id)
                .unwrap_or_else(|| block_id.to_string());
            let kind = block.kind().to_owned();
            self.selected = Some(block_id.clone());
            if self.negotiator.state() == NegotiatorState::TargetPending {
                self.finish_connection(block_id.clone());
            } else {
                self.set_status(format!("Selected block {label}: {kind}"));
            }
        } else {
            self.set_status(format!("Block {block_id} not found."));
        }
    }

    /// Selects the n-th block (1-based) in ascending id order.
    pub fn select_index(&mut self, index: usize) {
        let block_id = self
            .workspace
            .blocks()
            .nth(index.saturating_sub(1))
            .map(|block| block.block_id().clone());
        match block_id {
            Some(block_id) if index >= 1 => self.select(&block_id),
            _ => self.set_status(format!("No block {index}.")),
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.status = None;
    }

    pub fn navigate(&mut self, direction: Direction) {
        let Some(current) = self.selected.clone() else {
            self.set_status("No block selected.");
            return;
        };
        match navigate(&self.workspace, &current, direction) {
            Some(found) => self.select(&found),
            None => self.set_status(format!("No block found {}.", direction.relation())),
        }
    }

    pub fn delete_selection(&mut self) {
        let Some(block_id) = self.selected.take() else {
            self.set_status("No block selected.");
            return;
        };
        match self.workspace.delete_block(&block_id) {
            Ok(removed) => {
                self.set_status(format!("Deleted {} block(s).", removed.len()));
            }
            Err(err) => self.set_status(err.to_string()),
        }
        self.sync_events();
    }

    // ---- toolbox --------------------------------------------------------

    pub fn open_toolbox(&mut self) {
        if self.catalog.is_empty() {
            self.set_status("Toolbox is empty.");
            return;
        }
        self.mode = Mode::Toolbox(ToolboxCursor::Categories { index: 0 });
        self.set_status("Toolbox opened. Use arrow keys to navigate, Enter to select.");
    }

    pub fn close_toolbox(&mut self) {
        self.mode = Mode::Workspace;
        self.set_status("Toolbox closed.");
    }

    pub fn toolbox_cursor(&self) -> Option<&ToolboxCursor> {
        match &self.mode {
            Mode::Toolbox(cursor) => Some(cursor),
            _ => None,
        }
    }

    pub fn toolbox_move(&mut self, delta: i32) {
        let Mode::Toolbox(cursor) = &mut self.mode else {
            return;
        };
        match cursor {
            ToolboxCursor::Categories { index } => {
                *index = step(*index, delta, self.catalog.categories().len());
            }
            ToolboxCursor::Blocks { category, index } => {
                let len = self
                    .catalog
                    .category(*category)
                    .map_or(0, |c| c.templates().len());
                *index = step(*index, delta, len);
            }
            ToolboxCursor::SearchResults { query, index } => {
                let len = ranked_templates(&self.catalog, query).len();
                *index = step(*index, delta, len);
            }
        }
    }

    /// Enter/Right in the category list descends into the category.
    pub fn toolbox_descend(&mut self) {
        let Mode::Toolbox(cursor) = &self.mode else {
            return;
        };
        if let ToolboxCursor::Categories { index } = cursor {
            let index = *index;
            if let Some(category) = self.catalog.category(index) {
                let name = category.name().to_owned();
                self.mode = Mode::Toolbox(ToolboxCursor::Blocks { category: index, index: 0 });
                self.set_status(format!(
                    "Category '{name}' opened. Use arrow keys to navigate blocks."
                ));
            }
        }
    }

    /// Left/Escape in a block list returns to the categories.
    pub fn toolbox_ascend(&mut self) {
        let Mode::Toolbox(cursor) = &self.mode else {
            return;
        };
        match cursor {
            ToolboxCursor::Categories { .. } => self.close_toolbox(),
            ToolboxCursor::Blocks { category, .. } => {
                let index = *category;
                self.mode = Mode::Toolbox(ToolboxCursor::Categories { index });
                self.set_status("Returned to category list.");
            }
            ToolboxCursor::SearchResults { .. } => {
                self.mode = Mode::Toolbox(ToolboxCursor::Categories { index: 0 });
                self.set_status("Search cleared.");
            }
        }
    }

    /// Typing in the toolbox switches to fuzzy search over the whole
    /// palette.
    pub fn toolbox_input_char(&mut self, c: char) {
        let Mode::Toolbox(cursor) = &mut self.mode else {
            return;
        };
        match cursor {
            ToolboxCursor::SearchResults { query, index } => {
                query.push(c);
                *index = 0;
            }
            _ => {
                self.mode = Mode::Toolbox(ToolboxCursor::SearchResults {
                    query: c.to_string(),
                    index: 0,
                });
            }
        }
    }

    pub fn toolbox_backspace(&mut self) {
        let Mode::Toolbox(cursor) = &mut self.mode else {
            return;
        };
        if let ToolboxCursor::SearchResults { query, index } = cursor {
            query.pop();
            *index = 0;
            if query.is_empty() {
                self.mode = Mode::Toolbox(ToolboxCursor::Categories { index: 0 });
            }
        }
    }

    /// Enter on a template instantiates it at the spawn position.
    pub fn toolbox_confirm(&mut self) {
        let Mode::Toolbox(cursor) = &self.mode else {
            return;
        };
        let template = match cursor {
            ToolboxCursor::Categories { .. } => {
                self.toolbox_descend();
                return;
            }
            ToolboxCursor::Blocks { category, index } => self
                .catalog
                .category(*category)
                .and_then(|c| c.templates().get(*index))
                .cloned(),
            ToolboxCursor::SearchResults { query, index } => {
                ranked_templates(&self.catalog, query).get(*index).copied().cloned()
            }
        };
        let Some(template) = template else {
            self.set_status("Nothing to add.");
            return;
        };

        let block_id = self.fresh_block_id();
        let position = self.spawn_position();
        match self
            .workspace
            .create_from_template(block_id.clone(), &template, position)
        {
            Ok(()) => {
                self.sync_events();
                self.mode = Mode::Workspace;
                self.set_status(format!("Added block: {}", template.label()));
                self.selected = Some(block_id);
            }
            Err(err) => self.set_status(err.to_string()),
        }
    }

    fn fresh_block_id(&mut self) -> BlockId {
        loop {
            self.spawn_serial += 1;
            let candidate = format!("blk{}", self.spawn_serial);
            if let Ok(block_id) = BlockId::new(candidate) {
                if !self.workspace.contains(&block_id) {
                    return block_id;
                }
            }
        }
    }

    fn spawn_position(&self) -> WorkspacePoint {
        let slot = self.spawn_serial % SPAWN_SLOTS;
        WorkspacePoint::new(
            SPAWN_BASE.x + slot * SPAWN_STEP,
            SPAWN_BASE.y + slot * SPAWN_STEP,
        )
    }

    // ---- connection mode ------------------------------------------------

    pub fn negotiator_state(&self) -> NegotiatorState {
        self.negotiator.state()
    }

    pub fn begin_connection(&mut self) {
        let Some(block_id) = self.selected.clone() else {
            self.set_status("No block selected.");
            return;
        };
        match self.negotiator.begin(&self.workspace, &block_id) {
            Ok(point) => {
                let described = point.describe();
                self.mode = Mode::ConnectSource;
                self.set_status(format!(
                    "Connection mode: {described} selected. Tab cycles, Enter confirms."
                ));
            }
            Err(err) => {
                self.mode = Mode::Workspace;
                self.set_status(err.to_string());
            }
        }
    }

    pub fn cycle_connection(&mut self) {
        match self.negotiator.cycle() {
            Ok(point) => {
                let described = point.describe();
                self.set_status(format!("Selected {described} connection."));
            }
            Err(err) => self.set_status(err.to_string()),
        }
    }

    pub fn confirm_connection(&mut self) {
        match self.negotiator.confirm() {
            Ok(()) => {
                self.mode = Mode::ConnectTarget;
                self.set_status("Now select a target block to connect to.");
            }
            Err(err) => self.set_status(err.to_string()),
        }
    }

    fn finish_connection(&mut self, target: BlockId) {
        let result = self.negotiator.complete(&mut self.workspace, &target);
        self.mode = Mode::Workspace;
        match result {
            Ok(point) => {
                self.sync_events();
                let described = point.describe();
                let label = self
                    .display_label(&target)
                    .unwrap_or_else(|| target.to_string());
                self.selected = Some(target);
                self.set_status(format!("Connected via {described} on block {label}."));
            }
            Err(err) => self.set_status(err.to_string()),
        }
    }

    pub fn cancel_connection(&mut self) {
        self.negotiator.cancel();
        self.mode = Mode::Workspace;
        self.set_status("Connection mode exited.");
    }

    // ---- note / tag editor ----------------------------------------------

    pub fn open_note_editor(&mut self) {
        let Some(block_id) = self.selected.clone() else {
            self.set_status("No block selected.");
            return;
        };
        let Some(block) = self.workspace.block(&block_id) else {
            self.set_status(format!("Block {block_id} not found."));
            return;
        };
        let mut buffer = String::new();
        if let Some(tag) = block.tag() {
            buffer.push('#');
            buffer.push_str(tag);
        }
        if let Some(note) = block.note() {
            if !buffer.is_empty() {
                buffer.push(' ');
            }
            buffer.push_str(note);
        }
        self.mode = Mode::NoteEdit(NoteDraft {
            buffer,
            suggestion_index: 0,
        });
        self.set_status("Editing note. #word tags the block; Enter saves, Esc cancels.");
    }

    pub fn note_draft(&self) -> Option<&NoteDraft> {
        match &self.mode {
            Mode::NoteEdit(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn note_input_char(&mut self, c: char) {
        if let Mode::NoteEdit(draft) = &mut self.mode {
            draft.buffer.push(c);
            draft.suggestion_index = 0;
        }
    }

    pub fn note_backspace(&mut self) {
        if let Mode::NoteEdit(draft) = &mut self.mode {
            draft.buffer.pop();
            draft.suggestion_index = 0;
        }
    }

    /// Known tags matching the `#prefix` under the cursor.
    pub fn tag_suggestions(&self) -> Vec<String> {
        let Mode::NoteEdit(draft) = &self.mode else {
            return Vec::new();
        };
        let Some(prefix) = current_tag_prefix(&draft.buffer) else {
            return Vec::new();
        };
        self.used_tags
            .iter()
            .filter(|tag| tag.to_lowercase().starts_with(&prefix.to_lowercase()))
            .cloned()
            .collect()
    }

    pub fn note_suggestion_move(&mut self, delta: i32) {
        let len = self.tag_suggestions().len();
        if let Mode::NoteEdit(draft) = &mut self.mode {
            draft.suggestion_index = step(draft.suggestion_index, delta, len);
        }
    }

    /// Tab completes the tag under the cursor from the suggestion list.
    pub fn note_accept_suggestion(&mut self) {
        let suggestions = self.tag_suggestions();
        let Mode::NoteEdit(draft) = &mut self.mode else {
            return;
        };
        let Some(chosen) = suggestions.get(draft.suggestion_index) else {
            return;
        };
        if let Some(hash) = draft.buffer.rfind('#') {
            draft.buffer.truncate(hash + 1);
            draft.buffer.push_str(chosen);
        }
    }

    pub fn save_note(&mut self) {
        let Mode::NoteEdit(draft) = &self.mode else {
            return;
        };
        let Some(block_id) = self.selected.clone() else {
            self.mode = Mode::Workspace;
            self.set_status("No block selected.");
            return;
        };

        let (tag, note) = parse_note_input(&draft.buffer);
        if let Some(tag) = &tag {
            self.used_tags.insert(tag.clone());
        }
        let had_tag = tag.is_some();
        let had_note = note.is_some();
        match self.workspace.set_annotation(&block_id, note, tag) {
            Ok(()) => {
                self.set_status(match (had_tag, had_note) {
                    (true, true) => "Tag and comment saved.",
                    (true, false) => "Tag saved.",
                    (false, true) => "Comment saved.",
                    (false, false) => "Comment cleared.",
                });
            }
            Err(err) => self.set_status(err.to_string()),
        }
        self.mode = Mode::Workspace;
        self.sync_events();
    }

    pub fn cancel_note(&mut self) {
        self.mode = Mode::Workspace;
        self.set_status("Note editing cancelled.");
    }

    // ---- label search ---------------------------------------------------

    pub fn open_search(&mut self) {
        self.mode = Mode::Search {
            buffer: String::new(),
        };
        self.set_status("Search: enter a block reference like A2.");
    }

    pub fn search_buffer(&self) -> Option<&str> {
        match &self.mode {
            Mode::Search { buffer } => Some(buffer.as_str()),
            _ => None,
        }
    }

    pub fn search_input_char(&mut self, c: char) {
        if let Mode::Search { buffer } = &mut self.mode {
            buffer.push(c);
        }
    }

    pub fn search_backspace(&mut self) {
        if let Mode::Search { buffer } = &mut self.mode {
            buffer.pop();
        }
    }

    pub fn submit_search(&mut self) {
        let Mode::Search { buffer } = &self.mode else {
            return;
        };
        let input = buffer.clone();
        self.mode = Mode::Workspace;

        let Some(query) = parse_label(&input) else {
            self.set_status("Invalid format. Use \"A2\" or \"B3\".");
            return;
        };
        if self.store.root_for_name(query.name()).is_none() {
            self.set_status(format!("Stack {} not found.", query.name()));
            return;
        }
        match find_by_label(&self.workspace, &self.store, &query) {
            Some(block_id) => {
                self.select(&block_id);
                self.set_status(format!("Found block {}{}.", query.name(), query.number()));
            }
            None => self.set_status(format!(
                "Block {} not found in stack {}.",
                query.number(),
                query.name()
            )),
        }
    }

    pub fn cancel_search(&mut self) {
        self.mode = Mode::Workspace;
        self.status = None;
    }

}

fn step(index: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    if delta >= 0 {
        (index + delta as usize).min(len - 1)
    } else {
        index.saturating_sub(delta.unsigned_abs() as usize)
    }
}

/// Splits editor input into an optional `#tag` and the remaining note text.
/// The first `#`-prefixed token wins; everything else joins into the note.
fn parse_note_input(input: &str) -> (Option<String>, Option<String>) {
    let mut tag = None;
    let mut note_words: Vec<&str> = Vec::new();
    for word in input.split_whitespace() {
        if let Some(stripped) = word.strip_prefix('#') {
            if tag.is_none() && !stripped.is_empty() {
                tag = Some(stripped.to_owned());
                continue;
            }
        }
        note_words.push(word);
    }
    let note = if note_words.is_empty() {
        None
    } else {
        Some(note_words.join(" "))
    };
    (tag, note)
}

/// The `#prefix` being typed at the end of the buffer, if any.
fn current_tag_prefix(buffer: &str) -> Option<&str> {
    let last_word = buffer.split_whitespace().last()?;
    let prefix = last_word.strip_prefix('#')?;
    if buffer.ends_with(last_word) {
        Some(prefix)
    } else {
        None
    }
}
