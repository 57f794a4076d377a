//! Note board: the command handlers behind the sticky-notes widget.
//!
//! # Responsibility
//! - Own the live note list and mirror every record onto a surface.
//! - Handle create/delete/edit/drag commands issued by a host UI.
//! - Re-save the whole board after every mutating command.
//!
//! # Invariants
//! - Note ids are unique among live notes.
//! - A dragged note never leaves the container box.
//! - `load` replays stored notes at most once per board and never saves.
//! - Container traversal order equals creation order.

use crate::config::BoardConfig;
use crate::model::note::{NewNote, Note, NoteId, Position};
use crate::model::snapshot::NoteSnapshot;
use crate::random::RandomSource;
use crate::repo::kv_repo::{KeyValueStore, RepoError};
use crate::repo::snapshot_repo::SnapshotRepository;
use crate::surface::NoteSurface;
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BoardResult<T> = Result<T, BoardError>;

/// Random draws tried before a generated id gets a numeric suffix.
const MAX_RANDOM_ID_ATTEMPTS: usize = 8;

/// Board-level error.
#[derive(Debug)]
pub enum BoardError {
    /// Writing the board blob failed.
    Persist(RepoError),
    /// `load` was called on a board that already replayed storage.
    AlreadyLoaded,
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persist(err) => write!(f, "failed to persist notes: {err}"),
            Self::AlreadyLoaded => write!(f, "notes were already loaded for this board"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persist(err) => Some(err),
            Self::AlreadyLoaded => None,
        }
    }
}

impl From<RepoError> for BoardError {
    fn from(value: RepoError) -> Self {
        Self::Persist(value)
    }
}

/// Where a press landed on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressTarget {
    /// Any part of the card except the content region.
    Body,
    /// The text region; presses here never start a drag.
    Content,
}

#[derive(Debug, Clone)]
struct DragState {
    id: NoteId,
    /// Pointer minus card top-left at press time.
    grab_offset: Position,
}

/// Live note set bound to a store, a surface and a random source.
pub struct NoteBoard<S, V, R> {
    snapshots: SnapshotRepository<S>,
    surface: V,
    random: R,
    config: BoardConfig,
    notes: Vec<Note>,
    editing: HashSet<NoteId>,
    drag: Option<DragState>,
    loaded: bool,
}

impl<S, V, R> NoteBoard<S, V, R>
where
    S: KeyValueStore,
    V: NoteSurface,
    R: RandomSource,
{
    pub fn new(store: S, surface: V, random: R) -> Self {
        Self::with_config(store, surface, random, BoardConfig::default())
    }

    pub fn with_config(store: S, surface: V, random: R, config: BoardConfig) -> Self {
        let config = config.normalized();
        Self {
            snapshots: SnapshotRepository::new(store, config.storage_key.clone()),
            surface,
            random,
            config,
            notes: Vec::new(),
            editing: HashSet::new(),
            drag: None,
            loaded: false,
        }
    }

    /// Live notes in container order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id() == id)
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.note(id).is_some()
    }

    pub fn is_editing(&self, id: &NoteId) -> bool {
        self.editing.contains(id)
    }

    /// Id of the note being dragged, if any.
    pub fn dragging(&self) -> Option<&NoteId> {
        self.drag.as_ref().map(|drag| &drag.id)
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut V {
        &mut self.surface
    }

    pub fn store(&self) -> &S {
        self.snapshots.store()
    }

    /// Creates a note, shows it, and saves the board.
    ///
    /// A supplied id that is already live is replaced by a fresh one.
    pub fn create(&mut self, request: NewNote) -> BoardResult<Note> {
        let note = self.spawn(request);
        info!(
            "event=note_create module=board status=ok note_id={}",
            note.id()
        );
        self.save()?;
        Ok(note)
    }

    /// Add-note control: a blank note at the trigger offset, opened for
    /// editing.
    pub fn add_from_trigger(&mut self) -> BoardResult<Note> {
        let note = self.spawn(NewNote::default().with_position(self.config.trigger_position));
        self.enter_edit(note.id());
        info!(
            "event=note_create module=board status=ok source=trigger note_id={}",
            note.id()
        );
        self.save()?;
        Ok(note)
    }

    /// Removes a note and saves. Unknown ids are a no-op returning `false`.
    pub fn delete(&mut self, id: &NoteId) -> BoardResult<bool> {
        let Some(index) = self.index_of(id) else {
            debug!("event=note_delete module=board status=noop note_id={id}");
            return Ok(false);
        };

        if self.dragging() == Some(id) {
            self.drag = None;
        }
        self.editing.remove(id);
        self.surface.unmount(id);
        self.notes.remove(index);
        info!("event=note_delete module=board status=ok note_id={id}");
        self.save()?;
        Ok(true)
    }

    /// Removes every note and the stored blob. Returns how many were removed.
    pub fn clear(&mut self) -> BoardResult<usize> {
        self.drag = None;
        self.editing.clear();
        for note in &self.notes {
            self.surface.unmount(note.id());
        }
        let removed = self.notes.len();
        self.notes.clear();
        self.snapshots.clear()?;
        info!("event=board_clear module=board status=ok notes={removed}");
        Ok(removed)
    }

    /// Sets a note's background color and saves.
    pub fn recolor(&mut self, id: &NoteId, color: impl Into<String>) -> BoardResult<bool> {
        let color = color.into();
        let Some(index) = self.index_of(id) else {
            return Ok(false);
        };
        self.surface.set_color(id, &color);
        self.notes[index].set_color(color);
        info!("event=note_recolor module=board status=ok note_id={id}");
        self.save()?;
        Ok(true)
    }

    /// Opens the content region for editing. Returns `false` for unknown ids.
    pub fn enter_edit(&mut self, id: &NoteId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.editing.insert(id.clone());
        self.surface.set_editable(id, true);
        debug!("event=note_edit module=board status=start note_id={id}");
        true
    }

    /// Closes the content region.
    ///
    /// With `commit`, the surface text becomes the note content and the board
    /// is saved; without it, the surface text is reset to the stored content.
    /// Returns `false` when the note was not being edited.
    pub fn exit_edit(&mut self, id: &NoteId, commit: bool) -> BoardResult<bool> {
        if !self.editing.remove(id) {
            return Ok(false);
        }
        let Some(index) = self.index_of(id) else {
            return Ok(false);
        };

        if commit {
            let edited = self
                .surface
                .read_content(id)
                .unwrap_or_else(|| self.notes[index].content().to_string());
            let content = self.content_or_placeholder(edited);
            self.surface.set_content(id, &content);
            self.notes[index].set_content(content);
        } else {
            self.surface.set_content(id, self.notes[index].content());
        }
        self.surface.set_editable(id, false);
        debug!("event=note_edit module=board status=end note_id={id} commit={commit}");

        if commit {
            self.save()?;
        }
        Ok(true)
    }

    /// Starts dragging `id` from a container-local `pointer`.
    ///
    /// Presses on the content region are ignored so text selection keeps
    /// working. Returns whether a drag started.
    pub fn drag_start(&mut self, id: &NoteId, pointer: Position, target: PressTarget) -> bool {
        if target == PressTarget::Content {
            return false;
        }
        let Some(note) = self.note(id) else {
            return false;
        };
        let grab_offset = pointer - note.position();

        if let Some(stale) = self.drag.take() {
            self.surface.set_raised(&stale.id, false);
        }
        self.surface.set_raised(id, true);
        self.drag = Some(DragState {
            id: id.clone(),
            grab_offset,
        });
        debug!("event=note_drag module=board status=start note_id={id}");
        true
    }

    /// Moves the dragged note so it follows `pointer`, clamped to the
    /// container. Returns the applied position, or `None` without a drag.
    pub fn drag_move(&mut self, pointer: Position) -> Option<Position> {
        let drag = self.drag.as_ref()?;
        let index = self.index_of(&drag.id)?;
        let id = drag.id.clone();

        let desired = pointer - drag.grab_offset;
        let clamped =
            desired.clamp_within(self.surface.note_size(&id), self.surface.container_size());
        self.notes[index].set_position(clamped);
        self.surface.set_position(&id, clamped);
        Some(clamped)
    }

    /// Ends the active drag and saves. Returns `false` without a drag.
    pub fn drag_end(&mut self) -> BoardResult<bool> {
        let Some(drag) = self.drag.take() else {
            return Ok(false);
        };
        self.surface.set_raised(&drag.id, false);
        debug!(
            "event=note_drag module=board status=end note_id={}",
            drag.id
        );
        self.save()?;
        Ok(true)
    }

    /// Writes every live note, in container order, over the stored blob.
    pub fn save(&mut self) -> BoardResult<()> {
        let snapshots: Vec<NoteSnapshot> = self.notes.iter().map(NoteSnapshot::from).collect();
        if let Err(err) = self.snapshots.save_all(&snapshots) {
            error!(
                "event=board_save module=board status=error notes={} error={}",
                snapshots.len(),
                err
            );
            return Err(err.into());
        }
        Ok(())
    }

    /// Replays stored notes onto the surface. Returns how many were restored.
    ///
    /// Missing or malformed data restores nothing. Stored ids and colors are
    /// kept; a record repeating a live id is skipped.
    pub fn load(&mut self) -> BoardResult<usize> {
        if self.loaded {
            return Err(BoardError::AlreadyLoaded);
        }
        self.loaded = true;

        let mut restored = 0;
        for snapshot in self.snapshots.load_all() {
            let request = snapshot.into_new_note(self.config.default_position);
            if let Some(id) = request.id.as_ref().filter(|id| self.contains(id)) {
                warn!("event=board_load module=board status=skipped reason=duplicate_id note_id={id}");
                continue;
            }
            self.spawn(request);
            restored += 1;
        }
        info!("event=board_load module=board status=ok notes={restored}");
        Ok(restored)
    }

    fn spawn(&mut self, request: NewNote) -> Note {
        let id = match request.id.filter(|id| !id.is_empty()) {
            Some(id) if !self.contains(&id) => id,
            Some(taken) => {
                warn!("event=note_create module=board status=reassigned reason=duplicate_id note_id={taken}");
                self.fresh_id()
            }
            None => self.fresh_id(),
        };
        let content = self.content_or_placeholder(request.content.unwrap_or_default());
        let position = match request.position {
            Some(position) => position.finite_or(self.config.default_position),
            None => self.config.default_position,
        };
        let color = match request.color.filter(|color| !color.is_empty()) {
            Some(color) => color,
            None => self.random_color(),
        };

        let note = Note::new(id, content, position, color);
        self.surface.mount(&note);
        self.notes.push(note.clone());
        note
    }

    fn fresh_id(&mut self) -> NoteId {
        for _ in 0..MAX_RANDOM_ID_ATTEMPTS {
            let id = NoteId::from_random_bytes(self.random.random_bytes());
            if !self.contains(&id) {
                return id;
            }
        }

        let base = NoteId::from_random_bytes(self.random.random_bytes());
        warn!("event=note_id module=board status=fallback reason=random_collisions base={base}");
        (1u64..)
            .map(|suffix| NoteId::new(format!("{base}-{suffix}")))
            .find(|candidate| !self.contains(candidate))
            .unwrap_or_else(|| base.clone())
    }

    fn random_color(&mut self) -> String {
        let palette = &self.config.palette;
        let index = self.random.pick_index(palette.len());
        palette[index].clone()
    }

    fn content_or_placeholder(&self, content: String) -> String {
        if content.is_empty() {
            self.config.placeholder.clone()
        } else {
            content
        }
    }

    fn index_of(&self, id: &NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id() == id)
    }
}
