//! JSON-file kanban board.
//!
//! The board is the one file the dashboard owns. Every mutation rewrites the
//! whole document through a temp-file rename, so a crash mid-write can not
//! leave a half-written board behind.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use bullpen_model::{Board, Card, CardDraft, CardPatch};

use crate::error::CoreError;

/// CRUD over the board file.
#[derive(Debug, Clone)]
pub struct BoardStore {
    path: PathBuf,
}

impl BoardStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the board; a missing file is an empty board. A file that exists
    /// but does not parse is an error, never silently replaced.
    pub fn load(&self) -> Result<Board, CoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Board::default()),
            Err(source) => {
                return Err(CoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&raw).map_err(|e| CoreError::Corrupt(e.to_string()))
    }

    /// Add a card with a fresh id and timestamps.
    pub fn create(&self, draft: CardDraft) -> Result<Card, CoreError> {
        let mut board = self.load()?;
        let now = OffsetDateTime::now_utc();
        let card = Card {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.description,
            assignee: draft.assignee,
            priority: draft.priority,
            column: draft.column,
            created_at: now,
            updated_at: now,
        };
        board.tasks.push(card.clone());
        self.save(&board)?;
        debug!(card = %card.id, "card created");
        Ok(card)
    }

    /// Apply a partial update and bump `updatedAt`.
    pub fn update(&self, id: &str, patch: CardPatch) -> Result<Card, CoreError> {
        let mut board = self.load()?;
        let card = board
            .tasks
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| CoreError::CardNotFound(id.to_string()))?;

        if let Some(title) = patch.title {
            card.title = title;
        }
        if let Some(description) = patch.description {
            card.description = description;
        }
        if let Some(assignee) = patch.assignee {
            card.assignee = assignee;
        }
        if let Some(priority) = patch.priority {
            card.priority = priority;
        }
        if let Some(column) = patch.column {
            card.column = column;
        }
        card.updated_at = OffsetDateTime::now_utc();

        let card = card.clone();
        self.save(&board)?;
        debug!(card = %card.id, "card updated");
        Ok(card)
    }

    pub fn delete(&self, id: &str) -> Result<(), CoreError> {
        let mut board = self.load()?;
        let before = board.tasks.len();
        board.tasks.retain(|c| c.id != id);
        if board.tasks.len() == before {
            return Err(CoreError::CardNotFound(id.to_string()));
        }
        self.save(&board)?;
        debug!(card = id, "card deleted");
        Ok(())
    }

    fn save(&self, board: &Board) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(board).map_err(|e| CoreError::Corrupt(e.to_string()))?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| CoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| CoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| CoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bullpen_model::{CardColumn, CardPriority};

    fn draft(title: &str) -> CardDraft {
        CardDraft {
            title: title.to_string(),
            description: String::new(),
            assignee: "lee".to_string(),
            priority: CardPriority::Low,
            column: CardColumn::Backlog,
        }
    }

    fn store(dir: &tempfile::TempDir) -> BoardStore {
        BoardStore::new(dir.path().join("board.json"))
    }

    #[test]
    fn missing_file_is_empty_board() {
        let dir = tempfile::tempdir().unwrap();
        let board = store(&dir).load().unwrap();
        assert!(board.tasks.is_empty());
    }

    #[test]
    fn create_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let card = store.create(draft("write the report")).unwrap();
        assert!(!card.id.is_empty());

        let board = store.load().unwrap();
        assert_eq!(board.tasks.len(), 1);
        assert_eq!(board.tasks[0].id, card.id);
        assert_eq!(board.tasks[0].title, "write the report");
    }

    #[test]
    fn update_patches_and_bumps_updated_at() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let card = store.create(draft("t")).unwrap();

        let patch = CardPatch {
            column: Some(CardColumn::Done),
            priority: Some(CardPriority::High),
            ..CardPatch::default()
        };
        let updated = store.update(&card.id, patch).unwrap();
        assert_eq!(updated.column, CardColumn::Done);
        assert_eq!(updated.priority, CardPriority::High);
        assert_eq!(updated.title, "t");
        assert!(updated.updated_at >= card.updated_at);
    }

    #[test]
    fn update_unknown_card_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = store(&dir).update("nope", CardPatch::default()).unwrap_err();
        assert!(matches!(err, CoreError::CardNotFound(_)));
    }

    #[test]
    fn delete_removes_card() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let card = store.create(draft("t")).unwrap();
        store.delete(&card.id).unwrap();
        assert!(store.load().unwrap().tasks.is_empty());

        let err = store.delete(&card.id).unwrap_err();
        assert!(matches!(err, CoreError::CardNotFound(_)));
    }

    #[test]
    fn corrupt_board_is_surfaced_not_clobbered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        fs::write(&path, "{ this is not a board").unwrap();

        let store = BoardStore::new(&path);
        assert!(matches!(store.load().unwrap_err(), CoreError::Corrupt(_)));
        assert!(matches!(
            store.create(draft("t")).unwrap_err(),
            CoreError::Corrupt(_)
        ));
        // The broken file is still there for a human to look at.
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ this is not a board");
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        store.create(draft("t")).unwrap();
        assert!(!dir.path().join("board.json.tmp").exists());
    }
}
