use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Kanban column. Wire names match the board column headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardColumn {
    Backlog,
    #[serde(rename = "In Progress")]
    InProgress,
    Review,
    Done,
}

impl Default for CardColumn {
    fn default() -> Self {
        CardColumn::Backlog
    }
}

/// Card priority tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardPriority {
    Low,
    Med,
    High,
    Urgent,
}

impl Default for CardPriority {
    fn default() -> Self {
        CardPriority::Low
    }
}

/// A single kanban card.
///
/// `assignee` is a free-form name: boards also carry cards for people who are
/// not part of the agent roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub assignee: String,
    pub priority: CardPriority,
    pub column: CardColumn,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The board document owned by the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub tasks: Vec<Card>,
}

/// Payload for creating a card. Id and timestamps are assigned server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub assignee: String,
    #[serde(default)]
    pub priority: CardPriority,
    #[serde(default)]
    pub column: CardColumn,
}

/// Partial card update; absent fields keep their current values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub priority: Option<CardPriority>,
    pub column: Option<CardColumn>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_wire_names() {
        assert_eq!(
            serde_json::to_string(&CardColumn::InProgress).unwrap(),
            r#""In Progress""#
        );
        let back: CardColumn = serde_json::from_str(r#""Backlog""#).unwrap();
        assert_eq!(back, CardColumn::Backlog);
    }

    #[test]
    fn card_serde_roundtrip() {
        let json = r#"{
            "id": "c1",
            "title": "Ship the thing",
            "description": "",
            "assignee": "lee",
            "priority": "urgent",
            "column": "Review",
            "createdAt": "2026-08-01T10:00:00Z",
            "updatedAt": "2026-08-02T09:30:00Z"
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.priority, CardPriority::Urgent);
        assert_eq!(card.column, CardColumn::Review);

        let out = serde_json::to_string(&card).unwrap();
        assert!(out.contains(r#""createdAt":"2026-08-01T10:00:00Z""#));
    }

    #[test]
    fn draft_fills_defaults() {
        let draft: CardDraft =
            serde_json::from_str(r#"{"title":"t","assignee":"lee"}"#).unwrap();
        assert_eq!(draft.priority, CardPriority::Low);
        assert_eq!(draft.column, CardColumn::Backlog);
        assert!(draft.description.is_empty());
    }

    #[test]
    fn patch_absent_fields_stay_none() {
        let patch: CardPatch = serde_json::from_str(r#"{"column":"Done"}"#).unwrap();
        assert_eq!(patch.column, Some(CardColumn::Done));
        assert!(patch.title.is_none());
        assert!(patch.priority.is_none());
    }
}
