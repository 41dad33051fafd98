use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A persisted todo record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Assigned by the store on insert, never changes afterwards
    pub id: i32,

    pub name: String,

    pub description: String,

    pub done: bool,

    /// Set once when the record is inserted
    pub created_at: DateTime<FixedOffset>,

    /// Refreshed on every save
    pub updated_at: DateTime<FixedOffset>,
}

impl Todo {
    /// Turn the record back into something the gateway can save
    pub fn to_draft(&self) -> TodoDraft {
        TodoDraft {
            id: Some(self.id),
            name: self.name.clone(),
            description: self.description.clone(),
            done: self.done,
        }
    }
}

/// The mutable part of a record, as handed to the gateway
///
/// A draft without an `id` is inserted, a draft with one updates the
/// existing row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoDraft {
    pub id: Option<i32>,
    pub name: String,
    pub description: String,
    pub done: bool,
}

impl TodoDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>, done: bool) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            done,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn toggle_done(&mut self) -> bool {
        self.done = !self.done;
        self.done
    }
}

/// Request body for create and patch
///
/// Only `name`, `description` and `done` are accepted, any other key in the
/// body is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TodoPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub done: Option<bool>,
}

impl TodoPayload {
    /// Overwrite every field present in the payload, leave the rest untouched
    pub fn merge_into(self, draft: &mut TodoDraft) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(done) = self.done {
            draft.done = done;
        }
    }
}
