//! View-model state for the people list.

use people_core::person::Person;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

pub const LOAD_FAILED: &str = "Failed to load people. Please try again.";
pub const CREATE_FAILED: &str = "Failed to create person.";
pub const UPDATE_FAILED: &str = "Failed to update person.";
pub const DELETE_FAILED: &str = "Failed to delete person.";

/// Which overlay is open, without the selection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModalKind {
    None,
    Add,
    Edit,
    Delete,
}

/// The single open modal and the record it targets.
///
/// Edit and delete carry their selected person, add and none carry nothing,
/// so a selection without a matching modal cannot be represented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "selected", rename_all = "lowercase")]
pub enum Modal {
    #[default]
    None,
    Add,
    Edit(Person),
    Delete(Person),
}

impl Modal {
    pub fn kind(&self) -> ModalKind {
        match self {
            Self::None => ModalKind::None,
            Self::Add => ModalKind::Add,
            Self::Edit(_) => ModalKind::Edit,
            Self::Delete(_) => ModalKind::Delete,
        }
    }

    /// The person targeted by an edit or delete modal.
    pub fn selected(&self) -> Option<&Person> {
        match self {
            Self::Edit(person) | Self::Delete(person) => Some(person),
            Self::None | Self::Add => None,
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Snapshot of everything a people view renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PeopleState {
    /// Display order; newly created records are prepended
    pub people: Vec<Person>,
    pub loading: bool,
    /// User-facing message of the last failed operation
    pub error: Option<String>,
    pub modal: Modal,
}

impl PeopleState {
    pub fn modal_kind(&self) -> ModalKind {
        self.modal.kind()
    }

    pub fn selected(&self) -> Option<&Person> {
        self.modal.selected()
    }

    pub fn find(&self, id: u64) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    /// Id for an optimistically created record: `max(ids) + 1`, or `1` when empty.
    pub fn next_id(&self) -> u64 {
        self.people.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }
}
