//! Application layer: the people list controller and its observable state.

pub mod people;

pub use people::{Command, Modal, ModalKind, PeopleController, PeopleState};
