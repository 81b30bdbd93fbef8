mod controller;
mod generation;
mod state;

pub use controller::{Command, PeopleController};
pub use state::{
    CREATE_FAILED, DELETE_FAILED, LOAD_FAILED, Modal, ModalKind, PeopleState, UPDATE_FAILED,
};
