//! PeopleController - list and modal state machine over a [`PeopleRepository`].
//!
//! The controller is the only place where directory failures are recovered:
//! every operation settles into a new [`PeopleState`] and never returns an
//! error to its caller. State is published through a `watch` channel and
//! replaced atomically with `send_modify`.

use super::generation::{Generations, Target, Ticket};
use super::state::{
    CREATE_FAILED, DELETE_FAILED, LOAD_FAILED, Modal, PeopleState, UPDATE_FAILED,
};
use people_core::config::DEFAULT_PAGE_SIZE;
use people_core::person::{
    PeopleRepository, Person, PersonCreateDto, PersonUpdateDto, build_avatar_url,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// An operation that can be handed to [`PeopleController::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load,
    Create(PersonCreateDto),
    SaveEdit(PersonUpdateDto),
    ConfirmDelete,
}

/// Observable people list with add/edit/delete modals.
///
/// Cheap to clone; clones share the same state and repository.
#[derive(Clone)]
pub struct PeopleController {
    inner: Arc<Inner>,
}

struct Inner {
    repository: Arc<dyn PeopleRepository>,
    state: watch::Sender<PeopleState>,
    generations: Mutex<Generations>,
    page_size: u32,
}

impl PeopleController {
    pub fn new(repository: Arc<dyn PeopleRepository>) -> Self {
        Self::with_page_size(repository, DEFAULT_PAGE_SIZE)
    }

    /// Creates a controller that requests `page_size` records per load.
    pub fn with_page_size(repository: Arc<dyn PeopleRepository>, page_size: u32) -> Self {
        let (state, _) = watch::channel(PeopleState::default());
        Self {
            inner: Arc::new(Inner {
                repository,
                state,
                generations: Mutex::new(Generations::default()),
                page_size,
            }),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.inner.page_size
    }

    /// Clones the current state.
    pub fn snapshot(&self) -> PeopleState {
        self.inner.state.borrow().clone()
    }

    /// Returns a receiver notified after every state replacement.
    pub fn subscribe(&self) -> watch::Receiver<PeopleState> {
        self.inner.state.subscribe()
    }

    /// Replaces the first page of people from the repository.
    pub async fn load(&self) {
        let ticket = self.generations().begin(Target::List);
        self.update(|state| {
            state.loading = true;
            state.error = None;
        });
        tracing::debug!("Loading people (per_page={})", self.inner.page_size);

        let finalizer = LoadFinalizer {
            controller: self,
            ticket,
            armed: true,
        };
        let result = self.inner.repository.list(1, self.inner.page_size).await;
        if !finalizer.settle() {
            tracing::debug!("Discarding superseded people list response");
            return;
        }

        self.update(|state| {
            match result {
                Ok(people) => {
                    tracing::debug!("Loaded {} people", people.len());
                    state.people = people;
                }
                Err(e) => {
                    tracing::warn!("Failed to load people: {}", e);
                    state.people.clear();
                    state.error = Some(LOAD_FAILED.to_string());
                }
            }
            state.loading = false;
        });
    }

    pub fn open_add(&self) {
        self.set_modal(Modal::Add);
    }

    pub fn open_edit(&self, person: Person) {
        self.set_modal(Modal::Edit(person));
    }

    pub fn open_delete(&self, person: Person) {
        self.set_modal(Modal::Delete(person));
    }

    /// Closes whichever modal is open. The error message is kept.
    pub fn close_modal(&self) {
        self.set_modal(Modal::None);
    }

    /// Creates a person and prepends it locally with the next free id.
    ///
    /// The server-assigned id is not used; ids stay in the local `max + 1`
    /// sequence so avatars remain deterministic.
    pub async fn create(&self, dto: PersonCreateDto) {
        match self.inner.repository.create(&dto).await {
            Ok(ack) => {
                self.update(|state| {
                    let id = state.next_id();
                    tracing::debug!(
                        "Created person {} (server id {:?})",
                        id,
                        ack.id.as_deref()
                    );
                    let person = Person {
                        id,
                        first_name: dto.first_name,
                        last_name: dto.last_name,
                        email: dto.email,
                        avatar: build_avatar_url(id),
                    };
                    state.people.insert(0, person);
                    state.modal = Modal::None;
                });
            }
            Err(e) => {
                tracing::warn!("Failed to create person: {}", e);
                self.set_error(CREATE_FAILED);
            }
        }
    }

    /// Saves `dto` over the selected person.
    ///
    /// Does nothing unless an edit or delete modal holds a selection.
    pub async fn save_edit(&self, dto: PersonUpdateDto) {
        let Some(id) = self.selected_id() else {
            tracing::debug!("save_edit ignored: no person selected");
            return;
        };

        let ticket = self.generations().begin(Target::Update(id));
        let result = self.inner.repository.update(id, &dto).await;
        if !self.generations().finish(ticket) {
            tracing::debug!("Discarding superseded update response for person {}", id);
            return;
        }

        match result {
            Ok(_) => self.update(|state| {
                if let Some(person) = state.people.iter_mut().find(|p| p.id == id) {
                    person.first_name = dto.first_name;
                    person.last_name = dto.last_name;
                    person.email = dto.email;
                }
                state.modal = Modal::None;
                tracing::debug!("Updated person {}", id);
            }),
            Err(e) => {
                tracing::warn!("Failed to update person {}: {}", id, e);
                self.set_error(UPDATE_FAILED);
            }
        }
    }

    /// Deletes the selected person.
    ///
    /// Does nothing unless an edit or delete modal holds a selection.
    pub async fn confirm_delete(&self) {
        let Some(id) = self.selected_id() else {
            tracing::debug!("confirm_delete ignored: no person selected");
            return;
        };

        let ticket = self.generations().begin(Target::Delete(id));
        let result = self.inner.repository.delete(id).await;
        if !self.generations().finish(ticket) {
            tracing::debug!("Discarding superseded delete response for person {}", id);
            return;
        }

        match result {
            Ok(()) => self.update(|state| {
                state.people.retain(|p| p.id != id);
                state.modal = Modal::None;
                tracing::debug!("Deleted person {}", id);
            }),
            Err(e) => {
                tracing::warn!("Failed to delete person {}: {}", id, e);
                self.set_error(DELETE_FAILED);
            }
        }
    }

    /// Runs `command` to completion.
    pub async fn execute(&self, command: Command) {
        match command {
            Command::Load => self.load().await,
            Command::Create(dto) => self.create(dto).await,
            Command::SaveEdit(dto) => self.save_edit(dto).await,
            Command::ConfirmDelete => self.confirm_delete().await,
        }
    }

    /// Spawns `command` on the current tokio runtime and returns immediately.
    ///
    /// Must be called from within a runtime.
    pub fn dispatch(&self, command: Command) -> JoinHandle<()> {
        let controller = self.clone();
        tokio::spawn(async move { controller.execute(command).await })
    }

    fn selected_id(&self) -> Option<u64> {
        self.inner.state.borrow().selected().map(|p| p.id)
    }

    fn set_modal(&self, modal: Modal) {
        tracing::debug!("Modal -> {}", modal.kind());
        self.update(|state| state.modal = modal);
    }

    fn set_error(&self, message: &str) {
        self.update(|state| state.error = Some(message.to_string()));
    }

    fn update(&self, f: impl FnOnce(&mut PeopleState)) {
        self.inner.state.send_modify(f);
    }

    fn generations(&self) -> MutexGuard<'_, Generations> {
        self.inner
            .generations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears `loading` if a load is dropped before its response settles.
struct LoadFinalizer<'a> {
    controller: &'a PeopleController,
    ticket: Ticket,
    armed: bool,
}

impl LoadFinalizer<'_> {
    /// Finishes the ticket. Returns `false` when a newer load has started.
    fn settle(mut self) -> bool {
        self.armed = false;
        self.controller.generations().finish(self.ticket)
    }
}

impl Drop for LoadFinalizer<'_> {
    fn drop(&mut self) {
        if self.armed && self.controller.generations().finish(self.ticket) {
            self.controller.update(|state| state.loading = false);
        }
    }
}
