//! People repository trait.
//!
//! Defines the interface for the remote person directory.

use super::model::{CreatedPerson, Person, PersonCreateDto, PersonUpdateDto, UpdatedPerson};
use crate::error::Result;

/// An abstract repository for the remote person directory.
///
/// This trait decouples the controller from the concrete transport
/// (HTTP client, in-memory fake, ...).
///
/// # Implementation Notes
///
/// Implementations must propagate failures unchanged; recovery belongs to the
/// caller.
#[async_trait::async_trait]
pub trait PeopleRepository: Send + Sync {
    /// Fetches one page of people, normalized, in server order.
    async fn list(&self, page: u32, per_page: u32) -> Result<Vec<Person>>;

    /// Creates a person and returns the raw server acknowledgement.
    async fn create(&self, dto: &PersonCreateDto) -> Result<CreatedPerson>;

    /// Updates the person with `id` and returns the raw server acknowledgement.
    async fn update(&self, id: u64, dto: &PersonUpdateDto) -> Result<UpdatedPerson>;

    /// Deletes the person with `id`.
    async fn delete(&self, id: u64) -> Result<()>;
}
