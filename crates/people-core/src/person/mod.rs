//! Person domain module.
//!
//! # Module Structure
//!
//! - `model`: Person record, DTOs and server envelopes
//! - `normalize`: mapping of raw server records onto `Person`
//! - `repository`: remote directory trait
//!
//! # Usage
//!
//! ```ignore
//! use people_core::person::{Person, PeopleRepository, normalize_person};
//! ```

mod model;
mod normalize;
mod repository;

// Re-export public API
pub use model::{
    CreatedPerson, ListResponse, Person, PersonCreateDto, PersonUpdateDto, UpdatedPerson,
};
pub use normalize::{AVATAR_BASE_URL, build_avatar_url, normalize_person};
pub use repository::PeopleRepository;
