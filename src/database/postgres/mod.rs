//! PostgreSQL implementations of the repository traits

mod allergy;
mod association;
mod caretaker;
mod child;
mod group;
mod need;
mod volunteer;

pub use allergy::PgAllergyRepository;
pub use caretaker::PgCaretakerRepository;
pub use child::PgChildRepository;
pub use group::PgGroupRepository;
pub use need::PgNeedRepository;
pub use volunteer::PgVolunteerRepository;
