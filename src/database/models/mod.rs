pub mod allergy;
pub mod caretaker;
pub mod child;
pub mod group;
pub mod need;
pub mod volunteer;

pub use allergy::Allergy;
pub use caretaker::Caretaker;
pub use child::{AssociationSync, Child, UpdateChildRequest};
pub use group::Group;
pub use need::Need;
pub use volunteer::Volunteer;
