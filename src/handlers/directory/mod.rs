// handlers/directory/mod.rs - groups, caretakers and volunteers (plain CRUD)
mod caretakers;
mod groups;
mod volunteers;

pub use caretakers::{caretaker_delete, caretaker_get, caretaker_post, caretaker_put, caretakers_get};
pub use groups::{group_delete, group_get, group_post, group_put, groups_get};
pub use volunteers::{volunteer_delete, volunteer_get, volunteer_post, volunteer_put, volunteers_get};
