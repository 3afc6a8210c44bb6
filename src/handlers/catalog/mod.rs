// handlers/catalog/mod.rs - standalone needs and allergies
mod allergies;
mod needs;

pub use allergies::{allergies_get, allergy_get, allergy_post};
pub use needs::{need_get, need_post, needs_get};
