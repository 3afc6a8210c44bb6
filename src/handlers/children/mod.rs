// handlers/children/mod.rs - child records and their need/allergy links
mod associate;
mod child_delete;
mod child_get;
mod child_post;
mod child_put;
mod children_get;

pub use associate::{allergy_put, need_put};
pub use child_delete::child_delete;
pub use child_get::child_get;
pub use child_post::child_post;
pub use child_put::child_put;
pub use children_get::children_get;
