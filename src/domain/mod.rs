pub mod account;
pub mod book;
pub mod category;
pub mod common;
pub mod money;
pub mod transaction;

pub use common::{Displayable, Identifiable, NamedEntity, SoftDelete};
