//! In-memory stores for items and users.
//!
//! Both stores are cheaply cloneable handles over shared concurrent maps;
//! every clone observes the same data. State exists only for the lifetime
//! of the process.

pub mod items;
pub mod users;

pub use items::{Item, ItemStore, NewItem};
pub use users::{User, UserStore};
