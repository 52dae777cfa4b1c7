// handlers/mod.rs - public endpoints plus the JWT-protected hobby tree
pub mod categories;
pub mod hobbies;
pub mod items;
pub mod public;
