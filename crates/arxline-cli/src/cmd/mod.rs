pub mod harvest;
pub mod index;
pub mod search;
