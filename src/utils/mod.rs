pub mod classify;
pub mod dict;
