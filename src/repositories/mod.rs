pub(crate) mod attempts;
pub(crate) mod health;
pub(crate) mod questions;
pub(crate) mod subjects;
pub(crate) mod users;
