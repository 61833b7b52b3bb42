pub(crate) mod access;
pub(crate) mod attempts;
pub(crate) mod authoring;
pub(crate) mod error;
pub(crate) mod grading;
pub(crate) mod subjects;
