pub mod advice;
pub mod profile;
