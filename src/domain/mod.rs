pub mod email;
pub mod notice;
pub mod submission;
