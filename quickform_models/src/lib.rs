pub mod emailjs;
pub mod form;
pub mod submission;
