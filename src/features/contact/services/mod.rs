mod contact_service;

pub use contact_service::{ContactService, MessagingLink, EMAIL_SUBJECT, GENERAL_MESSAGE};
