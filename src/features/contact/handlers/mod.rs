pub mod contact_handler;

pub use contact_handler::{__path_get_contact, get_contact};
