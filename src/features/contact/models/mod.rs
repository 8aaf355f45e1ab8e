mod contact_message;

pub use contact_message::*;
