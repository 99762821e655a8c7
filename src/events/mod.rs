pub mod guild;
pub mod interaction;
pub mod message;
pub mod ready;

pub use guild::handle_member_add;
pub use interaction::handle_interaction;
pub use message::handle_message;
pub use ready::handle_ready;
