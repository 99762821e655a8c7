pub mod admin;
pub mod general;

pub use admin::{remind_unverified, send_format_template, verify_user};
pub use general::ping;
