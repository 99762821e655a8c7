pub mod affordance;
pub mod flow;
pub mod format;
pub mod pending;
pub mod types;

pub use affordance::VerifyAffordance;
pub use flow::{create_shared_verification_flow, SharedVerificationFlow};
pub use format::{FormatValidator, COPYABLE_TEMPLATE};
pub use pending::PendingApprovals;
pub use types::{ConfirmOutcome, IntroSubmission, ManualVerifyOutcome, ReminderReport};
