//! Voice authentication: credential store, input validation, and the
//! login/registration state machine.

pub mod flow;
pub mod store;
pub mod validate;

pub use flow::{AuthFlow, AuthReply, AuthStage, FlowEvent};
pub use store::{LoginOutcome, RegisterOutcome, UserInfo, UserStore};
pub use validate::{validate_email, validate_name, validate_password};
