// Background-colour unlock page: reference format gate, UPI link + QR request,
// and the unlock dialog state machine.
// No payment is ever confirmed here; see validator.rs.

pub mod deep_link;
pub mod flow;
pub mod handlers;
pub mod validator;
