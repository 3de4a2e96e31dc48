pub mod access_log;
pub mod auth_gate;
pub mod request_trace;

pub use access_log::AccessLog;
pub use auth_gate::AuthGate;
pub use request_trace::RequestTrace;
