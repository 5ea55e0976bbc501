//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. Auth validator: bearer JWT verification
//! 2. Audit logger: logs after auth, has the caller's username

pub mod audit;
pub mod auth;
