//! Request middleware.
//!
//! Stack (outermost → innermost): Cache-Control header → audit log →
//! error description → handler.

pub mod audit;
pub mod describe;
