//! HTTP middleware.

pub mod request_id;
