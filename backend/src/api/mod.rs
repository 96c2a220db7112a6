//! Shared HTTP plumbing: the response envelope and error conversion used by
//! every route.

pub mod common;
