//! Read operations on the users collection

pub mod list;
