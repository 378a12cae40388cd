//! Request module containing the method-independent request base.

pub mod helper;

pub use helper::RequestHelper;
