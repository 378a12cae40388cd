//! Query string and form body encoding.
//!
//! ```rust
//! use request_helper::params::{encode, NameValuePair};
//!
//! let pairs = vec![NameValuePair::new("q", "hello world"), NameValuePair::new("page", "2")];
//! assert_eq!(encode(&pairs, false, true), "?q=hello+world&page=2");
//! assert_eq!(encode(&pairs, true, true), "q=hello+world&page=2");
//! ```

pub mod encode;

pub use encode::{encode, NameValuePair};
