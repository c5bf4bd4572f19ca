//! 具体服务实现

pub mod form;
pub mod http;
pub mod json;

pub use form::FormService;
pub use http::{HttpMethod, HttpTarget, RequestBody};
pub use json::JsonService;
