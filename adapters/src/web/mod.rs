mod http;

pub use http::{get_status, router, serve_status};
