mod handler;

pub use handler::{check_news, healthz, home};
