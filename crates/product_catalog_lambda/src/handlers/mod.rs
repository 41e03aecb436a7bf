pub mod create;
pub mod http;
pub mod list;
pub mod router;
