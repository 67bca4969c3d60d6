pub mod connection_metadata;
pub mod cors;
pub mod origin_guard;
pub mod panic_handler;
pub mod request_id;
pub mod trace;
