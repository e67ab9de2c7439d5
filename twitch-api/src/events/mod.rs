pub mod chat;
pub mod stream;
pub mod subscription;
pub mod types;
