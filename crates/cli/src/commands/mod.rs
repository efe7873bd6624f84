pub mod ask;
pub mod chat;
pub mod config;
pub mod doctor;

mod render;
mod session;
