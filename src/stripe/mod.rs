pub mod config;
pub mod controller;
pub mod enums;
pub mod errors;
pub mod handlers;
pub mod service;
pub mod signature;
pub mod structs;
