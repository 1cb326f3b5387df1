pub mod answer_order;
pub mod app;
pub mod backend;
pub mod builder;
pub mod config;
pub mod data;
pub mod judge;
pub mod model;
pub mod parser;
pub mod session;
pub mod storage;
pub mod ui;

pub use app::PlayerApp;
