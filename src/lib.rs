pub mod cli;
pub mod error;
pub mod form;
pub mod geolocation;
pub mod map;
pub mod render;
pub mod session;
pub mod store;
pub mod types;
pub mod utils;
pub mod view;
pub mod workout;
