pub mod api;
pub mod config;
pub mod desk;
pub mod error;
pub mod event;
pub mod expansion;
pub mod intraday;
pub mod lifecycle;
pub mod local_watchlist;
pub mod logging;
pub mod membership;
pub mod model;
pub mod query;
pub mod scanner;
