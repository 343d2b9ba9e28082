pub mod bar;
pub mod filter;
pub mod intraday;
pub mod page;
pub mod scan;
pub mod watchlist;
