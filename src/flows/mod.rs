pub mod feed;
pub mod results;
pub mod search;
