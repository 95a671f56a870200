pub mod card;
pub mod detail;
pub mod pages;
