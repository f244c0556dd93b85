pub mod allocator;
pub mod bin;
pub mod catalog;
pub mod courier;
pub mod inventory;
pub mod label;
pub mod loading;
pub mod order;
pub mod product;
pub mod query;
pub mod report;
pub mod seed;
pub mod warehouse;
