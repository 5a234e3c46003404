// Library for tests to access modules

pub mod config;
pub mod error;
pub mod fixtures;
pub mod models;
pub mod routes;
pub mod validate;
pub mod worker;
