pub mod audit;
pub mod auth;
pub mod blacklist;
pub mod graphql;
pub mod metrics;
pub mod operation_name;
