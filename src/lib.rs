//! GraphQL request pipeline: bearer-token authentication, audit logging and
//! request metrics composed as decorators around a query-execution engine.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
