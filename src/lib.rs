//! resiliency-flow: a terminal client for the energy resiliency projects
//! service that animates each request's path through the system.

pub mod actions;
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod flow;
pub mod logging;
pub mod ui;
