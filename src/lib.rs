//! autostop - shuts down idle AWS compute resources to halt billing
//!
//! This crate discovers running EC2 instances, RDS instances and clusters,
//! ECS services and tasks, and Auto Scaling groups, and drives each of them
//! to a stopped / zero-capacity state in a single stateless pass.

pub mod aws;
pub mod config;
pub mod drivers;
pub mod error;
pub mod orchestrator;
pub mod pagination;
pub mod providers;
