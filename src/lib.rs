// Main library entry point for docgraph.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;
