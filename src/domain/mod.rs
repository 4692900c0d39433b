// Domain types and transformations for docgraph.

pub mod docmodel;
pub mod error;
pub mod graph;
pub mod layout;
pub mod seealso;
