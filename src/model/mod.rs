//! Core model types and the seams to the syntax tree side of the editor

pub mod collaborators;
pub mod context;
pub mod predicates;
pub mod scripted;
