// Domain layer - Core types, naming rules and errors

pub mod errors;
pub mod model;
pub mod rules;
