// Domain layer - Dashboard input model and the documentation built from it
pub mod dashboard;
pub mod document;
