pub mod auth;
pub mod documents;
pub mod draft;
pub mod media;
pub mod pricing;
pub mod reservas;
