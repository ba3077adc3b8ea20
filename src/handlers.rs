pub mod auth;
pub mod branding;
pub mod canchas;
pub mod clientes;
pub mod clubs;
pub mod documentos;
pub mod horarios;
pub mod publico;
pub mod reservas;
pub mod roles;
pub mod tarifas;
