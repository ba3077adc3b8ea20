pub mod auth;
pub mod cancha;
pub mod cliente;
pub mod club;
pub mod horario;
pub mod membresia;
pub mod reserva;
pub mod tarifa;
