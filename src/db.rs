pub mod user_repo;
pub use user_repo::UserRepository;
pub mod club_repo;
pub use club_repo::ClubRepository;
pub mod cancha_repo;
pub use cancha_repo::CanchaRepository;
pub mod tarifa_repo;
pub use tarifa_repo::TarifaRepository;
pub mod reserva_repo;
pub use reserva_repo::ReservaRepository;
pub mod membresia_repo;
pub use membresia_repo::MembresiaRepository;
pub mod cliente_repo;
pub use cliente_repo::ClienteRepository;
pub mod horario_repo;
pub use horario_repo::HorarioRepository;
