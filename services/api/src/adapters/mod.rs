pub mod collaborator;
pub mod db;
pub mod password;
pub mod token;

pub use collaborator::HttpCollaborator;
pub use db::DbAdapter;
pub use password::Argon2PasswordService;
pub use token::JwtTokenService;
