pub mod auth;
pub mod import;
pub mod password;
pub mod rounds;
pub mod seed;
pub mod token;

pub use auth::AuthService;
pub use import::CourseImporter;
pub use rounds::RoundRecorder;
