pub mod assignments;

pub mod auth;

pub mod classes;

pub mod enrollments;

pub mod files;

pub mod frontend;

pub mod materials;

pub mod submissions;

pub use assignments::configure_assignments_routes;
pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use enrollments::configure_enrollments_routes;
pub use files::configure_file_routes;
pub use frontend::configure_frontend_routes;
pub use materials::configure_materials_routes;
pub use submissions::configure_submissions_routes;
