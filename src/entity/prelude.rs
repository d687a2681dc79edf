pub use super::assignments::Entity as Assignments;
pub use super::classes::Entity as Classes;
pub use super::enrollments::Entity as Enrollments;
pub use super::files::Entity as Files;
pub use super::materials::Entity as Materials;
pub use super::submissions::Entity as Submissions;
pub use super::users::Entity as Users;
