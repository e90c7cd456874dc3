//! This file serves as the root for all SeaORM entity modules.
//! The data model for the activity management application lives here:
//! user accounts with student/organizer profiles, semesters, activities,
//! and the participation join entity with its complaints.

pub mod activity;
pub mod complaint;
pub mod notification;
pub mod organizer;
pub mod participation;
pub mod semester;
pub mod student;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::activity::Entity as Activity;
    pub use super::complaint::Entity as Complaint;
    pub use super::notification::Entity as Notification;
    pub use super::organizer::Entity as Organizer;
    pub use super::participation::Entity as Participation;
    pub use super::semester::Entity as Semester;
    pub use super::student::Entity as Student;
    pub use super::user::Entity as User;
}
