pub mod activities;
pub mod complaints;
pub mod health;
pub mod notifications;
pub mod organizers;
pub mod participations;
pub mod semesters;
pub mod students;
pub mod users;
