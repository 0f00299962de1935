pub mod filesystem_organizer;
