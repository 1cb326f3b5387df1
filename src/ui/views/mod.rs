pub mod escape;
pub mod final_lock;
pub mod flashcards;
pub mod question;
pub mod quiz;
