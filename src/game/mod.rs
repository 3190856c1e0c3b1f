pub mod deck;
pub mod session;
