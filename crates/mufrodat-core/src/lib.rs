pub mod book;
pub mod error;
pub mod flashcard;
pub mod language;
pub mod parser;
pub mod preprocess;
pub mod quiz;
pub mod session;
pub mod settings;
pub mod store;
pub mod unscramble;
pub mod view;

pub use error::{CoreError, Result, SessionError, StoreError, ValidationError};
