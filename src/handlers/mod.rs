//! Event Handlers
//!
//! - keyboard: User keyboard input (modal dialogs first, then navigation)

pub mod keyboard;

pub use keyboard::handle_key;
