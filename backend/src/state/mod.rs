// State management module
// Handles the shared router state

pub mod app_state;

pub use app_state::AppState;
