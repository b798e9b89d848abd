// Mock interview: question supply and answer transcription.
// Both sit behind traits carried in AppState so a real backend can be swapped
// in without touching the handlers.

pub mod handlers;
pub mod questions;
pub mod transcription;
