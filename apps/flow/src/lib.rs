//! Client side of the interview prep flow: signup, resume upload, job pick,
//! mock interview and feedback, driven against the prep API.

pub mod client;
pub mod config;
pub mod storage;
pub mod views;
pub mod walkthrough;

#[cfg(test)]
pub(crate) mod testing;
