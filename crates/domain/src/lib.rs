#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;

mod error;
mod exercise;
mod profile;
mod service;
mod statistics;
mod training;
mod user_max;
mod workout;
mod workout_session;

pub use error::*;
pub use exercise::*;
pub use profile::*;
pub use service::*;
pub use statistics::*;
pub use training::*;
pub use user_max::*;
pub use workout::*;
pub use workout_session::*;
