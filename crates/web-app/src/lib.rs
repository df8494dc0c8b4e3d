#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod app;
pub mod log;
pub mod rest_timer;

pub use app::{App, Error, Intent, Tab};
pub use rest_timer::RestTimer;
