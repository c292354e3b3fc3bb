pub mod procedures;

pub use procedures::{Add, Fail, FailRequest, Ping};
