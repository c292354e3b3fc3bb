mod add;
mod fail;
mod ping;

pub use add::Add;
pub use fail::{Fail, FailRequest};
pub use ping::Ping;
