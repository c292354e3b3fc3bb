mod generate_call_key;
mod increment_call_index;
mod now;

pub use generate_call_key::generate_call_key;
pub use increment_call_index::increment_call_index;
pub use now::now;
