mod envelope;
mod kinds;
mod message;

pub use envelope::*;
pub use kinds::*;
pub use message::*;
