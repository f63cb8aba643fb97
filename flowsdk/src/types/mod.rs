mod holding;
mod stream;
mod token;

pub use holding::*;
pub use stream::*;
pub use token::*;
