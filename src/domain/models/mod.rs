mod completion;
mod persona;
mod transcript;
mod turn;

pub use completion::*;
pub use persona::*;
pub use transcript::*;
pub use turn::*;
