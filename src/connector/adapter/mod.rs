mod mistral_client;
mod mock_completion;

pub use mistral_client::*;
pub use mock_completion::*;
