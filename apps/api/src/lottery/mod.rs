// Lottery ticket page: quick-pick sampling, ticket ids, thermal receipt preview.

pub mod handlers;
pub mod receipt;
pub mod sampler;
pub mod ticket;

pub use sampler::SampleError;
pub use ticket::{PickRules, Ticket};
