// Endpoints reachable without a credential: token issuance plus the
// pass-through catalog reads and order writes.

pub mod orders;
pub mod services;
pub mod token;
