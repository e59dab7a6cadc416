// Two security tiers:
// Public (no credential) → Protected (cookie-verified credential)
pub mod protected;
pub mod public;
