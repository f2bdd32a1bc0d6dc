//! Types shared between the DNA matching client crates: the analysis domain
//! model, the `/dna_matching` wire protocol and the service error body.

pub mod domain;
pub mod error;
pub mod protocol;
