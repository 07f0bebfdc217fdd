//! HTTP handlers: owners, pets, visits, vets, and the error demonstration.

pub mod crash;
pub mod owner;
pub mod pet;
pub mod vet;
pub mod visit;
pub mod welcome;
