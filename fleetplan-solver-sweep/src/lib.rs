//! Deterministic sweep solver for the fleetplan engine.
//!
//! This crate provides the default implementations of the core allocation and
//! routing seams: [`SweepAllocator`] partitions stops into capacity-respecting
//! clusters by sweeping a ray around the depot, and [`NearestNeighbourRouter`]
//! orders each cluster greedily from the depot outward.
//!
//! Both passes are deliberately simple heuristics rather than optimising
//! solvers: polynomial, free of randomness, and reproducible byte for byte.
//! Where floating-point comparisons could tie, ordering falls back to the
//! stop identifier so identical requests always yield identical routes.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod geometry;
mod nearest;
mod sweep;

pub use nearest::NearestNeighbourRouter;
pub use sweep::SweepAllocator;
