//! Element generation: elements, step contexts, next-element generators and clusters.
//!
//! A [`cluster::Cluster`] renders its root element, then repeatedly asks its
//! [`next_element::NextElement`] to advance a live copy of it, rendering after every
//! successful step. Branching behaviors spawn child clusters from the live element,
//! bounded by an explicit depth ceiling.
pub mod cluster;
pub mod element;
pub mod next_element;
