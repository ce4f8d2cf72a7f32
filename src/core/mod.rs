//! Core TMM solver
//!
//! ## Architecture
//!
//! - `types`: model tags, parameter schemas/values, sweep results
//! - `constants`: reference air properties and numeric guards
//! - `error`: crate error type
//! - `media`: per-model wave physics (fluid, elastic, poroelastic)
//! - `layer`: layers and stochastic layers
//! - `interface`: coupling resolution between adjacent media
//! - `backing`: terminating boundary conditions
//! - `assembly`: global linear system construction
//! - `solver`: sweep orchestration and coefficient extraction
//! - `direct`: dense complex LU factorization
//! - `parallel`: portable parallel iteration (rayon or sequential)

pub mod assembly;
pub mod backing;
pub mod constants;
pub mod direct;
pub mod error;
pub mod interface;
pub mod layer;
pub mod media;
pub mod parallel;
pub mod solver;
pub mod types;

// Re-exports for convenience
pub use self::backing::Backing;
pub use self::error::{Result, TmmError};
pub use self::interface::{resolve, Coupling};
pub use self::layer::{Layer, StochasticLayer};
pub use self::media::{Elastic, Fluid, Medium, Poroelastic};
pub use self::solver::Solver;
pub use self::types::*;
