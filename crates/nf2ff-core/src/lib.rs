//! # nf2ff Core
//!
//! Projects near-field data recorded on planar surface monitors to the far
//! field using the surface equivalence principle. Tangential E and H on each
//! monitor are replaced by equivalent surface currents
//! $\mathbf{J} = \hat{\mathbf{n}} \times \mathbf{H}$ and
//! $\mathbf{M} = -\hat{\mathbf{n}} \times \mathbf{E}$, which are integrated
//! against the Fraunhofer phase kernel to form the radiation vectors
//! $\mathbf{N}$ and $\mathbf{L}$. Fields, power density and radar cross
//! section follow algebraically.
//!
//! ## Architecture
//!
//! Queries go through the [`projection::FarFieldProjector`] trait, which
//! derives every far-field quantity from radiation vectors. The
//! implementation for recorded monitor data is [`projection::Near2Far`].
//!
//! ## Modules
//!
//! - [`types`]: Constants, parameters, radiation vectors and result containers.
//! - [`currents`]: Equivalent surface currents extracted from monitor data.
//! - [`radiation`]: Phase-compensated surface integrals (radiation vectors).
//! - [`fields`]: E/H fields, Poynting power, RCS and sampled patterns.
//! - [`projection`]: Projector trait, the `Near2Far` engine and setup errors.

pub mod currents;
pub mod fields;
pub mod projection;
pub mod radiation;
pub mod types;

pub use projection::{FarFieldProjector, Near2Far, SetupError};
