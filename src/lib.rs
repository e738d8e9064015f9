// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! W-curve line-strip visualization built on wgpu.
//!
//! A W-curve is an ordered list of `[x, y, r, g, b]` records. This crate
//! turns such a curve into a single unlit line-strip, laid out along the
//! depth axis with fixed spacing, and draws it with an orbit camera.
//!
//! # Key entry points
//!
//! - [`curve::build`] - curve records to line-strip geometry attached to a
//!   [`scene::SceneContainer`]
//! - [`loader::CurveLoader`] - fetch-and-parse or direct loads, each
//!   returning its own [`loader::LoadOutcome`]
//! - [`engine::CurveRenderEngine`] - GPU renderer, camera and scene
//! - [`options::Options`] - runtime configuration (curve scales, camera,
//!   display)
//!
//! # Architecture
//!
//! Fetches run on a helper thread ([`loader::PendingLoad`]) or in the
//! browser's event loop (`web` feature). Parsing and geometry building
//! always happen on the thread that owns the scene [`scene::Group`]; the
//! renderer uploads it to per-curve vertex buffers and patches recolored
//! segments in place.

pub mod camera;
pub mod curve;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod gpu;
pub mod input;
pub mod loader;
pub mod options;
pub mod renderer;
pub mod scene;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(feature = "web")]
pub mod web;

pub use engine::CurveRenderEngine;
pub use error::WCurveError;
pub use input::InputEvent;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
