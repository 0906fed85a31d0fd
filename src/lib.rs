//! Procedural AEYE.NG app icons and web app installability checks.
//!
//! The rendering side draws the icon set in one of two styles
//! ([`style::LogoStyle::classic`], [`style::LogoStyle::professional`]) and
//! writes it with [`icon_gen::generate_icons`]. The checking side lives in
//! [`checklist`].

pub mod checklist;
pub mod cli;
pub mod error;
pub mod gradient;
pub mod icon_gen;
pub mod layout;
pub mod logo;
pub mod raster;
pub mod style;
pub mod text;

pub use error::{Error, Result};
