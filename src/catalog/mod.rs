//! Calibration line catalogs.
//!
//! The catalog holds named lists of rest-frame lines. An embedded catalog is
//! compiled into the binary, but custom catalogs can also be loaded from JSON
//! files, or single lists from TSV/CSV tables (see [`crate::parsing::calibration`]).
//!
//! ## Embedded Catalog
//!
//! - **air**: Optical lines at air wavelengths (O II through the S II doublet)
//! - **vacuum**: The same lines at vacuum wavelengths, plus UV lines (Lyα, C IV, C III], Mg II)
//!
//! Both lists contain the N II and S II doublets, so names repeat. Lines are
//! identified by position; see [`crate::matching::DuplicateNamePolicy`].
//!
//! ## Example
//!
//! ```rust
//! use line_ratio::LineCatalog;
//!
//! let catalog = LineCatalog::load_embedded().unwrap();
//! for list in &catalog.lists {
//!     println!("{}: {} lines", list.id, list.lines.len());
//! }
//!
//! let air = catalog.get("air").unwrap();
//! assert!(air.lines.iter().any(|l| l.name == "Hβ"));
//! ```

pub mod store;
