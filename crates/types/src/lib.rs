//! # geoscan-types
//!
//! Value types shared by the geoscan crates:
//!
//! - **Point**: a 2D coordinate wrapping `geo::Point<f64>`
//! - **Rect**: an axis-aligned rectangle stored as origin plus size
//!
//! Both are `Copy`, serializable with Serde, and convertible to and from the
//! `geo` crate's primitives.
//!
//! ## Examples
//!
//! ```rust
//! use geoscan_types::geo::Point;
//! use geoscan_types::rect::Rect;
//!
//! let p = Point::new(0.0001, 0.0001);
//! let neighborhood = Rect::around(&p, 0.0003);
//! assert!(neighborhood.contains_point(&Point::new(0.0, 0.0)));
//! ```

pub mod geo;
pub mod rect;
