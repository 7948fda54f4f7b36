//! Darknet `.cfg` network descriptions as read-only computation graphs.
//!
//! ```no_run
//! use darknet_graph::{Metadata, open};
//!
//! let metadata = Metadata::open(Metadata::FILE_NAME);
//! let text = std::fs::read_to_string("yolov3.cfg").unwrap();
//! let model = open("yolov3.cfg", &text, &metadata).unwrap();
//! for node in &model.graphs()[0].nodes {
//!     println!("{} {}", node.name, node.operator);
//! }
//! ```

pub mod cfg;
pub mod diagnostics;
pub mod error;
pub mod factory;
pub mod metadata;
pub mod model;
pub mod render;

pub use error::{CfgError, Error};
pub use factory::{matches, open};
pub use metadata::Metadata;
pub use model::{Graph, Model, Node};
