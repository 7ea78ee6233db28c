//! Force-directed mind-map editor.
//!
//! A central topic node is pinned to the canvas center and category nodes
//! (Genre, Species, Genos, Telos) are attached to it, each seeded on its own
//! compass side. The layout runs continuously via an iterative force solver;
//! nodes can be dragged, and hovering shows a description tooltip.
//!
//! The graph logic ([`GraphSession`] and everything it owns) is independent of
//! the DOM. [`MindMapCanvas`] and [`CommandPanel`] wire it to the browser.
//!
//! # Example
//!
//! ```
//! use mindmap::components::mind_map::{Command, GraphSession, MindMapConfig};
//!
//! let mut session = GraphSession::new(MindMapConfig::default(), 800.0, 600.0);
//! session.execute(Command::set_topic("Coffee")).unwrap();
//! session
//!     .execute(Command::add_category_from_fields("Genre", "Espresso", "Strong coffee").unwrap())
//!     .unwrap();
//! assert_eq!(session.frame().links.len(), 1);
//! ```

mod component;
pub mod config;
mod controls;
pub mod error;
pub mod interaction;
mod render;
pub mod scene;
pub mod session;
pub mod simulation;
pub mod store;
pub mod theme;
pub mod types;
pub mod view;

pub(crate) use component::window_size;
pub use component::MindMapCanvas;
pub use config::MindMapConfig;
pub use controls::CommandPanel;
pub use error::{CommandError, StoreError};
pub use session::{Command, GraphSession};
pub use types::{Category, Direction, Group, Link, Node, Point};
