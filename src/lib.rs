//! mindmap: an interactive force-directed mind-map editor.
//!
//! This crate provides a WASM-based editor where a central topic is surrounded
//! by categorized concept nodes, laid out by a physics simulation with
//! drag-to-reposition, pan/zoom, and hover tooltips.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::mind_map::{
	Command, CommandError, CommandPanel, GraphSession, MindMapCanvas, MindMapConfig,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("mindmap: logging initialized");
}

/// Load editor configuration from a script element with id="mind-map-config".
/// Expected format: partial JSON, e.g. { "layout": { "link_distance": 120 } }
fn load_config() -> Option<MindMapConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("mind-map-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match MindMapConfig::from_json(&json_text) {
		Ok(config) => {
			info!("mindmap: loaded configuration");
			Some(config)
		}
		Err(e) => {
			warn!("mindmap: failed to parse configuration: {}", e);
			None
		}
	}
}

/// Main application component.
/// Creates one editor session and renders the canvas with its command panel.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config().unwrap_or_default();
	let (width, height) = web_sys::window()
		.map(|w| components::mind_map::window_size(&w))
		.unwrap_or((800.0, 600.0));
	let session = Rc::new(RefCell::new(GraphSession::new(config, width, height)));

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Mind Map" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<MindMapCanvas session=session.clone() />
			<div class="graph-overlay">
				<h1>"Mind Map"</h1>
				<p class="subtitle">"Drag nodes to reposition. Scroll to zoom. Drag background to pan."</p>
				<CommandPanel session=session />
			</div>
		</div>
	}
}
