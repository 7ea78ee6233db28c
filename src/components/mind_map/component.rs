//! Leptos component wrapping the mind-map canvas.
//!
//! The component creates a fullscreen canvas and forwards mouse and wheel
//! events to the shared [`GraphSession`]. An animation loop runs via
//! `requestAnimationFrame`, stepping the layout and redrawing each frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::session::GraphSession;
use super::types::Point;

/// Current viewport size of the browser window.
pub(crate) fn window_size(window: &Window) -> (f64, f64) {
	let dim = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	(
		dim(window.inner_width(), 800.0),
		dim(window.inner_height(), 600.0),
	)
}

/// Pointer position relative to the canvas' top-left corner.
fn canvas_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Point {
	let rect = canvas.get_bounding_client_rect();
	Point::new(
		client_x as f64 - rect.left(),
		client_y as f64 - rect.top(),
	)
}

/// Renders the interactive mind map on a fullscreen canvas element.
#[component]
pub fn MindMapCanvas(session: Rc<RefCell<GraphSession>>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let size: Rc<RefCell<(f64, f64)>> = Rc::new(RefCell::new((0.0, 0.0)));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (session_init, size_init, animate_init, resize_cb_init) = (
		session.clone(),
		size.clone(),
		animate.clone(),
		resize_cb.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = window_size(&window);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		*size_init.borrow_mut() = (w, h);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::warn!("mindmap: canvas has no 2d context");
			return;
		};

		let (size_resize, canvas_resize) = (size_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = window_size(&win);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			*size_resize.borrow_mut() = (nw, nh);
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (session_anim, size_anim, animate_inner) =
			(session_init.clone(), size_init.clone(), animate_init.clone());
		let mut last = js_sys::Date::now();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = ((now - last) / 1000.0).clamp(0.0, 0.1);
			last = now;

			{
				let mut s = session_anim.borrow_mut();
				s.tick(dt);
				let (w, h) = *size_anim.borrow();
				render::render(
					&ctx,
					&s.frame(),
					s.tooltip(),
					s.view(),
					s.scene().theme(),
					w,
					h,
				);
			}

			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let pointer = move |ev: &MouseEvent| -> Option<Point> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		Some(canvas_point(&canvas, ev.client_x(), ev.client_y()))
	};

	let session_md = session.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some(p) = pointer(&ev) {
			session_md.borrow_mut().pointer_down(p);
		}
	};

	let session_mm = session.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some(p) = pointer(&ev) {
			session_mm.borrow_mut().pointer_move(p);
		}
	};

	let session_mu = session.clone();
	let on_mouseup = move |ev: MouseEvent| {
		if let Some(p) = pointer(&ev) {
			session_mu.borrow_mut().pointer_up(p);
		}
	};

	let session_ml = session.clone();
	let on_mouseleave = move |ev: MouseEvent| {
		if let Some(p) = pointer(&ev) {
			session_ml.borrow_mut().pointer_leave(p);
		}
	};

	let session_wh = session;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: Option<HtmlCanvasElement> = canvas_ref.get().map(Into::into);
		if let Some(canvas) = canvas {
			let p = canvas_point(&canvas, ev.client_x(), ev.client_y());
			session_wh.borrow_mut().wheel(p, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="mind-map-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
