//! Topic and category entry forms.
//!
//! Translates form input into [`Command`]s on the shared session. Rejected
//! commands are logged and surfaced with a browser alert.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev::{MouseEvent, SubmitEvent};
use leptos::prelude::*;
use log::warn;

use super::error::CommandError;
use super::session::{Command, GraphSession};
use super::types::Category;

fn report(err: &CommandError) {
	warn!("mindmap: command rejected: {err}");
	if let Some(window) = web_sys::window() {
		let _ = window.alert_with_message(&err.to_string());
	}
}

/// Command surface: set the central topic once, then add category nodes.
#[component]
pub fn CommandPanel(session: Rc<RefCell<GraphSession>>) -> impl IntoView {
	let (topic, set_topic) = signal(String::new());
	let (locked, set_locked) = signal(false);
	let (category, set_category) = signal(Category::Genre.as_str().to_string());
	let (name, set_name) = signal(String::new());
	let (description, set_description) = signal(String::new());

	let session_topic = session.clone();
	let on_set_topic = move |_: MouseEvent| {
		let result = session_topic
			.borrow_mut()
			.execute(Command::set_topic(topic.get_untracked()));
		match result {
			Ok(()) => set_locked.set(true),
			Err(err) => report(&err),
		}
	};

	let session_add = session;
	let on_add = move |ev: SubmitEvent| {
		ev.prevent_default();
		let result = Command::add_category_from_fields(
			&category.get_untracked(),
			&name.get_untracked(),
			&description.get_untracked(),
		)
		.and_then(|command| session_add.borrow_mut().execute(command));
		match result {
			Ok(()) => {
				set_category.set(Category::Genre.as_str().to_string());
				set_name.set(String::new());
				set_description.set(String::new());
			}
			Err(err) => report(&err),
		}
	};

	view! {
		<div class="command-panel">
			<div class="topic">
				<input
					type="text"
					placeholder="Central topic"
					prop:value=topic
					prop:disabled=locked
					on:input=move |ev| set_topic.set(event_target_value(&ev))
				/>
				<button prop:disabled=locked on:click=on_set_topic>
					"Set Topic"
				</button>
			</div>
			<form class="categories" class:hidden=move || !locked.get() on:submit=on_add>
				<select
					prop:value=category
					on:change=move |ev| set_category.set(event_target_value(&ev))
				>
					{Category::ALL
						.into_iter()
						.map(|c| view! { <option value=c.as_str()>{c.as_str()}</option> })
						.collect_view()}
				</select>
				<input
					type="text"
					placeholder="Node name"
					prop:value=name
					on:input=move |ev| set_name.set(event_target_value(&ev))
				/>
				<textarea
					placeholder="Description"
					prop:value=description
					on:input=move |ev| set_description.set(event_target_value(&ev))
				/>
				<button type="submit">"Add Node"</button>
			</form>
		</div>
	}
}
