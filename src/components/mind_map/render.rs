//! Canvas rendering for the mind map.
//!
//! Draws one [`Frame`] in passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Link lines with arrowheads, then node circles and labels (world space)
//! 3. Hover tooltip (screen space)

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::interaction::Tooltip;
use super::scene::{Frame, FrameLink, FrameNode};
use super::theme::Theme;
use super::types::Point;
use super::view::ViewTransform;

/// Renders the complete mind map to the canvas.
pub fn render(
	ctx: &CanvasRenderingContext2d,
	frame: &Frame,
	tooltip: &Tooltip,
	view: &ViewTransform,
	theme: &Theme,
	width: f64,
	height: f64,
) {
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, width, height);

	ctx.save();
	let _ = ctx.translate(view.x, view.y);
	let _ = ctx.scale(view.k, view.k);

	for link in &frame.links {
		draw_link(ctx, link, theme);
	}
	for node in &frame.nodes {
		draw_node(ctx, node, theme);
	}

	ctx.restore();

	if tooltip.is_visible() {
		draw_tooltip(ctx, tooltip, view, theme);
	}
}

fn draw_link(ctx: &CanvasRenderingContext2d, link: &FrameLink, theme: &Theme) {
	let (dx, dy) = (link.x2 - link.x1, link.y2 - link.y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	let style = &theme.edge;

	ctx.set_stroke_style_str(&style.color.to_css());
	ctx.set_line_width(style.width);
	ctx.begin_path();
	ctx.move_to(link.x1, link.y1);
	ctx.line_to(link.x2, link.y2);
	ctx.stroke();

	if !link.arrowhead {
		return;
	}

	ctx.set_fill_style_str(&style.color.to_css());
	let (tip_x, tip_y) = (link.x2 - ux * link.target_radius, link.y2 - uy * link.target_radius);
	let (back_x, back_y) = (tip_x - ux * style.arrow_size, tip_y - uy * style.arrow_size);
	let (px, py) = (-uy * style.arrow_size * 0.5, ux * style.arrow_size * 0.5);

	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_node(ctx: &CanvasRenderingContext2d, node: &FrameNode, theme: &Theme) {
	let style = &theme.node;

	ctx.begin_path();
	let _ = ctx.arc(node.x, node.y, node.radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&node.fill.to_css());
	ctx.fill();

	if style.border_width > 0.0 {
		ctx.set_stroke_style_str(&node.fill.darken(0.25).to_css());
		ctx.set_line_width(style.border_width);
		ctx.stroke();
	}

	ctx.set_fill_style_str(&style.label_color.to_css());
	ctx.set_font(&style.label_font);
	ctx.set_text_align("center");
	let _ = ctx.fill_text(&node.label, node.x, node.y + style.label_dy);
	ctx.set_text_align("start");
}

fn draw_tooltip(
	ctx: &CanvasRenderingContext2d,
	tooltip: &Tooltip,
	view: &ViewTransform,
	theme: &Theme,
) {
	let Some(content) = tooltip.content() else {
		return;
	};
	let style = &theme.tooltip;
	let config = tooltip.config();
	let anchor = view.graph_to_screen(tooltip.anchor());
	let origin = Point::new(anchor.x + config.offset_x, anchor.y + config.offset_y);

	ctx.set_font(&style.title_font);
	let title_width = ctx
		.measure_text(&content.title)
		.map(|m| m.width())
		.unwrap_or(0.0);
	ctx.set_font(&style.body_font);
	let body_width = ctx
		.measure_text(&content.body)
		.map(|m| m.width())
		.unwrap_or(0.0);

	let box_width = title_width.max(body_width) + style.padding * 2.0;
	let box_height = style.line_height * 2.0 + style.padding * 2.0;

	ctx.set_global_alpha(tooltip.opacity());

	ctx.set_fill_style_str(&style.background.to_css());
	ctx.fill_rect(origin.x, origin.y, box_width, box_height);
	ctx.set_stroke_style_str(&style.text_color.with_alpha(0.2).to_css());
	ctx.set_line_width(1.0);
	ctx.stroke_rect(origin.x, origin.y, box_width, box_height);

	ctx.set_fill_style_str(&style.text_color.to_css());
	let text_x = origin.x + style.padding;
	let first_line = origin.y + style.padding + style.line_height * 0.8;
	ctx.set_font(&style.title_font);
	let _ = ctx.fill_text(&content.title, text_x, first_line);
	ctx.set_font(&style.body_font);
	let _ = ctx.fill_text(&content.body, text_x, first_line + style.line_height);

	ctx.set_global_alpha(1.0);
}
