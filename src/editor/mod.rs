//! Scene state and pointer/keyboard dispatch for the shape editor.

mod click;
mod factory;
mod hit;
mod shapes;
mod view;

use glam::Affine2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::geometry::{offset_rect, rect_from_points, Color, Point, Rect};
use crate::input::{resolve_key, ChannelStep, ColorChannel, EditorCommand, EditorKey};
use crate::render::{Paint, Surface};

pub use click::{ClickError, ClickResult, ClickSession, ClickState, DragMode};
pub use factory::{
    random_color, AssetError, AssetResult, BitmapLoader, ImageFileLoader, ShapeFactory,
    DEFAULT_ASSETS,
};
pub use hit::{
    draw_highlight, resize_corner_at, top_shape_index_at, CornerHit, ResizeCorner, CORNER_SIZE,
};
pub use shapes::{regular_polygon, BitmapShape, PolygonShape, RectShape, Shape};
pub use view::{ViewTransform, ROTATE_STEP, SCALE_STEP};

/// Window-side services the editor calls back into.
pub trait WindowHost {
    fn request_draw(&mut self);
    fn set_title(&mut self, title: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Unhandled,
}

impl KeyOutcome {
    pub const fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }
}

const COLOR_STEP: f32 = 0.1;
const ALPHA_MIN: f32 = 0.1;
const BACKGROUND_EXTENT: f32 = 10_000.0;

#[derive(Debug)]
pub struct Editor {
    shapes: Vec<Shape>,
    selected: Option<u64>,
    background: Color,
    view: ViewTransform,
    width: f32,
    height: f32,
    factory: ShapeFactory,
    rng: ChaCha8Rng,
    next_id: u64,
}

impl Editor {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_factory(width, height, ShapeFactory::default(), rand::random())
    }

    pub fn with_factory(width: u32, height: u32, factory: ShapeFactory, seed: u64) -> Self {
        Self {
            shapes: Vec::new(),
            selected: None,
            background: Color::WHITE,
            view: ViewTransform::new(),
            width: width as f32,
            height: height as f32,
            factory,
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_id: 1,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let factory = ShapeFactory::new(config.assets.clone(), Box::new(ImageFileLoader));
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::with_factory(config.window_width, config.window_height, factory, seed)
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: u64) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id() == id)
    }

    fn shape_mut(&mut self, id: u64) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|shape| shape.id() == id)
    }

    pub fn index_of(&self, id: u64) -> Option<usize> {
        self.shapes.iter().position(|shape| shape.id() == id)
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.selected
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.shape(id))
    }

    fn selected_shape_mut(&mut self) -> Option<&mut Shape> {
        let id = self.selected?;
        self.shape_mut(id)
    }

    fn selected_index(&self) -> Option<usize> {
        self.selected.and_then(|id| self.index_of(id))
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn view(&self) -> ViewTransform {
        self.view
    }

    pub fn window_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;
    }

    pub fn view_matrix(&self) -> Affine2 {
        self.view.matrix(self.width, self.height)
    }

    fn view_inverse(&self) -> Affine2 {
        self.view
            .inverse(self.width, self.height)
            .unwrap_or_else(|| {
                tracing::warn!(scale = self.view.scale(), "view transform is singular");
                Affine2::IDENTITY
            })
    }

    /// Returns false when `id` is not in the scene.
    pub fn select(&mut self, id: u64) -> bool {
        if self.index_of(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Appends a rectangle on top without changing the selection.
    pub fn insert_rectangle(&mut self, rect: Rect, color: Color) -> u64 {
        let id = self.allocate_id();
        let mut shape = Shape::Rectangle(RectShape::new(id, color));
        shape.set_rect(rect);
        self.shapes.push(shape);
        id
    }

    /// Builds the shape for construction slot `index`, appends and selects it.
    pub fn add_shape_from_slot(&mut self, index: usize) -> AppResult<Option<u64>> {
        let id = self.next_id;
        let Some(shape) = self.factory.make(index, id, &mut self.rng)? else {
            return Ok(None);
        };
        self.allocate_id();
        tracing::debug!(id, index, kind = shape.kind_label(), "shape constructed");
        self.shapes.push(shape);
        self.selected = Some(id);
        Ok(Some(id))
    }

    /// Removes `id`, clearing the selection if it pointed there.
    pub fn remove_shape(&mut self, id: u64) -> Option<Shape> {
        let index = self.index_of(id)?;
        let shape = self.shapes.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(shape)
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.selected {
            Some(id) => self.remove_shape(id).is_some(),
            None => false,
        }
    }

    /// Swaps the selection with the shape above it.
    pub fn raise_selected(&mut self) -> bool {
        let Some(index) = self.selected_index() else {
            return false;
        };
        if index + 1 >= self.shapes.len() {
            return false;
        }
        self.shapes.swap(index, index + 1);
        true
    }

    /// Swaps the selection with the shape below it.
    pub fn lower_selected(&mut self) -> bool {
        let Some(index) = self.selected_index() else {
            return false;
        };
        if index == 0 {
            return false;
        }
        self.shapes.swap(index, index - 1);
        true
    }

    /// Steps one channel of the selection's color, or of the background
    /// when nothing is selected.
    pub fn adjust_channel(&mut self, channel: ColorChannel, step: ChannelStep) {
        let mut color = self.current_color();
        let delta = COLOR_STEP * step.sign();
        match channel {
            ColorChannel::Alpha => color.a += delta,
            ColorChannel::Red => color.r += delta,
            ColorChannel::Green => color.g += delta,
            ColorChannel::Blue => color.b += delta,
        }
        let color = constrain_color(color);
        match self.selected_shape_mut() {
            Some(shape) => shape.set_color(color),
            // The background stays opaque.
            None => self.background = Color { a: 1.0, ..color },
        }
    }

    fn current_color(&self) -> Color {
        self.selected_shape()
            .map(Shape::color)
            .unwrap_or(self.background)
    }

    pub fn title(&self) -> String {
        let color = self.current_color();
        format!(
            "R:{:02X}  G:{:02X}  B:{:02X}  A:{:02X}",
            title_byte(color.r),
            title_byte(color.g),
            title_byte(color.b),
            title_byte(color.a)
        )
    }

    fn update_title(&self, host: &mut dyn WindowHost) {
        host.set_title(&self.title());
    }

    pub fn on_key_press(&mut self, key: EditorKey, host: &mut dyn WindowHost) -> KeyOutcome {
        let Some(command) = resolve_key(key) else {
            tracing::trace!(?key, "unhandled key");
            return KeyOutcome::Unhandled;
        };
        self.execute(command, host)
    }

    pub fn execute(&mut self, command: EditorCommand, host: &mut dyn WindowHost) -> KeyOutcome {
        tracing::debug!(?command, "execute editor command");
        match command {
            EditorCommand::NewShape(index) => match self.add_shape_from_slot(index) {
                Ok(Some(_)) => {
                    self.update_title(host);
                    host.request_draw();
                    KeyOutcome::Handled
                }
                Ok(None) => KeyOutcome::Unhandled,
                Err(err) => {
                    tracing::warn!(%err, index, "failed to construct shape");
                    KeyOutcome::Unhandled
                }
            },
            EditorCommand::RotateCounterClockwise => {
                self.view.rotate_counter_clockwise();
                host.request_draw();
                KeyOutcome::Handled
            }
            EditorCommand::RotateClockwise => {
                self.view.rotate_clockwise();
                host.request_draw();
                KeyOutcome::Handled
            }
            EditorCommand::ZoomOut => {
                self.view.zoom_out();
                host.request_draw();
                KeyOutcome::Handled
            }
            EditorCommand::ZoomIn => {
                self.view.zoom_in();
                host.request_draw();
                KeyOutcome::Handled
            }
            EditorCommand::RaiseSelection => redraw_if(self.raise_selected(), host),
            EditorCommand::LowerSelection => redraw_if(self.lower_selected(), host),
            EditorCommand::DeleteSelection => {
                if !self.delete_selected() {
                    return KeyOutcome::Unhandled;
                }
                self.update_title(host);
                host.request_draw();
                KeyOutcome::Handled
            }
            EditorCommand::AdjustChannel(channel, step) => {
                self.adjust_channel(channel, step);
                self.update_title(host);
                host.request_draw();
                KeyOutcome::Handled
            }
        }
    }

    /// Resolves what a pointer-down at window location `loc` grabs and
    /// applies the initial update.
    pub fn begin_click(&mut self, loc: Point, host: &mut dyn WindowHost) -> ClickSession {
        let inverse = self.view_inverse();
        let mode = self.resolve_click_target(inverse.transform_point2(loc), host);
        tracing::debug!(?loc, ?mode, "click started");
        let session = ClickSession::new(loc, mode, inverse);
        self.apply_click(&session, host);
        session
    }

    pub fn drag_click(&mut self, session: &mut ClickSession, loc: Point, host: &mut dyn WindowHost) {
        if session.transition(ClickState::Moving, loc).is_ok() {
            self.apply_click(session, host);
        }
    }

    pub fn release_click(
        &mut self,
        mut session: ClickSession,
        loc: Point,
        host: &mut dyn WindowHost,
    ) {
        if session.transition(ClickState::Up, loc).is_ok() {
            self.apply_click(&session, host);
        }
        tracing::debug!(mode = ?session.mode(), "click finished");
    }

    fn resolve_click_target(&mut self, model: Point, host: &mut dyn WindowHost) -> DragMode {
        if let Some(shape) = self.selected_shape() {
            if let Some(hit) = resize_corner_at(&shape.rect(), model) {
                return DragMode::Resize {
                    target: shape.id(),
                    anchor: hit.anchor,
                };
            }
        }

        if let Some(index) = top_shape_index_at(&self.shapes, model) {
            let target = self.shapes[index].id();
            self.selected = Some(target);
            self.update_title(host);
            return DragMode::Move { target };
        }

        let target = self.allocate_id();
        let shape = self.factory.make_rectangle(target, &mut self.rng);
        self.shapes.push(shape);
        self.selected = Some(target);
        self.update_title(host);
        DragMode::Create { target }
    }

    fn apply_click(&mut self, session: &ClickSession, host: &mut dyn WindowHost) {
        let target = session.mode().target();
        let Some(shape) = self.shape_mut(target) else {
            tracing::debug!(target, "click target no longer in scene");
            return;
        };

        match session.mode() {
            DragMode::Resize { anchor, .. } => {
                shape.set_rect(rect_from_points(session.model_curr(), anchor));
            }
            DragMode::Move { .. } => {
                let delta = session.model_curr() - session.model_prev();
                let moved = offset_rect(&shape.rect(), delta.x, delta.y);
                shape.set_rect(moved);
            }
            DragMode::Create { .. } => {
                if session.state() == ClickState::Up && shape.rect().is_empty() {
                    tracing::debug!(target, "empty new shape discarded");
                    self.remove_shape(target);
                    self.update_title(host);
                    host.request_draw();
                    return;
                }
                shape.set_rect(rect_from_points(session.model_orig(), session.model_curr()));
            }
        }
        self.update_title(host);
        host.request_draw();
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_rect(
            &Rect::wh(BACKGROUND_EXTENT, BACKGROUND_EXTENT),
            &Paint::solid(self.background),
        );

        surface.save();
        surface.concat(&self.view_matrix());
        for shape in &self.shapes {
            shape.draw(surface);
        }
        if let Some(shape) = self.selected_shape() {
            draw_highlight(surface, &shape.rect());
        }
        surface.restore();
    }
}

fn redraw_if(changed: bool, host: &mut dyn WindowHost) -> KeyOutcome {
    if changed {
        host.request_draw();
        KeyOutcome::Handled
    } else {
        KeyOutcome::Unhandled
    }
}

/// Alpha never drops below 0.1; RGB may reach 0.
pub fn constrain_color(color: Color) -> Color {
    Color {
        r: color.r.clamp(0.0, 1.0),
        g: color.g.clamp(0.0, 1.0),
        b: color.b.clamp(0.0, 1.0),
        a: color.a.clamp(ALPHA_MIN, 1.0),
    }
}

fn title_byte(channel: f32) -> u8 {
    (channel * 255.0) as u8
}
