use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow, DrawingArea};

use crate::config::AppConfig;
use crate::editor::{ClickSession, Editor, WindowHost};
use crate::error::{AppError, AppResult};
use crate::geometry::Point;

mod cairo_surface;
mod input_bridge;

use self::cairo_surface::CairoSurface;
use self::input_bridge::editor_key;

const APP_ID: &str = "io.github.shapepad";

/// Routes editor callbacks to the window title and the canvas redraw queue.
struct GtkHost {
    window: ApplicationWindow,
    canvas: DrawingArea,
}

impl WindowHost for GtkHost {
    fn request_draw(&mut self) {
        self.canvas.queue_draw();
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(Some(title));
    }
}

pub fn run(config: AppConfig) -> AppResult<()> {
    let application = Application::builder().application_id(APP_ID).build();
    application.connect_activate(move |application| {
        build_window(application, &config);
    });

    // Pass only argv[0] so GTK does not try to parse our own arguments.
    let gtk_args: Vec<String> = std::env::args().take(1).collect();
    let exit_code = application.run_with_args(&gtk_args);
    if exit_code != gtk4::glib::ExitCode::SUCCESS {
        return Err(AppError::Exit {
            code: exit_code.value(),
        });
    }
    Ok(())
}

fn build_window(application: &Application, config: &AppConfig) {
    let editor = Rc::new(RefCell::new(Editor::from_config(config)));
    let session: Rc<RefCell<Option<ClickSession>>> = Rc::new(RefCell::new(None));

    let window = ApplicationWindow::builder()
        .application(application)
        .default_width(i32::try_from(config.window_width).unwrap_or(i32::MAX))
        .default_height(i32::try_from(config.window_height).unwrap_or(i32::MAX))
        .title(editor.borrow().title())
        .build();
    let canvas = DrawingArea::new();
    canvas.set_hexpand(true);
    canvas.set_vexpand(true);
    canvas.set_focusable(true);
    window.set_child(Some(&canvas));

    let host = Rc::new(RefCell::new(GtkHost {
        window: window.clone(),
        canvas: canvas.clone(),
    }));

    {
        let editor = editor.clone();
        canvas.set_draw_func(move |_, context, width, height| {
            if width <= 0 || height <= 0 {
                return;
            }
            let mut surface = CairoSurface::new(context);
            editor.borrow().draw(&mut surface);
        });
    }

    {
        let editor = editor.clone();
        canvas.connect_resize(move |_, width, height| {
            let width = u32::try_from(width).unwrap_or(0);
            let height = u32::try_from(height).unwrap_or(0);
            tracing::debug!(width, height, "canvas resized");
            editor.borrow_mut().resize(width, height);
        });
    }

    connect_drag_gesture(&canvas, &editor, &session, &host);
    connect_key_controller(&window, &editor, &host);

    tracing::info!("presenting editor window");
    window.present();
    canvas.grab_focus();
}

fn connect_drag_gesture(
    canvas: &DrawingArea,
    editor: &Rc<RefCell<Editor>>,
    session: &Rc<RefCell<Option<ClickSession>>>,
    host: &Rc<RefCell<GtkHost>>,
) {
    let gesture = gtk4::GestureDrag::new();
    gesture.set_button(gtk4::gdk::BUTTON_PRIMARY);

    {
        let editor = editor.clone();
        let session = session.clone();
        let host = host.clone();
        gesture.connect_drag_begin(move |_, start_x, start_y| {
            let loc = Point::new(start_x as f32, start_y as f32);
            let click = editor
                .borrow_mut()
                .begin_click(loc, &mut *host.borrow_mut());
            *session.borrow_mut() = Some(click);
        });
    }

    {
        let editor = editor.clone();
        let session = session.clone();
        let host = host.clone();
        gesture.connect_drag_update(move |gesture, offset_x, offset_y| {
            let Some(loc) = drag_location(gesture, offset_x, offset_y) else {
                return;
            };
            let mut session = session.borrow_mut();
            let Some(click) = session.as_mut() else {
                return;
            };
            editor
                .borrow_mut()
                .drag_click(click, loc, &mut *host.borrow_mut());
        });
    }

    {
        let editor = editor.clone();
        let session = session.clone();
        let host = host.clone();
        gesture.connect_drag_end(move |gesture, offset_x, offset_y| {
            let Some(click) = session.borrow_mut().take() else {
                return;
            };
            let loc = drag_location(gesture, offset_x, offset_y).unwrap_or_else(|| click.curr());
            editor
                .borrow_mut()
                .release_click(click, loc, &mut *host.borrow_mut());
        });
    }

    canvas.add_controller(gesture);
}

fn drag_location(gesture: &gtk4::GestureDrag, offset_x: f64, offset_y: f64) -> Option<Point> {
    let (start_x, start_y) = gesture.start_point()?;
    Some(Point::new(
        (start_x + offset_x) as f32,
        (start_y + offset_y) as f32,
    ))
}

fn connect_key_controller(
    window: &ApplicationWindow,
    editor: &Rc<RefCell<Editor>>,
    host: &Rc<RefCell<GtkHost>>,
) {
    let key_controller = gtk4::EventControllerKey::new();
    let editor = editor.clone();
    let host = host.clone();
    key_controller.connect_key_pressed(move |_, key, _keycode, _modifier| {
        let Some(key) = editor_key(key) else {
            return gtk4::glib::Propagation::Proceed;
        };
        let outcome = editor
            .borrow_mut()
            .on_key_press(key, &mut *host.borrow_mut());
        if outcome.is_handled() {
            gtk4::glib::Propagation::Stop
        } else {
            gtk4::glib::Propagation::Proceed
        }
    });
    window.add_controller(key_controller);
}
