use crate::config;
use crate::events::AppEvent;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::wheel;
use gtk::prelude::*;
use gtk4 as gtk;
use plutchik::{Point, Viewport, Wheel};
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub struct AppModel {
    pub wheel: Rc<RefCell<Wheel>>,
    pub wheel_area: gtk::DrawingArea,
    pub detail_area: gtk::DrawingArea,
    ticking: Rc<Cell<bool>>,
}

#[derive(Debug)]
pub enum AppMsg {
    CursorMove(Point),
    CursorLeave,
    Reset,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn redraw(&self) {
        self.wheel_area.queue_draw();
        self.detail_area.queue_draw();
    }

    /// Runs the frame clock until springs and the detail fade are at rest.
    fn start_ticking(&self) {
        if self.ticking.replace(true) {
            return;
        }

        let wheel = self.wheel.clone();
        let detail_area = self.detail_area.clone();
        let ticking = self.ticking.clone();
        let last_frame = Cell::new(None::<i64>);
        self.wheel_area.add_tick_callback(move |area, clock| {
            let now = clock.frame_time();
            let dt = last_frame
                .replace(Some(now))
                .map_or(0.0, |prev| (now - prev) as f64 / 1_000_000.0);

            let moving = wheel.borrow_mut().tick(dt);
            area.queue_draw();
            detail_area.queue_draw();

            if moving {
                glib::ControlFlow::Continue
            } else {
                ticking.set(false);
                glib::ControlFlow::Break
            }
        });
    }

    fn to_logical(&self, point: Point) -> Option<Point> {
        let viewport = self.wheel.borrow().config().viewport;
        Viewport::fit(
            viewport,
            self.wheel_area.width() as f64,
            self.wheel_area.height() as f64,
        )
        .to_logical(point)
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Wheel, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Emotion Wheel"),
            set_default_size: (1200, 820),
            add_css_class: "emowheel-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Reset);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Horizontal,

                #[name = "wheel_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "emowheel-wheel",

                    add_controller = gtk::EventControllerMotion {
                        connect_motion[sender] => move |_, x, y| {
                            sender.input(AppMsg::CursorMove(Point::new(x, y)));
                        },
                        connect_leave[sender] => move |_| {
                            sender.input(AppMsg::CursorLeave);
                        }
                    }
                },

                #[name = "detail_area"]
                gtk::DrawingArea {
                    set_width_request: 340,
                    set_vexpand: true,
                    add_css_class: "emowheel-detail",
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (wheel, rx) = init;

        theme::load_css();

        let model = AppModel {
            wheel: Rc::new(RefCell::new(wheel)),
            wheel_area: gtk::DrawingArea::default(),
            detail_area: gtk::DrawingArea::default(),
            ticking: Rc::new(Cell::new(false)),
        };

        let widgets = view_output!();

        let mut model = model;
        model.wheel_area = widgets.wheel_area.clone();
        model.detail_area = widgets.detail_area.clone();

        let wheel_draw = model.wheel.clone();
        widgets
            .wheel_area
            .set_draw_func(move |area, cr, width, height| {
                let colors = ThemeColors::from_context(&area.style_context());
                let scene = wheel_draw.borrow().scene();
                if let Err(e) = wheel::draw_wheel(cr, &scene, width as f64, height as f64, &colors)
                {
                    log::error!("Drawing error: {}", e);
                }
            });

        let detail_draw = model.wheel.clone();
        widgets
            .detail_area
            .set_draw_func(move |area, cr, width, height| {
                let colors = ThemeColors::from_context(&area.style_context());
                let wheel = detail_draw.borrow();
                if let Err(e) = wheel::draw_detail(
                    cr,
                    wheel.detail().layer(),
                    width as f64,
                    height as f64,
                    &colors,
                ) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let changed = match msg {
            AppMsg::CursorMove(point) => match self.to_logical(point) {
                Some(point) => self.wheel.borrow_mut().pointer_moved(point),
                None => false,
            },
            AppMsg::CursorLeave => self.wheel.borrow_mut().pointer_left(),
            AppMsg::Reset => self.wheel.borrow_mut().reset(),
            AppMsg::ConfigReload => {
                match config::reload_wheel(&mut self.wheel.borrow_mut()) {
                    Ok(()) => log::info!("Configuration reloaded"),
                    Err(e) => log::error!("Failed to reload config: {}", e),
                }
                true
            }
        };

        if changed {
            self.redraw();
            self.start_ticking();
        }
    }
}
