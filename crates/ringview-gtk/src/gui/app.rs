use crate::events::AppEvent;
use crate::gui::ring::{self, RingState};
use crate::gui::theme::{self, ThemeColors};
use crate::sys::launch;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use ringview::config;
use ringview::{Delegate, InteractionOutcome, Point};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Forwards selections from the ring back into the component's message queue.
pub struct SelectionForwarder {
    sender: ComponentSender<AppModel>,
}

impl Delegate for SelectionForwarder {
    fn did_select_item(&self, index: usize) {
        self.sender.input(AppMsg::ItemSelected(index));
    }
}

pub struct AppModel {
    pub state: Rc<RefCell<RingState>>,
    pub config_path: Option<PathBuf>,
    pub drawing_area: gtk::DrawingArea,
    // the ring only holds it weakly
    _delegate: Rc<SelectionForwarder>,
}

#[derive(Debug)]
pub enum AppMsg {
    Pressed(Point),
    Moved(Point),
    Released(Point),
    Cancelled,
    ItemSelected(usize),
    Reload,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Reload => AppMsg::Reload,
            AppEvent::Cancel => AppMsg::Cancelled,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        RingState,
        Option<PathBuf>,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Ring"),
            set_default_width: 480,
            set_default_height: 480,
            add_css_class: "ringview-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key {
                        gtk::gdk::Key::Escape => sender.input(AppMsg::Cancelled),
                        gtk::gdk::Key::F5 => sender.input(AppMsg::Reload),
                        _ => return glib::Propagation::Proceed,
                    }
                    glib::Propagation::Stop
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "ringview-drawing-area",

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::Moved(Point::new(x, y)));
                    }
                },

                add_controller = gtk::GestureClick {
                    set_button: gtk::gdk::BUTTON_PRIMARY,
                    connect_pressed[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Pressed(Point::new(x, y)));
                    },
                    connect_released[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Released(Point::new(x, y)));
                    },
                    connect_cancel[sender] => move |_, _| {
                        sender.input(AppMsg::Cancelled);
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, config_path, rx) = init;

        theme::load_css();

        let state = Rc::new(RefCell::new(state));
        let delegate = Rc::new(SelectionForwarder {
            sender: sender.clone(),
        });
        state.borrow_mut().view.set_delegate(&delegate);

        let model = AppModel {
            state: state.clone(),
            config_path,
            drawing_area: gtk::DrawingArea::default(),
            _delegate: delegate,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_resize = model.state.clone();
        widgets.drawing_area.connect_resize(move |_, width, height| {
            state_resize
                .borrow_mut()
                .resize(width as f64, height as f64);
        });

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = ring::draw(cr, &mut state_draw.borrow_mut(), &colors) {
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
        match msg {
            AppMsg::Pressed(point) => {
                let outcome = self.state.borrow_mut().view.begin_interaction(point);
                self.redraw_for(outcome);
            }
            AppMsg::Moved(point) => {
                let outcome = self.state.borrow_mut().view.move_interaction(point);
                self.redraw_for(outcome);
            }
            AppMsg::Released(point) => {
                let outcome = self.state.borrow_mut().view.end_interaction(point);
                self.redraw_for(outcome);
            }
            AppMsg::Cancelled => {
                let outcome = self.state.borrow_mut().view.cancel_interaction();
                self.redraw_for(outcome);
            }
            AppMsg::ItemSelected(index) => {
                let mut state = self.state.borrow_mut();
                let title = state
                    .view
                    .item(index)
                    .map(|item| item.title.to_string())
                    .unwrap_or_default();
                log::info!("Selected item {} '{}'", index, title);

                if let Some(command) = state.source.command_at(index)
                    && let Err(e) = launch::spawn_command(command)
                {
                    log::error!("Failed to run '{}': {}", command, e);
                }
            }
            AppMsg::Reload => {
                self.state.borrow_mut().reload();
                self.drawing_area.queue_draw();
            }
            AppMsg::ConfigReload => {
                let loaded = match &self.config_path {
                    Some(path) => config::load_config_from(path),
                    None => config::load_config(),
                };
                match loaded {
                    Ok(new_config) => {
                        self.state.borrow_mut().apply_config(&new_config);
                        self.drawing_area.queue_draw();
                        log::info!("Configuration reloaded");
                    }
                    Err(e) => log::error!("Failed to reload config: {}", e),
                }
            }
        }
    }
}

impl AppModel {
    fn redraw_for(&self, outcome: InteractionOutcome) {
        if outcome.should_redraw {
            self.drawing_area.queue_draw();
        }
    }
}
