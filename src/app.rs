use std::cell::RefCell;
use std::rc::Rc;

use egui::Vec2;
use log::{info, warn};

use crate::config::{SettingsStore, ToolSettings};
use crate::input::InputHandler;
use crate::panels::{canvas_panel, central_panel, preview_panel, tools_panel};
use crate::session::DrawingSession;
use crate::text_buffer::DocumentBuffer;

pub const CANVAS_SIZE: Vec2 = Vec2::new(600.0, 400.0);

const STARTER_DOCUMENT: &str = "\\documentclass{article}\n\\usepackage{tikz}\n\n\\begin{document}\n\n\\end{document}\n";

enum DrawingAction {
    Insert,
    Cancel,
}

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct TikzDrawApp {
    document: DocumentBuffer,
    settings: ToolSettings,

    #[serde(skip)]
    session: DrawingSession,
    #[serde(skip)]
    input: InputHandler,
    /// Shared with the session's text prompt.
    #[serde(skip)]
    label: Rc<RefCell<String>>,
    #[serde(skip)]
    settings_store: Option<SettingsStore>,
    #[serde(skip)]
    status: Option<String>,
}

impl Default for TikzDrawApp {
    fn default() -> Self {
        let label = Rc::new(RefCell::new(String::from("label")));
        let prompt_label = Rc::clone(&label);
        let settings = ToolSettings::default();
        let session = DrawingSession::new(settings.clone(), CANVAS_SIZE).with_text_prompt(Box::new(
            move |_anchor: egui::Pos2| {
                let text = prompt_label.borrow().trim().to_string();
                (!text.is_empty()).then_some(text)
            },
        ));

        Self {
            document: DocumentBuffer::new(STARTER_DOCUMENT),
            settings,
            session,
            input: InputHandler::new(),
            label,
            settings_store: None,
            status: None,
        }
    }
}

impl TikzDrawApp {
    /// Called once before the first frame.
    ///
    /// Tool settings come from `settings_store` when given, otherwise from
    /// the eframe storage.
    pub fn new(cc: &eframe::CreationContext<'_>, settings_store: Option<SettingsStore>) -> Self {
        let mut app: Self = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        if let Some(store) = &settings_store {
            match store.load() {
                Ok(settings) => app.settings = settings,
                Err(err) => warn!("Could not load settings from {}: {err}", store.path().display()),
            }
        }
        app.settings_store = settings_store;
        app.apply_settings();
        app
    }

    fn apply_settings(&mut self) {
        let tool = self.settings.tool;
        *self.session.settings_mut() = self.settings.clone();
        self.session.select_tool(tool);
    }

    pub fn document(&self) -> &DocumentBuffer {
        &self.document
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    fn open_drawing(&mut self) {
        if !self.session.is_open() {
            self.session.open();
            self.status = None;
        }
    }

    fn insert_drawing(&mut self) {
        match self.session.insert_into(&mut self.document) {
            Ok(()) => self.status = Some("Drawing inserted".to_string()),
            Err(err) => {
                warn!("{err}");
                self.status = Some(err.to_string());
            }
        }
    }

    fn drawing_window(&mut self, ctx: &egui::Context) {
        if !self.session.is_open() {
            return;
        }

        let mut open = true;
        let mut action = None;
        egui::Window::new("Drawing")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                tools_panel(ui, &mut self.session, &mut self.label.borrow_mut());
                ui.separator();
                canvas_panel(ui, &mut self.session, &mut self.input);
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Insert").clicked() {
                        action = Some(DrawingAction::Insert);
                    }
                    if ui.button("Cancel").clicked() {
                        action = Some(DrawingAction::Cancel);
                    }
                });
            });

        match action {
            Some(DrawingAction::Insert) => self.insert_drawing(),
            Some(DrawingAction::Cancel) => self.session.close(),
            None if !open => self.session.close(),
            None => {}
        }
    }
}

impl eframe::App for TikzDrawApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.settings = self.session.settings().clone();
        eframe::set_value(storage, eframe::APP_KEY, self);

        if let Some(store) = &self.settings_store {
            match store.save(&self.settings) {
                Ok(()) => info!("Settings saved to {}", store.path().display()),
                Err(err) => warn!("Could not save settings: {err}"),
            }
        }
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                let is_web = cfg!(target_arch = "wasm32");
                if !is_web {
                    ui.menu_button("File", |ui| {
                        if ui.button("Quit").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                    ui.add_space(16.0);
                }

                if ui
                    .add_enabled(!self.session.is_open(), egui::Button::new("Insert drawing"))
                    .clicked()
                {
                    self.open_drawing();
                }

                if let Some(status) = &self.status {
                    ui.add_space(16.0);
                    ui.label(status);
                }
            });
        });

        egui::SidePanel::right("preview_panel")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                preview_panel(ui, self.document.text());
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            central_panel(ui, &mut self.document);
        });

        self.drawing_window(ctx);
    }
}
