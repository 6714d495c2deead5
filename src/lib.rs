#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod error;
pub mod geometry;
pub mod history;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod scene;
pub mod session;
pub mod shape;
pub mod surface;
pub mod text_buffer;
pub mod tikz;
pub mod tools;

pub use app::TikzDrawApp;
pub use command::Command;
pub use config::{SettingsStore, ToolKind, ToolSettings};
pub use error::{BufferError, SessionError, SettingsError};
pub use history::{HistoryManager, HistorySink};
pub use input::{InputEvent, InputHandler};
pub use renderer::Renderer;
pub use scene::Scene;
pub use session::DrawingSession;
pub use shape::{Color, Fill, Shape, ShapeKind};
pub use surface::{RecordingSurface, Surface};
pub use text_buffer::{DocumentBuffer, TextBuffer};
pub use tools::{TextPrompt, Tool};
