//! # guikit
//!
//! A retained-mode widget toolkit drawn through an abstract render surface.
//!
//! ## Features
//! - Buttons, checkboxes and sliders, each with a flat-shape and a bitmap-skinned variant
//! - Hover / press / release state machine with sounds and delegate callbacks
//! - Nested groups that carry their widgets along when moved
//! - A top-level [`Gui`] that routes input, tracks the interaction lock and picks the cursor
//! - A wgpu + glyphon [`WidgetRenderer`] that turns recorded draw commands into GPU calls
//!
//! ## Example
//!
//! ```no_run
//! use guikit::{Button, Canvas, Gui, InputEvent, Vec2};
//!
//! let mut canvas = Canvas::new(800.0, 600.0);
//! let mut gui = Gui::new(canvas.id());
//!
//! let mut button = Button::new(Vec2::new(50.0, 50.0), Vec2::new(200.0, 60.0)).with_text("Hello");
//! button.set_delegate(|| println!("Hello!"));
//! gui.add_widget(button);
//!
//! canvas.set_pointer(Vec2::new(60.0, 60.0));
//! gui.handle_event(&InputEvent::PointerMoved { position: canvas.pointer() }, &mut canvas)
//!     .expect("widgets are bound to this canvas");
//! gui.draw(&mut canvas).expect("widgets are bound to this canvas");
//! ```

pub mod audio;
pub mod color;
pub mod event;
pub mod font;
mod geometry;
pub mod group;
pub mod gui;
mod renderer;
pub mod skin;
pub mod surface;
pub mod texture;
pub mod widget;

// Resources
pub use audio::{AudioError, AudioHandle, AudioOutput, CheckSoundSet, SoundBuffer, SoundSet, Voice};
pub use font::{Font, FontError};
pub use skin::{SkinFolder, SkinKind};
pub use texture::{Texture, TextureError, TextureId};

// Geometry, input and output
pub use color::Color;
pub use event::{InputEvent, MouseButton};
pub use geometry::Rect;
pub use surface::{Canvas, CursorIcon, DrawCommand, Surface, SurfaceId};

// Widgets and containers
pub use group::{Group, GroupId};
pub use gui::Gui;
pub use widget::{
    BitmapButton, BitmapCheckBox, BitmapSlider, Button, CheckBox, GuiError, Interaction,
    InteractionState, Slider, Widget, WidgetId,
};

// Renderer
pub use renderer::WidgetRenderer;

pub use glam::Vec2;
