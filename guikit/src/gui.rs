//! Top-level GUI manager
//!
//! [`Gui`] owns the top-level widgets and groups bound to one surface, routes
//! input to them and keeps track of which widget holds the pointer.

use glam::Vec2;

use crate::audio::AudioHandle;
use crate::event::InputEvent;
use crate::font::Font;
use crate::group::{bind_widget, Group, GroupId};
use crate::surface::{CursorIcon, Surface, SurfaceId};
use crate::widget::{GuiError, Widget, WidgetId};

pub const DEFAULT_TEXT_SIZE: u32 = 30;

/// Holder of the interaction lock: a top-level widget or a whole group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lock {
    Widget(WidgetId),
    Group(GroupId),
}

pub struct Gui {
    surface: SurfaceId,
    widgets: Vec<(WidgetId, Box<dyn Widget>)>,
    groups: Vec<(GroupId, Group)>,
    font: Option<Font>,
    text_size: u32,
    audio: Option<AudioHandle>,
    arrow: CursorIcon,
    hand: CursorIcon,
    lock: Option<Lock>,
    showing_hand: bool,
}

impl Gui {
    pub fn new(surface: SurfaceId) -> Self {
        Self {
            surface,
            widgets: Vec::new(),
            groups: Vec::new(),
            font: None,
            text_size: DEFAULT_TEXT_SIZE,
            audio: None,
            arrow: CursorIcon::Arrow,
            hand: CursorIcon::Hand,
            lock: None,
            showing_hand: false,
        }
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    /// Replace the default font and hand it to every widget already added.
    pub fn set_default_font(&mut self, font: Font) {
        for (_, widget) in self.widgets.iter_mut() {
            widget.bind_font(&font);
        }
        for (_, group) in self.groups.iter_mut() {
            group.set_font(&font);
        }
        self.font = Some(font);
    }

    pub fn default_text_size(&self) -> u32 {
        self.text_size
    }

    pub fn set_default_text_size(&mut self, size: u32) {
        self.text_size = size;
    }

    /// Route every widget's sounds, present and future, to `audio`.
    pub fn set_audio(&mut self, audio: AudioHandle) {
        for (_, widget) in self.widgets.iter_mut() {
            widget.bind_audio(&audio);
        }
        for (_, group) in self.groups.iter_mut() {
            group.set_audio(&audio);
        }
        self.audio = Some(audio);
    }

    /// Top-level widget currently holding the interaction lock.
    pub fn lock(&self) -> Option<WidgetId> {
        match self.lock {
            Some(Lock::Widget(id)) => Some(id),
            _ => None,
        }
    }

    /// Group currently holding the interaction lock for one of its widgets.
    pub fn group_lock(&self) -> Option<GroupId> {
        match self.lock {
            Some(Lock::Group(id)) => Some(id),
            _ => None,
        }
    }

    pub fn add_widget<W: Widget>(&mut self, widget: W) -> WidgetId {
        self.add_boxed(Box::new(widget))
    }

    pub fn add_boxed(&mut self, mut widget: Box<dyn Widget>) -> WidgetId {
        let id = WidgetId::next();
        bind_widget(widget.as_mut(), self.surface, self.font.as_ref(), self.audio.as_ref());
        self.widgets.push((id, widget));
        log::debug!("Added widget {:?}", id);
        id
    }

    pub fn remove_widget(&mut self, id: WidgetId) -> Option<Box<dyn Widget>> {
        let index = self.widgets.iter().position(|(widget_id, _)| *widget_id == id)?;
        if self.lock == Some(Lock::Widget(id)) {
            self.lock = None;
        }
        Some(self.widgets.remove(index).1)
    }

    /// Add a group, binding every widget in its subtree to this GUI.
    pub fn add_group(&mut self, mut group: Group) -> GroupId {
        let id = GroupId::next();
        let relative = group.relative_position();
        group.set_global_position(relative);
        group.attach(self.surface, self.font.as_ref(), self.audio.as_ref());
        self.groups.push((id, group));
        log::debug!("Added group {:?}", id);
        id
    }

    pub fn remove_group(&mut self, id: GroupId) -> Option<Group> {
        let index = self.groups.iter().position(|(group_id, _)| *group_id == id)?;
        if self.lock == Some(Lock::Group(id)) {
            self.lock = None;
        }
        Some(self.groups.remove(index).1)
    }

    pub fn widget(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.widgets
            .iter()
            .find(|(widget_id, _)| *widget_id == id)
            .map(|(_, widget)| widget.as_ref())
    }

    pub fn widget_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.widgets
            .iter_mut()
            .find(|(widget_id, _)| *widget_id == id)
            .and_then(|(_, widget)| widget.as_any_mut().downcast_mut::<T>())
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|(group_id, _)| *group_id == id).map(|(_, group)| group)
    }

    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups
            .iter_mut()
            .find(|(group_id, _)| *group_id == id)
            .map(|(_, group)| group)
    }

    /// Top-level groups in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &Group)> {
        self.groups.iter().map(|(id, group)| (*id, group))
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Route one input event and update the cursor glyph.
    pub fn handle_event(&mut self, event: &InputEvent, surface: &mut dyn Surface) -> Result<(), GuiError> {
        if !surface.is_open() || matches!(event, InputEvent::Closed) {
            return Ok(());
        }
        self.showing_hand = false;

        // While locked only the holder is called, even after it lets go.
        let held = self.lock;
        for (id, widget) in self.widgets.iter_mut() {
            let mine = held == Some(Lock::Widget(*id));
            if held.is_some() && !mine {
                continue;
            }
            let handled = widget.handle_event(event, &*surface)?;
            if self.showing_hand {
                continue;
            }
            self.showing_hand = handled;
            if handled && self.lock.is_none() {
                log::trace!("Widget {:?} took the interaction lock", id);
                self.lock = Some(Lock::Widget(*id));
            } else if !handled && mine {
                log::trace!("Widget {:?} released the interaction lock", id);
                self.lock = None;
            }
        }

        // A widget that took the lock above keeps the groups out for this event.
        let widget_took = held.is_none() && self.lock.is_some();
        if !widget_took {
            for (id, group) in self.groups.iter_mut() {
                let mine = held == Some(Lock::Group(*id));
                if held.is_some() && !mine {
                    continue;
                }
                let handled = group.handle_event(event, &*surface)?;
                self.showing_hand |= handled;
                if handled && self.lock.is_none() {
                    log::trace!("Group {:?} took the interaction lock", id);
                    self.lock = Some(Lock::Group(*id));
                } else if !handled && mine {
                    log::trace!("Group {:?} released the interaction lock", id);
                    self.lock = None;
                }
            }
        }

        surface.set_cursor(if self.showing_hand { self.hand } else { self.arrow });
        Ok(())
    }

    /// Draw top-level widgets, then groups, each in insertion order.
    pub fn draw(&mut self, surface: &mut dyn Surface) -> Result<(), GuiError> {
        for (_, widget) in self.widgets.iter_mut() {
            widget.draw(surface)?;
        }
        for (_, group) in self.groups.iter_mut() {
            group.draw(surface)?;
        }
        Ok(())
    }

    /// Move a top-level group, carrying its subtree along.
    pub fn move_group(&mut self, id: GroupId, position: Vec2) -> bool {
        match self.group_mut(id) {
            Some(group) => {
                group.set_relative_position(position);
                true
            }
            None => false,
        }
    }
}
