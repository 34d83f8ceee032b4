//! Widget groups
//!
//! A [`Group`] owns widgets and child groups and moves them together. Every
//! group has a relative offset from its parent and a cached global position;
//! widget positions are always stored in global (surface) coordinates.

use std::sync::atomic::{AtomicU32, Ordering};

use glam::Vec2;

use crate::audio::AudioHandle;
use crate::event::InputEvent;
use crate::font::Font;
use crate::surface::{Surface, SurfaceId};
use crate::widget::{GuiError, Widget, WidgetId};

/// Unique identifier for a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub u32);

impl GroupId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

pub struct Group {
    relative: Vec2,
    global: Vec2,
    visible: bool,
    widgets: Vec<(WidgetId, Box<dyn Widget>)>,
    children: Vec<(GroupId, Group)>,
    surface: Option<SurfaceId>,
    font: Option<Font>,
    audio: Option<AudioHandle>,
}

impl Group {
    /// A visible, detached group at `relative` from its future parent.
    pub fn new(relative: Vec2) -> Self {
        Self {
            relative,
            global: relative,
            visible: true,
            widgets: Vec::new(),
            children: Vec::new(),
            surface: None,
            font: None,
            audio: None,
        }
    }

    pub fn relative_position(&self) -> Vec2 {
        self.relative
    }

    pub fn global_position(&self) -> Vec2 {
        self.global
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hidden groups neither draw nor receive events.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Add a widget whose position is taken as an offset from this group.
    pub fn add_widget<W: Widget>(&mut self, widget: W) -> WidgetId {
        self.add_boxed(Box::new(widget))
    }

    pub fn add_boxed(&mut self, mut widget: Box<dyn Widget>) -> WidgetId {
        let id = WidgetId::next();
        let position = widget.position() + self.global;
        widget.move_to(position);
        if let Some(surface) = self.surface {
            bind_widget(widget.as_mut(), surface, self.font.as_ref(), self.audio.as_ref());
        }
        self.widgets.push((id, widget));
        id
    }

    pub fn remove_widget(&mut self, id: WidgetId) -> Option<Box<dyn Widget>> {
        let index = self.widgets.iter().position(|(widget_id, _)| *widget_id == id)?;
        Some(self.widgets.remove(index).1)
    }

    /// Nest `child`, placing it at this group's global position plus its
    /// relative offset.
    pub fn add_child_group(&mut self, mut child: Group) -> GroupId {
        let id = GroupId::next();
        child.set_global_position(self.global + child.relative);
        if let Some(surface) = self.surface {
            child.attach(surface, self.font.as_ref(), self.audio.as_ref());
        }
        self.children.push((id, child));
        id
    }

    pub fn clear_child_groups(&mut self) {
        self.children.clear();
    }

    /// Move this group, its widgets and all descendants so the group sits at `position`.
    pub fn set_global_position(&mut self, position: Vec2) {
        let old = self.global;
        for (_, widget) in self.widgets.iter_mut() {
            let offset = widget.position() - old;
            widget.move_to(position + offset);
        }
        for (_, child) in self.children.iter_mut() {
            let target = position + child.relative;
            child.set_global_position(target);
        }
        self.global = position;
    }

    /// Change the offset from the parent, moving the whole subtree.
    pub fn set_relative_position(&mut self, relative: Vec2) {
        let parent = self.global - self.relative;
        self.relative = relative;
        self.set_global_position(parent + relative);
    }

    pub fn first_child(&self) -> Option<&Group> {
        self.children.first().map(|(_, child)| child)
    }

    pub fn child(&self, id: GroupId) -> Option<&Group> {
        self.children.iter().find(|(child_id, _)| *child_id == id).map(|(_, child)| child)
    }

    pub fn child_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.children
            .iter_mut()
            .find(|(child_id, _)| *child_id == id)
            .map(|(_, child)| child)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn widgets(&self) -> impl Iterator<Item = (WidgetId, &dyn Widget)> {
        self.widgets.iter().map(|(id, widget)| (*id, widget.as_ref()))
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    pub fn widget(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.widgets
            .iter()
            .find(|(widget_id, _)| *widget_id == id)
            .map(|(_, widget)| widget.as_ref())
    }

    /// Typed access to a widget of this group.
    pub fn widget_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.widgets
            .iter_mut()
            .find(|(widget_id, _)| *widget_id == id)
            .and_then(|(_, widget)| widget.as_any_mut().downcast_mut::<T>())
    }

    /// Feed an event to every widget and child group.
    ///
    /// Returns true if any of them captured it. All children see the event
    /// even after one has captured it.
    pub fn handle_event(&mut self, event: &InputEvent, surface: &dyn Surface) -> Result<bool, GuiError> {
        if !self.visible {
            return Ok(false);
        }
        let mut handled = false;
        for (_, widget) in self.widgets.iter_mut() {
            handled |= widget.handle_event(event, surface)?;
        }
        for (_, child) in self.children.iter_mut() {
            handled |= child.handle_event(event, surface)?;
        }
        Ok(handled)
    }

    pub fn draw(&mut self, surface: &mut dyn Surface) -> Result<(), GuiError> {
        if !self.visible {
            return Ok(());
        }
        for (_, widget) in self.widgets.iter_mut() {
            widget.draw(surface)?;
        }
        for (_, child) in self.children.iter_mut() {
            child.draw(surface)?;
        }
        Ok(())
    }

    /// Bind the whole subtree to a surface and remember the bindings for
    /// widgets added later.
    pub(crate) fn attach(&mut self, surface: SurfaceId, font: Option<&Font>, audio: Option<&AudioHandle>) {
        self.surface = Some(surface);
        self.font = font.cloned();
        self.audio = audio.cloned();
        for (_, widget) in self.widgets.iter_mut() {
            bind_widget(widget.as_mut(), surface, font, audio);
        }
        for (_, child) in self.children.iter_mut() {
            child.attach(surface, font, audio);
        }
    }

    pub(crate) fn set_font(&mut self, font: &Font) {
        self.font = Some(font.clone());
        for (_, widget) in self.widgets.iter_mut() {
            widget.bind_font(font);
        }
        for (_, child) in self.children.iter_mut() {
            child.set_font(font);
        }
    }

    pub(crate) fn set_audio(&mut self, audio: &AudioHandle) {
        self.audio = Some(audio.clone());
        for (_, widget) in self.widgets.iter_mut() {
            widget.bind_audio(audio);
        }
        for (_, child) in self.children.iter_mut() {
            child.set_audio(audio);
        }
    }
}

impl std::fmt::Debug for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Group")
            .field("relative", &self.relative)
            .field("global", &self.global)
            .field("visible", &self.visible)
            .field("widgets", &self.widgets.len())
            .field("children", &self.children.len())
            .finish()
    }
}

pub(crate) fn bind_widget(
    widget: &mut dyn Widget,
    surface: SurfaceId,
    font: Option<&Font>,
    audio: Option<&AudioHandle>,
) {
    widget.bind_surface(surface);
    if let Some(font) = font {
        widget.bind_font(font);
    }
    if let Some(audio) = audio {
        widget.bind_audio(audio);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Canvas;
    use crate::widget::test_support::press;
    use crate::widget::{Button, CheckBox};

    fn chain_leaf() -> (Group, WidgetId) {
        let mut leaf = Group::new(Vec2::new(5.0, 5.0));
        let id = leaf.add_widget(CheckBox::new(Vec2::ZERO, Vec2::new(10.0, 10.0)));
        (leaf, id)
    }

    #[test]
    fn test_add_widget_offsets_by_global() {
        let mut group = Group::new(Vec2::new(10.0, 20.0));
        let id = group.add_widget(Button::new(Vec2::new(5.0, 5.0), Vec2::new(50.0, 20.0)));
        let button = group.widget(id).unwrap();
        assert_eq!(button.position(), Vec2::new(15.0, 25.0));
        assert_eq!(button.relative_position(&group), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_set_global_position_keeps_offsets() {
        let mut group = Group::new(Vec2::new(10.0, 10.0));
        let a = group.add_widget(Button::new(Vec2::new(0.0, 0.0), Vec2::new(5.0, 5.0)));
        let b = group.add_widget(CheckBox::new(Vec2::new(30.0, 40.0), Vec2::new(5.0, 5.0)));

        group.set_global_position(Vec2::new(100.0, 200.0));
        assert_eq!(group.widget(a).unwrap().position(), Vec2::new(100.0, 200.0));
        assert_eq!(group.widget(b).unwrap().position(), Vec2::new(130.0, 240.0));
        assert_eq!(group.global_position(), Vec2::new(100.0, 200.0));
    }

    #[test]
    fn test_nested_chain_bottom_up() {
        let (leaf, widget) = chain_leaf();
        let mut middle = Group::new(Vec2::new(0.0, 10.0));
        let leaf_id = middle.add_child_group(leaf);
        let mut root = Group::new(Vec2::new(10.0, 0.0));
        root.set_global_position(Vec2::new(10.0, 0.0));
        let middle_id = root.add_child_group(middle);

        let leaf = root.child(middle_id).unwrap().child(leaf_id).unwrap();
        assert_eq!(leaf.global_position(), Vec2::new(15.0, 15.0));
        assert_eq!(leaf.widget(widget).unwrap().position(), Vec2::new(15.0, 15.0));
    }

    #[test]
    fn test_nested_chain_top_down() {
        let mut root = Group::new(Vec2::new(10.0, 0.0));
        let middle_id = root.add_child_group(Group::new(Vec2::new(0.0, 10.0)));
        let (leaf, widget) = chain_leaf();
        let middle = root.child_mut(middle_id).unwrap();
        let leaf_id = middle.add_child_group(leaf);

        let leaf = middle.child(leaf_id).unwrap();
        assert_eq!(leaf.global_position(), Vec2::new(15.0, 15.0));
        assert_eq!(leaf.widget(widget).unwrap().position(), Vec2::new(15.0, 15.0));
    }

    #[test]
    fn test_set_relative_position_moves_subtree() {
        let mut root = Group::new(Vec2::ZERO);
        let child_id = root.add_child_group(Group::new(Vec2::new(10.0, 10.0)));
        let child = root.child_mut(child_id).unwrap();
        let id = child.add_widget(Button::new(Vec2::new(1.0, 1.0), Vec2::new(5.0, 5.0)));

        child.set_relative_position(Vec2::new(20.0, 0.0));
        assert_eq!(child.global_position(), Vec2::new(20.0, 0.0));
        assert_eq!(child.widget(id).unwrap().position(), Vec2::new(21.0, 1.0));

        root.set_global_position(Vec2::new(100.0, 100.0));
        let child = root.child(child_id).unwrap();
        assert_eq!(child.widget(id).unwrap().position(), Vec2::new(121.0, 101.0));
    }

    #[test]
    fn test_invisible_group_is_skipped() {
        let mut canvas = Canvas::new(100.0, 100.0);
        let mut group = Group::new(Vec2::ZERO);
        group.add_widget(Button::new(Vec2::ZERO, Vec2::new(50.0, 50.0)));
        group.attach(canvas.id(), None, None);
        group.set_visible(false);

        canvas.set_pointer(Vec2::new(10.0, 10.0));
        assert!(!group.handle_event(&press(), &canvas).unwrap());
        group.draw(&mut canvas).unwrap();
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn test_widgets_added_after_attach_are_bound() {
        let canvas = Canvas::new(100.0, 100.0);
        let mut group = Group::new(Vec2::ZERO);
        group.attach(canvas.id(), None, None);
        let id = group.add_widget(CheckBox::new(Vec2::ZERO, Vec2::new(5.0, 5.0)));
        let child_id = group.add_child_group(Group::new(Vec2::ZERO));

        assert_eq!(group.widget(id).unwrap().surface(), Some(canvas.id()));
        assert!(group.child(child_id).unwrap().is_attached());
    }

    #[test]
    fn test_every_child_sees_event() {
        let mut canvas = Canvas::new(100.0, 100.0);
        let mut group = Group::new(Vec2::ZERO);
        let first = group.add_widget(CheckBox::new(Vec2::ZERO, Vec2::new(50.0, 50.0)));
        let second = group.add_widget(CheckBox::new(Vec2::ZERO, Vec2::new(50.0, 50.0)));
        group.attach(canvas.id(), None, None);

        canvas.set_pointer(Vec2::new(10.0, 10.0));
        assert!(group.handle_event(&press(), &canvas).unwrap());
        assert!(group.widget_mut::<CheckBox>(first).unwrap().interaction().is_pressed());
        assert!(group.widget_mut::<CheckBox>(second).unwrap().interaction().is_pressed());
        assert!(group.widget_mut::<Button>(first).is_none());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut group = Group::new(Vec2::ZERO);
        let id = group.add_widget(Button::new(Vec2::ZERO, Vec2::ONE));
        group.add_child_group(Group::new(Vec2::ZERO));
        assert!(group.remove_widget(id).is_some());
        assert!(group.remove_widget(id).is_none());
        group.clear_child_groups();
        assert_eq!(group.widget_count(), 0);
        assert!(group.first_child().is_none());
    }
}
