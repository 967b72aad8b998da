use gtk4 as gtk;
use gtk::glib::idle_add_local_once;
use gtk::prelude::*;
use gtk::Widget;

/// Runs work on a later iteration of the main loop.
pub trait Defer {
    fn defer(&self, task: Box<dyn FnOnce()>);
}

pub struct Idle;

impl Defer for Idle {
    fn defer(&self, task: Box<dyn FnOnce()>) {
        idle_add_local_once(task);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Deferred,
}

/// Applies `apply` to whatever `lookup` finds. When nothing is found yet,
/// tries once more on the next cycle and then gives up; the next update
/// will carry fresh data anyway.
pub fn apply_or_retry<T, L, A>(lookup: L, apply: A, defer: &impl Defer) -> Outcome
where
    T: 'static,
    L: Fn() -> Option<T> + 'static,
    A: FnOnce(T) + 'static,
{
    if let Some(target) = lookup() {
        apply(target);
        return Outcome::Applied;
    }
    defer.defer(Box::new(move || match lookup() {
        Some(target) => apply(target),
        None => log::debug!("target still missing after retry, update dropped"),
    }));
    Outcome::Deferred
}

/// Depth-first search for a widget whose name is `name`, `root` included.
pub fn find_named(root: &impl IsA<Widget>, name: &str) -> Option<Widget> {
    let root = root.as_ref();
    if root.widget_name().as_str() == name {
        return Some(root.clone());
    }
    let mut child = root.first_child();
    while let Some(widget) = child {
        if let Some(found) = find_named(&widget, name) {
            return Some(found);
        }
        child = widget.next_sibling();
    }
    None
}

pub fn find_named_as<W>(root: &impl IsA<Widget>, name: &str) -> Option<W>
where
    W: IsA<Widget>,
{
    find_named(root, name).and_then(|w| w.downcast::<W>().ok())
}
