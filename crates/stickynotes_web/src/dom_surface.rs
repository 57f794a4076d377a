//! DOM rendering surface.
//!
//! # Responsibility
//! - Build and tear down note cards inside the container element.
//! - Forward card-level DOM events as `CardEvent`s to the installed handler.
//!
//! # Invariants
//! - Each live card owns its listener closures; they are retired, not
//!   dropped, on unmount because the unmount may run inside one of them.
//! - Events are delivered synchronously; the handler decides whether to
//!   queue them.

use crate::routing::CardEvent;
use log::error;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use stickynotes_core::{format_px, Note, NoteId, NoteSurface, Position, PressTarget, Size};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent, MouseEvent, Node, TouchEvent};

const RAISED_Z_INDEX: &str = "1000";

type Handler = Rc<dyn Fn(&NoteId, CardEvent)>;

/// Shared slot for the card event handler, filled once the board exists.
#[derive(Clone, Default)]
pub(crate) struct EventSink {
    handler: Rc<RefCell<Option<Handler>>>,
}

impl EventSink {
    pub(crate) fn install(&self, handler: impl Fn(&NoteId, CardEvent) + 'static) {
        *self.handler.borrow_mut() = Some(Rc::new(handler));
    }

    fn emit(&self, id: &NoteId, event: CardEvent) {
        let handler = self.handler.borrow().clone();
        if let Some(handler) = handler {
            handler(id, event);
        }
    }
}

struct Card {
    root: HtmlElement,
    content: HtmlElement,
    _listeners: Vec<Closure<dyn FnMut(Event)>>,
}

pub struct DomSurface {
    document: Document,
    container: HtmlElement,
    sink: EventSink,
    cards: HashMap<NoteId, Card>,
    retired: Vec<Card>,
}

impl DomSurface {
    pub(crate) fn new(document: Document, container: HtmlElement, sink: EventSink) -> Self {
        Self {
            document,
            container,
            sink,
            cards: HashMap::new(),
            retired: Vec::new(),
        }
    }

    /// Converts client coordinates to container-local ones.
    pub fn to_local(&self, client: Position) -> Position {
        container_local(&self.container, client)
    }

    fn build_card(&self, note: &Note) -> Result<Card, JsValue> {
        let root: HtmlElement = self.document.create_element("div")?.dyn_into()?;
        root.class_list().add_1("note")?;
        root.dataset().set("id", note.id().as_str())?;
        let style = root.style();
        style.set_property("left", &format_px(note.position().left))?;
        style.set_property("top", &format_px(note.position().top))?;
        style.set_property("background-color", note.color())?;
        style.set_property("cursor", "grab")?;
        root.set_attribute("tabindex", "0")?;
        root.set_attribute("aria-label", "Sticky Note")?;

        let content: HtmlElement = self.document.create_element("div")?.dyn_into()?;
        content.class_list().add_1("content")?;
        content.set_text_content(Some(note.content()));
        content.set_attribute("contenteditable", "false")?;
        content.set_attribute("aria-multiline", "true")?;
        content.set_attribute("spellcheck", "false")?;

        let delete_button: HtmlElement = self.document.create_element("button")?.dyn_into()?;
        delete_button.class_list().add_1("delete-btn")?;
        delete_button.set_inner_html("&times;");
        delete_button.set_attribute("aria-label", "Delete note")?;

        root.append_child(&content)?;
        root.append_child(&delete_button)?;

        let listeners = self.wire_card(note.id(), &root, &content, &delete_button)?;
        self.container.append_child(&root)?;

        Ok(Card {
            root,
            content,
            _listeners: listeners,
        })
    }

    fn wire_card(
        &self,
        id: &NoteId,
        root: &HtmlElement,
        content: &HtmlElement,
        delete_button: &HtmlElement,
    ) -> Result<Vec<Closure<dyn FnMut(Event)>>, JsValue> {
        let mut listeners = Vec::new();

        let on_delete = self.listener(id, |event| {
            event.stop_propagation();
            Some(CardEvent::DeleteClicked)
        });
        delete_button.add_event_listener_with_callback("click", on_delete.as_ref().unchecked_ref())?;
        listeners.push(on_delete);

        let on_dblclick = self.listener(id, |_| Some(CardEvent::DoubleClicked));
        root.add_event_listener_with_callback("dblclick", on_dblclick.as_ref().unchecked_ref())?;
        listeners.push(on_dblclick);

        let on_keydown = {
            let document = self.document.clone();
            let root = root.clone();
            let content = content.clone();
            self.listener(id, move |event| {
                let key = event.dyn_ref::<KeyboardEvent>()?.key();
                let card: &Element = &root;
                if key == "Enter" && document.active_element().as_ref() == Some(card) {
                    event.prevent_default();
                    return Some(CardEvent::EnterOnCard);
                }
                if key == "Escape" && content.is_content_editable() {
                    event.prevent_default();
                    return Some(CardEvent::Escape);
                }
                None
            })
        };
        root.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;
        listeners.push(on_keydown);

        let on_blur = {
            let content = content.clone();
            self.listener(id, move |_| {
                content
                    .is_content_editable()
                    .then_some(CardEvent::ContentBlurred)
            })
        };
        content.add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref())?;
        listeners.push(on_blur);

        let on_mousedown = {
            let container = self.container.clone();
            let content = content.clone();
            let delete_button = delete_button.clone();
            self.listener(id, move |event| {
                let mouse = event.dyn_ref::<MouseEvent>()?;
                let target = press_target(&event, &content, &delete_button)?;
                if target == PressTarget::Body {
                    event.prevent_default();
                }
                let client = Position::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
                Some(CardEvent::Pressed {
                    pointer: container_local(&container, client),
                    target,
                })
            })
        };
        root.add_event_listener_with_callback("mousedown", on_mousedown.as_ref().unchecked_ref())?;
        listeners.push(on_mousedown);

        let on_touchstart = {
            let container = self.container.clone();
            let content = content.clone();
            let delete_button = delete_button.clone();
            self.listener(id, move |event| {
                let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
                let target = press_target(&event, &content, &delete_button)?;
                if target == PressTarget::Body {
                    event.prevent_default();
                }
                let client = Position::new(f64::from(touch.client_x()), f64::from(touch.client_y()));
                Some(CardEvent::Pressed {
                    pointer: container_local(&container, client),
                    target,
                })
            })
        };
        let options = web_sys::AddEventListenerOptions::new();
        options.set_passive(false);
        root.add_event_listener_with_callback_and_add_event_listener_options(
            "touchstart",
            on_touchstart.as_ref().unchecked_ref(),
            &options,
        )?;
        listeners.push(on_touchstart);

        Ok(listeners)
    }

    /// Wraps `translate` in a closure that forwards its event to the sink.
    fn listener(
        &self,
        id: &NoteId,
        translate: impl Fn(Event) -> Option<CardEvent> + 'static,
    ) -> Closure<dyn FnMut(Event)> {
        let sink = self.sink.clone();
        let id = id.clone();
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(card_event) = translate(event) {
                sink.emit(&id, card_event);
            }
        })
    }

    fn card(&self, id: &NoteId) -> Option<&Card> {
        self.cards.get(id)
    }

    fn set_style(&self, id: &NoteId, property: &str, value: Option<&str>) {
        let Some(card) = self.card(id) else {
            return;
        };
        let style = card.root.style();
        let result = match value {
            Some(value) => style.set_property(property, value),
            None => style.remove_property(property).map(|_| ()),
        };
        if let Err(err) = result {
            error!("event=dom_style module=web status=error note_id={id} property={property} error={err:?}");
        }
    }

    fn try_set_editable(&self, id: &NoteId, editable: bool) -> Result<(), JsValue> {
        let Some(card) = self.card(id) else {
            return Ok(());
        };
        if editable {
            card.content.set_attribute("contenteditable", "true")?;
            card.content.focus()?;
            place_caret_at_end(&self.document, &card.content)?;
            card.root.style().set_property("cursor", "text")?;
        } else {
            card.content.set_attribute("contenteditable", "false")?;
            card.root.style().set_property("cursor", "grab")?;
            card.content.blur()?;
        }
        Ok(())
    }
}

impl NoteSurface for DomSurface {
    fn mount(&mut self, note: &Note) {
        self.retired.clear();
        match self.build_card(note) {
            Ok(card) => {
                self.cards.insert(note.id().clone(), card);
            }
            Err(err) => error!(
                "event=dom_mount module=web status=error note_id={} error={err:?}",
                note.id()
            ),
        }
    }

    fn unmount(&mut self, id: &NoteId) {
        self.retired.clear();
        if let Some(card) = self.cards.remove(id) {
            card.root.remove();
            self.retired.push(card);
        }
    }

    fn set_position(&mut self, id: &NoteId, position: Position) {
        self.set_style(id, "left", Some(&format_px(position.left)));
        self.set_style(id, "top", Some(&format_px(position.top)));
    }

    fn set_color(&mut self, id: &NoteId, color: &str) {
        self.set_style(id, "background-color", Some(color));
    }

    fn set_raised(&mut self, id: &NoteId, raised: bool) {
        if raised {
            self.set_style(id, "z-index", Some(RAISED_Z_INDEX));
            self.set_style(id, "cursor", Some("grabbing"));
        } else {
            self.set_style(id, "z-index", None);
            self.set_style(id, "cursor", Some("grab"));
        }
    }

    fn set_editable(&mut self, id: &NoteId, editable: bool) {
        if let Err(err) = self.try_set_editable(id, editable) {
            error!("event=dom_edit module=web status=error note_id={id} editable={editable} error={err:?}");
        }
    }

    fn set_content(&mut self, id: &NoteId, content: &str) {
        if let Some(card) = self.card(id) {
            card.content.set_text_content(Some(content));
        }
    }

    fn read_content(&self, id: &NoteId) -> Option<String> {
        self.card(id).map(|card| card.content.inner_text())
    }

    fn note_size(&self, id: &NoteId) -> Size {
        self.card(id)
            .map(|card| {
                let rect = card.root.get_bounding_client_rect();
                Size::new(rect.width(), rect.height())
            })
            .unwrap_or_default()
    }

    fn container_size(&self) -> Size {
        let rect = self.container.get_bounding_client_rect();
        Size::new(rect.width(), rect.height())
    }
}

fn container_local(container: &HtmlElement, client: Position) -> Position {
    let rect = container.get_bounding_client_rect();
    Position::new(client.left - rect.left(), client.top - rect.top())
}

/// Classifies a press; `None` for presses on the delete button.
fn press_target(event: &Event, content: &HtmlElement, delete_button: &HtmlElement) -> Option<PressTarget> {
    let node = event.target().and_then(|target| target.dyn_into::<Node>().ok());
    let node = node.as_ref();
    if delete_button.contains(node) {
        return None;
    }
    if content.contains(node) {
        Some(PressTarget::Content)
    } else {
        Some(PressTarget::Body)
    }
}

fn place_caret_at_end(document: &Document, element: &HtmlElement) -> Result<(), JsValue> {
    let Some(selection) = document.get_selection()? else {
        return Ok(());
    };
    let range = document.create_range()?;
    range.select_node_contents(element)?;
    range.collapse_with_to_start(false);
    selection.remove_all_ranges()?;
    selection.add_range(&range)?;
    Ok(())
}
