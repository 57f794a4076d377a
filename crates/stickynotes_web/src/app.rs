//! Page wiring: board construction and event routing.
//!
//! # Responsibility
//! - Build the board over the page's container and `localStorage`.
//! - Route card, add-button and document-level drag events to the board.
//!
//! # Invariants
//! - Card events raised while the board is busy (e.g. a blur caused by a
//!   focus change inside a command) are queued and handled right after that
//!   command.

use crate::dom_surface::{DomSurface, EventSink};
use crate::local_storage::LocalStorageStore;
use crate::math_random::MathRandom;
use crate::routing::{handle_card_event, CardEvent};
use log::{error, info};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use stickynotes_core::{NoteBoard, NoteId, Position};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Event, HtmlElement, MouseEvent, TouchEvent};

const CONTAINER_ID: &str = "notesContainer";
const ADD_BUTTON_ID: &str = "addNoteBtn";

type Board = NoteBoard<LocalStorageStore, DomSurface, MathRandom>;

/// Root-owned board plus the queue of card events that arrived while it
/// was busy.
struct Host {
    board: RefCell<Board>,
    pending: RefCell<VecDeque<(NoteId, CardEvent)>>,
}

impl Host {
    /// Runs `command` on the board, then drains queued card events.
    /// Does nothing when called re-entrantly.
    fn run(&self, command: impl FnOnce(&mut Board)) {
        let Ok(mut board) = self.board.try_borrow_mut() else {
            return;
        };
        command(&mut *board);
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some((id, event)) = next else {
                break;
            };
            handle_card_event(&mut *board, &id, event);
        }
    }

    fn enqueue(&self, id: &NoteId, event: CardEvent) {
        self.pending.borrow_mut().push_back((id.clone(), event));
        self.run(|_| {});
    }
}

/// Builds the board, replays stored notes and installs every listener.
pub(crate) fn mount(document: &Document) -> Result<(), JsValue> {
    let container = element_by_id(document, CONTAINER_ID)?;
    let add_button = element_by_id(document, ADD_BUTTON_ID)?;

    let sink = EventSink::default();
    let surface = DomSurface::new(document.clone(), container, sink.clone());
    let store = LocalStorageStore::from_window()?;
    let host = Rc::new(Host {
        board: RefCell::new(NoteBoard::new(store, surface, MathRandom)),
        pending: RefCell::default(),
    });

    let weak_host = Rc::downgrade(&host);
    sink.install(move |id, event| {
        if let Some(host) = weak_host.upgrade() {
            host.enqueue(id, event);
        }
    });

    host.run(|board| match board.load() {
        Ok(restored) => info!("event=page_load module=web status=ok notes={restored}"),
        Err(err) => error!("event=page_load module=web status=error error={err}"),
    });

    wire_add_button(&add_button, &host)?;
    wire_document_drag(document, &host)?;
    Ok(())
}

fn wire_add_button(button: &HtmlElement, host: &Rc<Host>) -> Result<(), JsValue> {
    let host = Rc::clone(host);
    let on_click = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        host.run(|board| {
            if let Err(err) = board.add_from_trigger() {
                error!("event=add_note module=web status=error error={err}");
            }
        });
    });
    button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

/// Move/release listeners live on the document for the page lifetime and
/// do nothing without an active drag.
fn wire_document_drag(document: &Document, host: &Rc<Host>) -> Result<(), JsValue> {
    let on_mousemove = drag_move_listener(host, |event| {
        let mouse = event.dyn_ref::<MouseEvent>()?;
        Some(Position::new(
            f64::from(mouse.client_x()),
            f64::from(mouse.client_y()),
        ))
    });
    document.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref())?;
    on_mousemove.forget();

    let non_passive = AddEventListenerOptions::new();
    non_passive.set_passive(false);
    let on_touchmove = drag_move_listener(host, |event| {
        let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
        Some(Position::new(
            f64::from(touch.client_x()),
            f64::from(touch.client_y()),
        ))
    });
    document.add_event_listener_with_callback_and_add_event_listener_options(
        "touchmove",
        on_touchmove.as_ref().unchecked_ref(),
        &non_passive,
    )?;
    on_touchmove.forget();

    for release in ["mouseup", "touchend"] {
        let host = Rc::clone(host);
        let on_release = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            host.run(|board| {
                if let Err(err) = board.drag_end() {
                    error!("event=drag_end module=web status=error error={err}");
                }
            });
        });
        document.add_event_listener_with_callback(release, on_release.as_ref().unchecked_ref())?;
        on_release.forget();
    }
    Ok(())
}

fn drag_move_listener(
    host: &Rc<Host>,
    client_point: impl Fn(&Event) -> Option<Position> + 'static,
) -> Closure<dyn FnMut(Event)> {
    let host = Rc::clone(host);
    Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        host.run(|board| {
            if board.dragging().is_none() {
                return;
            }
            let Some(client) = client_point(&event) else {
                return;
            };
            let pointer = board.surface().to_local(client);
            board.drag_move(pointer);
            if event.type_() == "touchmove" {
                event.prevent_default();
            }
        });
    })
}

fn element_by_id(document: &Document, id: &str) -> Result<HtmlElement, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id} element")))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("#{id} is not an HTML element")))
}
