use crate::dom;
use crate::markers::{self, HotspotElements};
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::CardController;

/// One marker/close pair of listeners per hotspot. Handlers only mutate the
/// controller and the card elements; marker visibility follows on the next
/// frame from the controller state.
pub fn wire_card_handlers(elements: Rc<Vec<HotspotElements>>, cards: Rc<RefCell<CardController>>) {
    for (i, el) in elements.iter().enumerate() {
        let open_cards = cards.clone();
        let open_elements = elements.clone();
        dom::add_click_listener(&el.trigger, move || {
            let mut c = open_cards.borrow_mut();
            match c.click_marker(i) {
                Ok(state) => {
                    log::info!("[cards] marker {} clicked -> {:?}", i, state);
                    markers::apply_cards(&open_elements, &c);
                }
                Err(e) => log::error!("[cards] {}", e),
            }
        });

        let close_cards = cards.clone();
        let close_elements = elements.clone();
        dom::add_click_listener(&el.close, move || {
            let mut c = close_cards.borrow_mut();
            match c.click_close(i) {
                Ok(state) => {
                    log::info!("[cards] close {} clicked -> {:?}", i, state);
                    markers::apply_cards(&close_elements, &c);
                }
                Err(e) => log::error!("[cards] {}", e),
            }
        });
    }
}
