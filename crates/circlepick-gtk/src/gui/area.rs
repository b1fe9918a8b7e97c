use crate::gui::app::{AppMsg, PickerId};
use circlepick::events::PointerEvent;
use circlepick::geometry::Point;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::Sender;

/// Forwards drags on `area` to the picker `id` as pointer events.
pub fn attach_pointer_gesture(area: &gtk::DrawingArea, id: PickerId, sender: &Sender<AppMsg>) {
    let gesture = gtk::GestureDrag::new();

    {
        let sender = sender.clone();
        gesture.connect_drag_begin(move |_, x, y| {
            sender.emit(AppMsg::Pointer(id, PointerEvent::Down(Point::new(x, y))));
        });
    }
    {
        let sender = sender.clone();
        gesture.connect_drag_update(move |gesture, dx, dy| {
            if let Some((x, y)) = gesture.start_point() {
                sender.emit(AppMsg::Pointer(
                    id,
                    PointerEvent::Move(Point::new(x + dx, y + dy)),
                ));
            }
        });
    }
    {
        let sender = sender.clone();
        gesture.connect_drag_end(move |_, _, _| {
            sender.emit(AppMsg::Pointer(id, PointerEvent::Up));
        });
    }
    {
        let sender = sender.clone();
        gesture.connect_cancel(move |_, _| {
            sender.emit(AppMsg::Pointer(id, PointerEvent::Cancel));
        });
    }

    area.add_controller(gesture);
}
