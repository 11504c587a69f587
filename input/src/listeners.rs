use derive_more::{Debug, Display};

use crate::GestureEvent;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display)]
#[display("listener#{_0}")]
pub struct ListenerId(u64);

type ListenerBox = Box<dyn FnMut(&GestureEvent)>;

/// Subscribed gesture listeners, notified synchronously in subscription order.
#[derive(Debug, Default)]
pub(crate) struct Listeners {
    next_id: u64,
    #[debug(skip)]
    entries: Vec<(ListenerId, ListenerBox)>,
}

impl Listeners {
    pub fn subscribe(&mut self, listener: impl FnMut(&GestureEvent) + 'static) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(i, _)| *i != id);
        self.entries.len() != before
    }

    pub fn dispatch(&mut self, event: &GestureEvent) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }
}
