/// Key events the front-end feeds into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Enter,
    Escape,
}

/// What a shortcut resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    ClearSearch,
    CloseDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

#[derive(Debug)]
struct Binding {
    id: SubscriptionId,
    key: KeyEvent,
    action: ShortcutAction,
}

/// Explicit subscribe/unsubscribe registry for global key shortcuts.
/// Views subscribe on enter and unsubscribe on exit, so teardown order is
/// deterministic. Dispatch resolves to the most recently subscribed
/// binding for the key, letting a newly opened view shadow older bindings
/// until it unsubscribes.
#[derive(Debug, Default)]
pub struct ShortcutRegistry {
    next_id: u64,
    bindings: Vec<Binding>,
}

impl ShortcutRegistry {
    pub fn subscribe(&mut self, key: KeyEvent, action: ShortcutAction) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.bindings.push(Binding { id, key, action });
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.bindings.retain(|b| b.id != id);
    }

    pub fn dispatch(&self, key: KeyEvent) -> Option<ShortcutAction> {
        self.bindings
            .iter()
            .rev()
            .find(|b| b.key == key)
            .map(|b| b.action)
    }
}
