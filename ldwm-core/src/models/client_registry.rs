//! Arena of managed clients threaded by two independent lists.
//!
//! Every client lives once in the arena and is linked into the insertion list (`next`) and the
//! focus stack (`snext`). Links are generation checked keys, so a stale id never aliases a new
//! client.
use super::{Client, Handle, TagMask, WindowHandle};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct ClientId;
}

#[derive(Debug)]
pub struct ClientRegistry<H: Handle> {
    arena: SlotMap<ClientId, Client<H>>,
    clients: Option<ClientId>,
    stack: Option<ClientId>,
    pub(crate) sel: Option<ClientId>,
}

impl<H: Handle> Default for ClientRegistry<H> {
    fn default() -> Self {
        Self {
            arena: SlotMap::with_key(),
            clients: None,
            stack: None,
            sel: None,
        }
    }
}

impl<H: Handle> ClientRegistry<H> {
    /// Stores a client without linking it into either list.
    pub fn insert(&mut self, client: Client<H>) -> ClientId {
        self.arena.insert(client)
    }

    /// Drops a client from the arena. It must already be detached from both lists.
    pub fn remove(&mut self, id: ClientId) -> Option<Client<H>> {
        debug_assert!(
            !self.iter().any(|c| c == id) && !self.stack_iter().any(|c| c == id),
            "removing a client that is still linked"
        );
        self.arena.remove(id)
    }

    pub fn get(&self, id: ClientId) -> Option<&Client<H>> {
        self.arena.get(id)
    }

    pub fn get_mut(&mut self, id: ClientId) -> Option<&mut Client<H>> {
        self.arena.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn selected(&self) -> Option<ClientId> {
        self.sel
    }

    pub fn head(&self) -> Option<ClientId> {
        self.clients
    }

    pub fn stack_head(&self) -> Option<ClientId> {
        self.stack
    }

    /// The client after `id` in insertion order.
    pub fn next_of(&self, id: ClientId) -> Option<ClientId> {
        self.arena.get(id).and_then(|c| c.next)
    }

    /// Inserts at the head of the insertion list.
    pub fn attach(&mut self, id: ClientId) {
        let head = self.clients;
        if let Some(client) = self.arena.get_mut(id) {
            client.next = head;
            self.clients = Some(id);
        }
    }

    /// Unlinks from the insertion list. Does nothing when the client is not linked.
    pub fn detach(&mut self, id: ClientId) {
        let next = self.arena.get(id).and_then(|c| c.next);
        if self.clients == Some(id) {
            self.clients = next;
            return;
        }
        let mut cursor = self.clients;
        while let Some(current) = cursor {
            let following = self.arena.get(current).and_then(|c| c.next);
            if following == Some(id) {
                if let Some(prev) = self.arena.get_mut(current) {
                    prev.next = next;
                }
                return;
            }
            cursor = following;
        }
    }

    /// Inserts at the head of the focus stack.
    pub fn attach_stack(&mut self, id: ClientId) {
        let head = self.stack;
        if let Some(client) = self.arena.get_mut(id) {
            client.snext = head;
            self.stack = Some(id);
        }
    }

    /// Unlinks from the focus stack. When the client was selected, selection moves to the first
    /// client of the stack visible under `tagset`, or to nothing.
    pub fn detach_stack(&mut self, id: ClientId, tagset: TagMask) {
        let snext = self.arena.get(id).and_then(|c| c.snext);
        if self.stack == Some(id) {
            self.stack = snext;
        } else {
            let mut cursor = self.stack;
            while let Some(current) = cursor {
                let following = self.arena.get(current).and_then(|c| c.snext);
                if following == Some(id) {
                    if let Some(prev) = self.arena.get_mut(current) {
                        prev.snext = snext;
                    }
                    break;
                }
                cursor = following;
            }
        }

        if self.sel == Some(id) {
            self.sel = self
                .stack_iter()
                .find(|&c| self.arena[c].is_visible(tagset));
        }
    }

    /// Walks the insertion list from `from`, skipping floating and hidden clients.
    pub fn next_tiled(&self, from: Option<ClientId>, tagset: TagMask) -> Option<ClientId> {
        let mut cursor = from;
        while let Some(id) = cursor {
            let client = self.arena.get(id)?;
            if !client.is_floating && client.is_visible(tagset) {
                return Some(id);
            }
            cursor = client.next;
        }
        None
    }

    /// Lazily yields the tiled clients visible under `tagset`, in insertion order.
    pub fn tiled(&self, tagset: TagMask) -> impl Iterator<Item = ClientId> + '_ {
        let mut cursor = self.next_tiled(self.clients, tagset);
        std::iter::from_fn(move || {
            let current = cursor?;
            cursor = self.next_tiled(self.next_of(current), tagset);
            Some(current)
        })
    }

    /// Insertion order.
    pub fn iter(&self) -> Links<'_, H> {
        Links {
            registry: self,
            cursor: self.clients,
            stack: false,
        }
    }

    /// Focus stack order, most recently focused first.
    pub fn stack_iter(&self) -> Links<'_, H> {
        Links {
            registry: self,
            cursor: self.stack,
            stack: true,
        }
    }

    pub fn visible(&self, tagset: TagMask) -> impl Iterator<Item = ClientId> + '_ {
        self.iter().filter(move |&id| self.arena[id].is_visible(tagset))
    }

    /// Finds the client owning `handle`.
    pub fn win_to_client(&self, handle: &WindowHandle<H>) -> Option<ClientId> {
        self.iter().find(|&id| self.arena[id].handle == *handle)
    }
}

impl<H: Handle> std::ops::Index<ClientId> for ClientRegistry<H> {
    type Output = Client<H>;

    fn index(&self, id: ClientId) -> &Client<H> {
        &self.arena[id]
    }
}

impl<H: Handle> std::ops::IndexMut<ClientId> for ClientRegistry<H> {
    fn index_mut(&mut self, id: ClientId) -> &mut Client<H> {
        &mut self.arena[id]
    }
}

/// Iterator over one of the two client lists.
pub struct Links<'a, H: Handle> {
    registry: &'a ClientRegistry<H>,
    cursor: Option<ClientId>,
    stack: bool,
}

impl<'a, H: Handle> Iterator for Links<'a, H> {
    type Item = ClientId;

    fn next(&mut self) -> Option<ClientId> {
        let current = self.cursor?;
        let client = self.registry.arena.get(current)?;
        self.cursor = if self.stack { client.snext } else { client.next };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MockHandle;

    fn registry_with(count: i32) -> (ClientRegistry<MockHandle>, Vec<ClientId>) {
        let mut registry = ClientRegistry::default();
        let ids = (1..=count)
            .map(|h| {
                let id = registry.insert(Client::new(WindowHandle(h)));
                registry.attach(id);
                registry.attach_stack(id);
                id
            })
            .collect();
        (registry, ids)
    }

    #[test]
    fn attach_puts_clients_first() {
        let (registry, ids) = registry_with(3);
        let order: Vec<ClientId> = registry.iter().collect();
        assert_eq!(order, vec![ids[2], ids[1], ids[0]]);
        let stack: Vec<ClientId> = registry.stack_iter().collect();
        assert_eq!(stack, order);
    }

    #[test]
    fn lists_are_independent() {
        let (mut registry, ids) = registry_with(3);
        registry.detach_stack(ids[0], TagMask::ALL);
        registry.attach_stack(ids[0]);
        assert_eq!(registry.stack_iter().next(), Some(ids[0]));
        assert_eq!(registry.iter().next(), Some(ids[2]));
    }

    #[test]
    fn detach_from_the_middle() {
        let (mut registry, ids) = registry_with(3);
        registry.detach(ids[1]);
        registry.detach_stack(ids[1], TagMask::ALL);
        assert_eq!(registry.iter().collect::<Vec<_>>(), vec![ids[2], ids[0]]);
        assert_eq!(registry.stack_iter().collect::<Vec<_>>(), vec![ids[2], ids[0]]);
        assert!(registry.remove(ids[1]).is_some());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn detaching_an_unlinked_client_is_a_noop() {
        let (mut registry, ids) = registry_with(2);
        registry.detach(ids[0]);
        registry.detach(ids[0]);
        assert_eq!(registry.iter().collect::<Vec<_>>(), vec![ids[1]]);
    }

    #[test]
    fn detach_stack_repairs_selection() {
        let (mut registry, ids) = registry_with(3);
        registry[ids[1]].tags = TagMask::single(1);
        registry.sel = Some(ids[2]);
        registry.detach_stack(ids[2], TagMask::single(0));
        // ids[1] is next on the stack but hidden.
        assert_eq!(registry.selected(), Some(ids[0]));

        registry.detach_stack(ids[0], TagMask::single(0));
        assert_eq!(registry.selected(), None);
    }

    #[test]
    fn next_tiled_skips_floating_and_hidden() {
        let (mut registry, ids) = registry_with(4);
        registry[ids[3]].is_floating = true;
        registry[ids[1]].tags = TagMask::single(2);
        let tiled: Vec<ClientId> = registry.tiled(TagMask::single(0)).collect();
        assert_eq!(tiled, vec![ids[2], ids[0]]);
        // restartable from any point
        assert_eq!(
            registry.next_tiled(registry.next_of(ids[2]), TagMask::single(0)),
            Some(ids[0])
        );
    }

    #[test]
    fn win_to_client_finds_handles() {
        let (registry, ids) = registry_with(3);
        assert_eq!(registry.win_to_client(&WindowHandle(2)), Some(ids[1]));
        assert_eq!(registry.win_to_client(&WindowHandle(9)), None);
    }
}
