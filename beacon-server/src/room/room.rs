use beacon_core::ClientId;

/// One host plus the viewers that joined it, in join order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    host: ClientId,
    viewers: Vec<ClientId>,
}

impl Room {
    pub fn new(host: ClientId) -> Self {
        Self {
            host,
            viewers: Vec::new(),
        }
    }

    pub fn host(&self) -> &ClientId {
        &self.host
    }

    pub fn viewers(&self) -> &[ClientId] {
        &self.viewers
    }

    pub fn is_host(&self, client_id: &ClientId) -> bool {
        &self.host == client_id
    }

    pub fn has_viewer(&self, client_id: &ClientId) -> bool {
        self.viewers.contains(client_id)
    }

    pub fn is_member(&self, client_id: &ClientId) -> bool {
        self.is_host(client_id) || self.has_viewer(client_id)
    }

    /// Returns `false` if the viewer was already present.
    pub(crate) fn add_viewer(&mut self, client_id: ClientId) -> bool {
        if self.is_member(&client_id) {
            return false;
        }
        self.viewers.push(client_id);
        true
    }

    pub(crate) fn remove_viewer(&mut self, client_id: &ClientId) -> bool {
        let before = self.viewers.len();
        self.viewers.retain(|v| v != client_id);
        self.viewers.len() != before
    }

    pub(crate) fn into_viewers(self) -> Vec<ClientId> {
        self.viewers
    }
}
