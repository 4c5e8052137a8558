//! Backend base URLs as published by the host server.

use wire::Endpoints;

/// Endpoint catalogue plus whether `/app-config.json` has been consulted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigState {
    pub endpoints: Endpoints,
    pub loaded: bool,
}

impl ConfigState {
    /// Install the fetched catalogue, or keep the local defaults when the
    /// host did not provide one.
    pub fn apply(&mut self, endpoints: Option<Endpoints>) {
        if let Some(endpoints) = endpoints {
            self.endpoints = endpoints;
        }
        self.loaded = true;
    }

    /// Endpoints once configuration is settled.
    pub fn ready(&self) -> Option<Endpoints> {
        self.loaded.then(|| self.endpoints.clone())
    }
}
