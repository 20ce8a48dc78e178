mod client;
mod connection;
mod events;
pub(crate) mod protocol;

pub(crate) use {client::ObsClient, events::EventListener};
