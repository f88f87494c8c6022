//! Client shared between tasks.

use std::sync::Arc;

use tokio::net::TcpStream;
use tokio::sync::{Mutex, MutexGuard};

use super::client::Client;

/// Cloneable handle to one [`Client`].
///
/// DICT replies are matched to commands purely by order, so only one
/// command may be in flight on a connection. Holding the guard returned by
/// [`SharedClient::lock`] for the whole command (send plus reply) keeps
/// callers from interleaving.
pub struct SharedClient<S = TcpStream> {
    inner: Arc<Mutex<Client<S>>>,
}

impl<S> SharedClient<S> {
    /// Wraps a client.
    #[must_use]
    pub fn new(client: Client<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(client)),
        }
    }

    /// Waits for exclusive access to the client.
    pub async fn lock(&self) -> MutexGuard<'_, Client<S>> {
        self.inner.lock().await
    }
}

impl<S> Clone for SharedClient<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> From<Client<S>> for SharedClient<S> {
    fn from(client: Client<S>) -> Self {
        Self::new(client)
    }
}

impl<S> std::fmt::Debug for SharedClient<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tokio_test::io::{Builder, Mock};

    use super::*;
    use crate::connection::{Config, Endpoint};

    #[tokio::test]
    async fn test_tasks_take_turns() {
        let mock = Builder::new()
            .read(b"220 dict.example.org <mime> <1@dict.example.org>\r\n")
            .write(b"STATUS\r\n")
            .read(b"210 status one\r\n")
            .write(b"STATUS\r\n")
            .read(b"210 status two\r\n")
            .build();

        let mut client: Client<Mock> =
            Client::with_config(Config::new(Endpoint::new("localhost", 2628)));
        client.connect_stream(mock).await.unwrap();
        let shared = SharedClient::new(client);

        let first = {
            let shared = shared.clone();
            tokio::spawn(async move { shared.lock().await.status().await.unwrap().message })
        };
        let first = first.await.unwrap();

        let second = shared.lock().await.status().await.unwrap().message;

        assert_eq!(first, "status one");
        assert_eq!(second, "status two");
    }
}
